use serde::Serialize;
use thiserror::Error;

use storefront_core::UserId;

use crate::{Action, Actor, EntityKind, PolicyRegistry, Resource};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("no policy registered for '{0}'")]
    NoPolicy(EntityKind),

    #[error("forbidden: '{action}' on {kind}")]
    Forbidden { kind: EntityKind, action: String },
}

/// Authorize `actor` to perform `action` on `resource`.
///
/// The registry picks the policy by the resource's kind; a kind with no
/// registered policy is denied rather than allowed.
pub fn authorize(
    registry: &PolicyRegistry,
    actor: &Actor,
    resource: &dyn Resource,
    action: &Action,
) -> Result<(), AuthzError> {
    let kind = resource.kind();
    let Some(policy) = registry.policy_for(kind) else {
        tracing::warn!(kind = %kind, "authorization requested for unregistered entity kind");
        return Err(AuthzError::NoPolicy(kind));
    };

    if policy.check(actor, resource, action) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = %actor.user_id,
            kind = %kind,
            action = %action,
            policy = policy.name(),
            "authorization denied"
        );
        Err(AuthzError::Forbidden {
            kind,
            action: action.as_str().to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    pub kind: EntityKind,
    pub action: String,
    pub actor: UserId,
    pub owner: UserId,
    /// Name of the policy consulted, if one was registered.
    pub policy: Option<String>,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
}

/// Explain why an authorization decision was made (or would be made).
pub fn explain_authorization(
    registry: &PolicyRegistry,
    actor: &Actor,
    resource: &dyn Resource,
    action: &Action,
) -> AuthorizationExplanation {
    let kind = resource.kind();
    let owner = resource.owner_id();

    let (policy, granted, reason) = match registry.policy_for(kind) {
        None => (
            None,
            false,
            format!("No policy is registered for {kind}; access is denied by default"),
        ),
        Some(policy) => {
            let granted = policy.check(actor, resource, action);
            let reason = if granted {
                format!("Policy '{}' allows '{}' on {}", policy.name(), action, kind)
            } else if owner != actor.user_id {
                format!(
                    "Policy '{}' denied '{}': {} belongs to user {}, not {}",
                    policy.name(),
                    action,
                    kind,
                    owner,
                    actor.user_id
                )
            } else {
                format!("Policy '{}' does not grant '{}' on {}", policy.name(), action, kind)
            };
            (Some(policy.name().to_string()), granted, reason)
        }
    };

    AuthorizationExplanation {
        kind,
        action: action.as_str().to_string(),
        actor: actor.user_id,
        owner,
        policy,
        granted,
        reason,
    }
}
