use std::collections::HashSet;

use crate::{Action, Actor, Resource};

/// Decides whether an actor may perform an action on one entity instance.
///
/// - No IO
/// - No panics
/// - Unknown actions are denied
pub trait Policy: Send + Sync {
    fn check(&self, actor: &Actor, resource: &dyn Resource, action: &Action) -> bool;

    /// Short name used in logs and explanations.
    fn name(&self) -> &str;
}

/// Grants the configured actions to the entity's owner, and nothing to anyone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipPolicy {
    actions: HashSet<Action>,
}

impl OwnershipPolicy {
    pub fn new<I, A>(actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Action>,
    {
        Self {
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows_action(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }
}

impl Policy for OwnershipPolicy {
    fn check(&self, actor: &Actor, resource: &dyn Resource, action: &Action) -> bool {
        self.allows_action(action) && resource.owner_id() == actor.user_id
    }

    fn name(&self) -> &str {
        "ownership"
    }
}
