use std::collections::HashMap;
use std::sync::Arc;

use crate::{Action, EntityKind, OwnershipPolicy, Policy};

/// Entity kind → policy mapping.
///
/// Built once at startup and handed to whatever needs to authorize (dependency
/// injection); cloning shares the underlying policies.
#[derive(Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<EntityKind, Arc<dyn Policy>>,
}

impl PolicyRegistry {
    pub fn builder() -> PolicyRegistryBuilder {
        PolicyRegistryBuilder::default()
    }

    pub fn policy_for(&self, kind: EntityKind) -> Option<&dyn Policy> {
        self.policies.get(&kind).map(|p| &**p)
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        self.policies.contains_key(&kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds: Vec<EntityKind> = self.policies.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl core::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for kind in self.kinds() {
            if let Some(policy) = self.policy_for(kind) {
                map.entry(&kind.as_str(), &policy.name());
            }
        }
        map.finish()
    }
}

#[derive(Default)]
pub struct PolicyRegistryBuilder {
    policies: HashMap<EntityKind, Arc<dyn Policy>>,
}

impl PolicyRegistryBuilder {
    /// Register `policy` for `kind`. A later registration for the same kind replaces the earlier one.
    pub fn register<P>(mut self, kind: EntityKind, policy: P) -> Self
    where
        P: Policy + 'static,
    {
        self.policies.insert(kind, Arc::new(policy));
        self
    }

    pub fn register_shared(mut self, kind: EntityKind, policy: Arc<dyn Policy>) -> Self {
        self.policies.insert(kind, policy);
        self
    }

    pub fn build(self) -> PolicyRegistry {
        PolicyRegistry {
            policies: self.policies,
        }
    }
}

/// Registry with the storefront's standard mapping: addresses, orders and
/// installments are each guarded by an ownership policy for the `own` action.
pub fn default_registry() -> PolicyRegistry {
    let ownership: Arc<dyn Policy> = Arc::new(OwnershipPolicy::new([Action::OWN]));
    EntityKind::ALL
        .into_iter()
        .fold(PolicyRegistry::builder(), |builder, kind| {
            builder.register_shared(kind, ownership.clone())
        })
        .build()
}
