use serde::{Deserialize, Serialize};

use storefront_core::{AddressId, InstallmentId, OrderId, UserId};

/// The authenticated user on whose behalf an action is checked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
}

impl Actor {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Entity kinds guarded by a policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[serde(rename = "user_address")]
    Address,
    Order,
    Installment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Address, EntityKind::Order, EntityKind::Installment];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Address => "user_address",
            EntityKind::Order => "order",
            EntityKind::Installment => "installment",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity instance presented for an authorization decision.
///
/// Only what policies need is exposed: the kind (to pick the policy) and the
/// owning user.
pub trait Resource {
    fn kind(&self) -> EntityKind;
    fn owner_id(&self) -> UserId;
}

/// Reference to a user address owned by `user_id`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AddressRef {
    pub id: AddressId,
    pub user_id: UserId,
}

/// Reference to an order placed by `user_id`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrderRef {
    pub id: OrderId,
    pub user_id: UserId,
}

/// Reference to an installment plan taken out by `user_id`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InstallmentRef {
    pub id: InstallmentId,
    pub user_id: UserId,
}

macro_rules! impl_resource {
    ($t:ty, $kind:expr) => {
        impl Resource for $t {
            fn kind(&self) -> EntityKind {
                $kind
            }

            fn owner_id(&self) -> UserId {
                self.user_id
            }
        }
    };
}

impl_resource!(AddressRef, EntityKind::Address);
impl_resource!(OrderRef, EntityKind::Order);
impl_resource!(InstallmentRef, EntityKind::Installment);
