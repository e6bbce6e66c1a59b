//! `storefront-auth`: entity-level authorization boundary.
//!
//! Maps each protected entity kind (address, order, installment) to the policy
//! that decides what an actor may do with it. The mapping is built once at
//! startup and passed to callers; nothing here is global.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod action;
pub mod authorize;
pub mod policy;
pub mod principal;
pub mod registry;

pub use action::Action;
pub use authorize::{AuthorizationExplanation, AuthzError, authorize, explain_authorization};
pub use policy::{OwnershipPolicy, Policy};
pub use principal::{Actor, AddressRef, EntityKind, InstallmentRef, OrderRef, Resource};
pub use registry::{PolicyRegistry, PolicyRegistryBuilder, default_registry};
