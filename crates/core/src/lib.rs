//! `storefront-core`: catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    AddressId, CategoryId, InstallmentId, OrderId, ProductId, PropertyId, SkuId, UserId,
};
