//! Catalog domain module.
//!
//! Products, their SKUs, categories, properties and sub-type extensions,
//! modeled as plain records linked by explicit foreign keys. Derived values
//! (image URL, grouped properties, category full name) are pure functions.
//! No IO, no storage.

pub mod aggregate;
pub mod category;
pub mod extension;
pub mod product;
pub mod property;
pub mod sku;

pub use aggregate::{ProductAggregate, ensure_extension_matches};
pub use category::{CATEGORY_NAME_DELIMITER, Category, CategoryView};
pub use extension::{CrowdfundingInfo, CrowdfundingStatus, ProductExtension, SeckillInfo};
pub use product::{Product, ProductType, image_url};
pub use property::{Property, PropertyGroup, group_properties};
pub use sku::Sku;
