//! Projection implementations (search documents).
//!
//! Projections are pure: they read a fully resolved aggregate and build the
//! flattened shape an external index stores. They never load or mutate data.

pub mod markup;
pub mod search_document;

pub use markup::strip_tags;
pub use search_document::{
    DocumentCategory, ProductDocument, PropertyDocument, SkuDocument, project,
};
