//! Infrastructure layer: product store, search-document projection, indexing, config.

pub mod config;
pub mod indexer;
pub mod projections;
pub mod read_model;


pub use config::{ConfigError, SearchConfig};
pub use indexer::{
    InMemorySearchIndex, IndexError, ReindexReport, Reindexer, SearchIndexSink, SinkError,
};
pub use projections::{ProductDocument, project};
pub use read_model::{InMemoryProductStore, ProductStore, StoreError, StoreResult};
