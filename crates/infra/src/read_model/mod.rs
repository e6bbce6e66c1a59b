//! Product read access: ordered batch lookup over eagerly resolved aggregates.

pub mod product_store;

pub use product_store::{
    InMemoryProductStore, ProductStore, StoreError, StoreResult, order_by_ids,
};
