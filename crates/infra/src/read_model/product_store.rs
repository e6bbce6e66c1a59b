use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use storefront_catalog::{
    Category, CategoryView, Product, ProductAggregate, ProductExtension, Property, Sku,
    ensure_extension_matches,
};
use storefront_core::{CategoryId, DomainError, Entity, ProductId, PropertyId, SkuId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} {id} referenced by {referrer} does not exist")]
    MissingReference {
        entity: &'static str,
        id: u64,
        referrer: String,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("product store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to product aggregates.
///
/// Every aggregate handed out is fully resolved (SKUs, category, properties,
/// extension); callers never trigger further loading.
pub trait ProductStore: Send + Sync {
    /// Aggregates for `ids`, in the order the ids were given.
    ///
    /// Unknown ids are skipped, so the result may be shorter than the input.
    /// A repeated id yields a single aggregate at its first position.
    fn find_by_ids(&self, ids: &[ProductId]) -> StoreResult<Vec<ProductAggregate>>;

    fn get(&self, id: ProductId) -> StoreResult<Option<ProductAggregate>>;

    /// All product ids, ascending.
    fn list_ids(&self) -> StoreResult<Vec<ProductId>>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn find_by_ids(&self, ids: &[ProductId]) -> StoreResult<Vec<ProductAggregate>> {
        (**self).find_by_ids(ids)
    }

    fn get(&self, id: ProductId) -> StoreResult<Option<ProductAggregate>> {
        (**self).get(id)
    }

    fn list_ids(&self) -> StoreResult<Vec<ProductId>> {
        (**self).list_ids()
    }
}

/// Reorder `items` to follow the position of their key in `ids`.
///
/// Items whose key is absent from `ids` are dropped. For repeated ids the first
/// occurrence decides the position.
pub fn order_by_ids<T, K, F>(ids: &[K], items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut position: HashMap<&K, usize> = HashMap::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        position.entry(id).or_insert(i);
    }

    let mut ranked: Vec<(usize, T)> = items
        .into_iter()
        .filter_map(|item| position.get(&key(&item)).map(|&pos| (pos, item)))
        .collect();
    ranked.sort_by_key(|(pos, _)| *pos);
    ranked.into_iter().map(|(_, item)| item).collect()
}

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    skus: BTreeMap<SkuId, Sku>,
    properties: BTreeMap<PropertyId, Property>,
    categories: HashMap<CategoryId, Category>,
    extensions: HashMap<ProductId, ProductExtension>,
    skus_by_product: HashMap<ProductId, BTreeSet<SkuId>>,
    properties_by_product: HashMap<ProductId, BTreeSet<PropertyId>>,
}

impl Tables {
    fn category_view(&self, id: CategoryId) -> Option<CategoryView> {
        let category = self.categories.get(&id)?;
        let ancestors: Vec<&Category> = category
            .path_ids()
            .into_iter()
            .filter_map(|ancestor| self.categories.get(&ancestor))
            .collect();
        Some(category.view(ancestors))
    }

    fn resolve(&self, product: &Product) -> ProductAggregate {
        let id = product.id();
        ProductAggregate {
            product: product.clone(),
            skus: self
                .skus_by_product
                .get(&id)
                .into_iter()
                .flatten()
                .filter_map(|sku_id| self.skus.get(sku_id))
                .cloned()
                .collect(),
            category: product.category_id.and_then(|c| self.category_view(c)),
            properties: self
                .properties_by_product
                .get(&id)
                .into_iter()
                .flatten()
                .filter_map(|property_id| self.properties.get(property_id))
                .cloned()
                .collect(),
            extension: self.extensions.get(&id).cloned(),
        }
    }

    fn ensure_category(&self, id: CategoryId, referrer: impl Into<String>) -> StoreResult<()> {
        if self.categories.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::MissingReference {
                entity: "category",
                id: id.get(),
                referrer: referrer.into(),
            })
        }
    }

    fn put_sku(&mut self, sku: Sku) {
        if let Some(previous) = self.skus.get(&sku.id) {
            if let Some(ids) = self.skus_by_product.get_mut(&previous.product_id) {
                ids.remove(&sku.id);
            }
        }
        self.skus_by_product
            .entry(sku.product_id)
            .or_default()
            .insert(sku.id);
        self.skus.insert(sku.id(), sku);
    }

    fn put_property(&mut self, property: Property) {
        if let Some(previous) = self.properties.get(&property.id) {
            if let Some(ids) = self.properties_by_product.get_mut(&previous.product_id) {
                ids.remove(&property.id);
            }
        }
        self.properties_by_product
            .entry(property.product_id)
            .or_default()
            .insert(property.id);
        self.properties.insert(property.id(), property);
    }

    /// Drop every SKU, property and extension owned by `id`.
    fn clear_related(&mut self, id: ProductId) {
        for sku_id in self.skus_by_product.remove(&id).unwrap_or_default() {
            self.skus.remove(&sku_id);
        }
        for property_id in self.properties_by_product.remove(&id).unwrap_or_default() {
            self.properties.remove(&property_id);
        }
        self.extensions.remove(&id);
    }

    fn ensure_product(&self, id: ProductId, referrer: impl Into<String>) -> StoreResult<()> {
        if self.products.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::MissingReference {
                entity: "product",
                id: id.get(),
                referrer: referrer.into(),
            })
        }
    }
}

/// In-memory product store for tests/dev.
///
/// Loading goes through the `insert_*` methods, which check references the way
/// foreign keys would. Inserting an existing id replaces the record.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Tables>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    pub fn insert_category(&self, category: Category) -> StoreResult<()> {
        let mut tables = self.write()?;
        if let Some(parent) = category.parent_id {
            if !tables.categories.contains_key(&parent) {
                return Err(StoreError::MissingReference {
                    entity: "category",
                    id: parent.get(),
                    referrer: format!("category {}", category.id),
                });
            }
        }
        tables.categories.insert(category.id(), category);
        Ok(())
    }

    pub fn insert_product(&self, product: Product) -> StoreResult<()> {
        product.validate()?;
        let mut tables = self.write()?;
        if let Some(category) = product.category_id {
            tables.ensure_category(category, format!("product {}", product.id))?;
        }
        ensure_extension_matches(product.product_type, tables.extensions.get(&product.id))?;
        tables.products.insert(product.id(), product);
        Ok(())
    }

    pub fn insert_sku(&self, sku: Sku) -> StoreResult<()> {
        sku.validate()?;
        let mut tables = self.write()?;
        tables.ensure_product(sku.product_id, format!("sku {}", sku.id))?;
        tables.put_sku(sku);
        Ok(())
    }

    pub fn insert_property(&self, property: Property) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables.ensure_product(property.product_id, format!("property {}", property.id))?;
        tables.put_property(property);
        Ok(())
    }

    /// Attach the crowdfunding/seckill record of a product; its kind must match the product type.
    pub fn attach_extension(&self, product_id: ProductId, extension: ProductExtension) -> StoreResult<()> {
        let mut tables = self.write()?;
        let product_type = match tables.products.get(&product_id) {
            Some(p) => p.product_type,
            None => {
                return Err(StoreError::MissingReference {
                    entity: "product",
                    id: product_id.get(),
                    referrer: "extension".to_string(),
                });
            }
        };
        ensure_extension_matches(product_type, Some(&extension))?;
        tables.extensions.insert(product_id, extension);
        Ok(())
    }

    /// Load a whole aggregate, replacing the product and everything related to it.
    ///
    /// All records are validated before the store is touched; on error nothing
    /// is written. SKUs, properties and the extension of a previously loaded
    /// version that are absent from `aggregate` are removed.
    pub fn insert_aggregate(&self, aggregate: ProductAggregate) -> StoreResult<()> {
        aggregate.validate()?;
        aggregate.product.validate()?;
        for sku in &aggregate.skus {
            sku.validate()?;
        }

        let ProductAggregate {
            product,
            skus,
            properties,
            extension,
            ..
        } = aggregate;
        let id = product.id();

        let mut tables = self.write()?;
        if let Some(category) = product.category_id {
            tables.ensure_category(category, format!("product {id}"))?;
        }

        tables.clear_related(id);
        tables.products.insert(id, product);
        for sku in skus {
            tables.put_sku(sku);
        }
        for property in properties {
            tables.put_property(property);
        }
        if let Some(extension) = extension {
            tables.extensions.insert(id, extension);
        }
        Ok(())
    }
}

impl ProductStore for InMemoryProductStore {
    fn find_by_ids(&self, ids: &[ProductId]) -> StoreResult<Vec<ProductAggregate>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let tables = self.read()?;
        let wanted: HashSet<&ProductId> = ids.iter().collect();
        let found: Vec<ProductAggregate> = tables
            .products
            .values()
            .filter(|p| wanted.contains(&p.id))
            .map(|p| tables.resolve(p))
            .collect();

        let missing = wanted.len() - found.len();
        if missing > 0 {
            tracing::debug!(requested = wanted.len(), missing, "skipping unknown product ids");
        }

        Ok(order_by_ids(ids, found, |a| a.id()))
    }

    fn get(&self, id: ProductId) -> StoreResult<Option<ProductAggregate>> {
        let tables = self.read()?;
        Ok(tables.products.get(&id).map(|p| tables.resolve(p)))
    }

    fn list_ids(&self) -> StoreResult<Vec<ProductId>> {
        let tables = self.read()?;
        Ok(tables.products.keys().copied().collect())
    }
}
