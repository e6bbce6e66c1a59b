//! Configuration loading and representation.

use thiserror::Error;

use storefront_catalog::{Product, image_url};

pub const PUBLIC_URL_VAR: &str = "STOREFRONT_PUBLIC_URL";
pub const SEARCH_INDEX_VAR: &str = "STOREFRONT_SEARCH_INDEX";
pub const REINDEX_CHUNK_VAR: &str = "STOREFRONT_REINDEX_CHUNK";

const DEFAULT_PUBLIC_URL: &str = "http://localhost/storage";
const DEFAULT_SEARCH_INDEX: &str = "products";
const DEFAULT_REINDEX_CHUNK: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for image resolution and search indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Public base URL that relative image paths are resolved against.
    pub public_base_url: String,
    pub index_name: String,
    /// Products fetched and sent to the index per batch.
    pub reindex_chunk_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            public_base_url: DEFAULT_PUBLIC_URL.to_string(),
            index_name: DEFAULT_SEARCH_INDEX.to_string(),
            reindex_chunk_size: DEFAULT_REINDEX_CHUNK,
        }
    }
}

impl SearchConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (environment, test fixtures...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_base_url = lookup(PUBLIC_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("{PUBLIC_URL_VAR} not set; using {DEFAULT_PUBLIC_URL}");
                DEFAULT_PUBLIC_URL.to_string()
            });

        let index_name = lookup(SEARCH_INDEX_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SEARCH_INDEX.to_string());

        let reindex_chunk_size = match lookup(REINDEX_CHUNK_VAR) {
            None => DEFAULT_REINDEX_CHUNK,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: REINDEX_CHUNK_VAR,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: REINDEX_CHUNK_VAR,
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
        };

        Ok(Self {
            public_base_url,
            index_name,
            reindex_chunk_size,
        })
    }

    /// Public URL of a product's image under this configuration.
    pub fn image_url(&self, product: &Product) -> String {
        image_url(&product.image, &self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rust_decimal::Decimal;
    use storefront_catalog::ProductType;
    use storefront_core::ProductId;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = SearchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = SearchConfig::from_lookup(lookup(&[
            (PUBLIC_URL_VAR, "https://shop.example.com/storage"),
            (SEARCH_INDEX_VAR, "products_v2"),
            (REINDEX_CHUNK_VAR, " 25 "),
        ]))
        .unwrap();

        assert_eq!(config.public_base_url, "https://shop.example.com/storage");
        assert_eq!(config.index_name, "products_v2");
        assert_eq!(config.reindex_chunk_size, 25);
    }

    #[test]
    fn rejects_zero_or_garbage_chunk_size() {
        for bad in ["0", "many", "-3"] {
            let err = SearchConfig::from_lookup(lookup(&[(REINDEX_CHUNK_VAR, bad)])).unwrap_err();
            let ConfigError::Invalid { key, value, .. } = err;
            assert_eq!(key, REINDEX_CHUNK_VAR);
            assert_eq!(value, bad);
        }
    }

    #[test]
    fn resolves_product_images_against_base_url() {
        let config = SearchConfig::from_lookup(lookup(&[(PUBLIC_URL_VAR, "https://cdn.test/")])).unwrap();
        let mut product = Product::new(ProductId::new(1), ProductType::Normal, "Cup", Decimal::ONE);
        product.image = "images/cup.png".to_string();
        assert_eq!(config.image_url(&product), "https://cdn.test/images/cup.png");

        product.image = "https://elsewhere.test/cup.png".to_string();
        assert_eq!(config.image_url(&product), "https://elsewhere.test/cup.png");
    }
}
