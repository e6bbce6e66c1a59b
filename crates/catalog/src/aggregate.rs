//! Product aggregate: a product with its related records eagerly resolved.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

use crate::category::CategoryView;
use crate::extension::ProductExtension;
use crate::product::{Product, ProductType};
use crate::property::{Property, PropertyGroup, group_properties};
use crate::sku::Sku;

/// Fully materialized product. Nothing on it is loaded lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub product: Product,
    pub skus: Vec<Sku>,
    pub category: Option<CategoryView>,
    pub properties: Vec<Property>,
    pub extension: Option<ProductExtension>,
}

impl ProductAggregate {
    /// Aggregate with no related records.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            skus: Vec::new(),
            category: None,
            properties: Vec::new(),
            extension: None,
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id()
    }

    pub fn product_type(&self) -> ProductType {
        self.product.product_type
    }

    pub fn grouped_properties(&self) -> Vec<PropertyGroup> {
        group_properties(&self.properties)
    }

    /// Check that related records belong to this product and agree with its type.
    pub fn validate(&self) -> DomainResult<()> {
        let id = self.id();
        if self.skus.iter().any(|s| s.product_id != id) {
            return Err(DomainError::invariant("SKU belongs to another product"));
        }
        if self.properties.iter().any(|p| p.product_id != id) {
            return Err(DomainError::invariant("property belongs to another product"));
        }
        if let Some(category) = &self.category {
            if self.product.category_id != Some(category.id) {
                return Err(DomainError::invariant("category does not match product.category_id"));
            }
        }
        ensure_extension_matches(self.product.product_type, self.extension.as_ref())
    }
}

/// Normal products carry no extension; the others carry one of their own kind.
pub fn ensure_extension_matches(
    product_type: ProductType,
    extension: Option<&ProductExtension>,
) -> DomainResult<()> {
    match (product_type, extension) {
        (_, None) => Ok(()),
        (ProductType::Normal, Some(_)) => Err(DomainError::invariant(
            "normal products cannot carry an extension",
        )),
        (t, Some(ext)) if ext.product_type() == t => Ok(()),
        (t, Some(ext)) => Err(DomainError::invariant(format!(
            "{} extension cannot be attached to a {} product",
            ext.product_type(),
            t
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use storefront_core::{CategoryId, PropertyId, SkuId};

    use crate::extension::SeckillInfo;

    fn test_aggregate(product_type: ProductType) -> ProductAggregate {
        let product = Product::new(ProductId::new(1), product_type, "Phone", Decimal::new(100, 0));
        ProductAggregate::new(product)
    }

    fn seckill() -> ProductExtension {
        ProductExtension::Seckill(SeckillInfo {
            start_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        })
    }

    #[test]
    fn bare_aggregate_is_valid() {
        assert_eq!(test_aggregate(ProductType::Normal).validate(), Ok(()));
    }

    #[test]
    fn rejects_foreign_sku() {
        let mut agg = test_aggregate(ProductType::Normal);
        agg.skus.push(Sku::new(SkuId::new(1), ProductId::new(2), "64GB", "", Decimal::ONE));
        assert!(matches!(agg.validate(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn rejects_mismatched_category() {
        let mut agg = test_aggregate(ProductType::Normal);
        agg.category = Some(CategoryView {
            id: CategoryId::new(5),
            name: "Phones".to_string(),
            path: "-".to_string(),
            full_name: "Phones".to_string(),
        });
        assert!(agg.validate().is_err());

        agg.product.category_id = Some(CategoryId::new(5));
        assert_eq!(agg.validate(), Ok(()));
    }

    #[test]
    fn extension_must_match_type() {
        let mut agg = test_aggregate(ProductType::Seckill);
        agg.extension = Some(seckill());
        assert_eq!(agg.validate(), Ok(()));

        let mut agg = test_aggregate(ProductType::Crowdfunding);
        agg.extension = Some(seckill());
        assert!(agg.validate().is_err());

        let mut agg = test_aggregate(ProductType::Normal);
        agg.extension = Some(seckill());
        assert!(agg.validate().is_err());
    }

    #[test]
    fn grouped_properties_reads_from_aggregate() {
        let mut agg = test_aggregate(ProductType::Normal);
        agg.properties = vec![
            Property::new(PropertyId::new(1), ProductId::new(1), "color", "red"),
            Property::new(PropertyId::new(2), ProductId::new(1), "color", "blue"),
        ];
        let groups = agg.grouped_properties();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].values, vec!["red", "blue"]);
    }
}
