use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, SkuId};

/// A purchasable variant of a product. Owned by exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub id: SkuId,
    pub product_id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
}

impl Sku {
    pub fn new(
        id: SkuId,
        product_id: ProductId,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            product_id,
            title: title.into(),
            description: description.into(),
            price,
            stock: 0,
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("SKU title cannot be empty"));
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::validation("SKU price cannot be negative"));
        }
        Ok(())
    }
}

impl Entity for Sku {
    type Id = SkuId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
