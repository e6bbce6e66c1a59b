use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, DomainError, DomainResult, Entity, ProductId};

/// Product sub-type.
///
/// Crowdfunding and seckill products carry a matching
/// [`ProductExtension`](crate::ProductExtension); normal products carry none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Normal,
    Crowdfunding,
    Seckill,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Normal,
        ProductType::Crowdfunding,
        ProductType::Seckill,
    ];

    /// Stable identifier (also the serialized form).
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Normal => "normal",
            ProductType::Crowdfunding => "crowdfunding",
            ProductType::Seckill => "seckill",
        }
    }

    /// Human-readable label for listings and admin screens.
    pub fn label(self) -> &'static str {
        match self {
            ProductType::Normal => "Standard product",
            ProductType::Crowdfunding => "Crowdfunding product",
            ProductType::Seckill => "Flash-sale product",
        }
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown product type '{s}'")))
    }
}

/// Product record as persisted by catalog management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub title: String,
    pub long_title: String,
    /// May contain markup.
    pub description: String,
    /// Absolute URL or a path relative to the public storage root.
    pub image: String,
    pub on_sale: bool,
    pub rating: f64,
    pub sold_count: u32,
    pub review_count: u32,
    pub price: Decimal,
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Minimal on-sale product; remaining fields start empty/zero.
    pub fn new(id: ProductId, product_type: ProductType, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            product_type,
            title: title.into(),
            long_title: String::new(),
            description: String::new(),
            image: String::new(),
            on_sale: true,
            rating: 5.0,
            sold_count: 0,
            review_count: 0,
            price,
            category_id: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if !self.rating.is_finite() || self.rating < 0.0 {
            return Err(DomainError::validation("rating must be a non-negative number"));
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }

    pub fn image_url(&self, public_base_url: &str) -> String {
        image_url(&self.image, public_base_url)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Resolve a stored image reference to a public URL.
///
/// Absolute `http://` / `https://` references pass through unchanged; anything
/// else is treated as a path under `public_base_url`.
pub fn image_url(image: &str, public_base_url: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }
    format!(
        "{}/{}",
        public_base_url.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product() -> Product {
        Product::new(ProductId::new(1), ProductType::Normal, "iPhone", Decimal::new(99900, 2))
    }

    #[test]
    fn product_type_round_trips_through_str() {
        for t in ProductType::ALL {
            assert_eq!(t.as_str().parse::<ProductType>().unwrap(), t);
        }
    }

    #[test]
    fn product_type_rejects_unknown_value() {
        let err = "auction".parse::<ProductType>().unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn product_type_labels_are_distinct() {
        let labels: Vec<_> = ProductType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Standard product", "Crowdfunding product", "Flash-sale product"]);
    }

    #[test]
    fn product_type_serializes_lowercase() {
        let json = serde_json::to_value(ProductType::Crowdfunding).unwrap();
        assert_eq!(json, serde_json::json!("crowdfunding"));
    }

    #[test]
    fn absolute_image_urls_pass_through() {
        assert_eq!(
            image_url("https://cdn.example.com/a.png", "http://shop.test/storage"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            image_url("http://cdn.example.com/a.png", "http://shop.test/storage"),
            "http://cdn.example.com/a.png"
        );
    }

    #[test]
    fn relative_image_paths_resolve_against_base_url() {
        assert_eq!(
            image_url("images/a.png", "http://shop.test/storage/"),
            "http://shop.test/storage/images/a.png"
        );
        assert_eq!(
            image_url("/images/a.png", "http://shop.test/storage"),
            "http://shop.test/storage/images/a.png"
        );
    }

    #[test]
    fn image_url_method_uses_stored_reference() {
        let mut product = test_product();
        product.image = "p/1.jpg".to_string();
        assert_eq!(product.image_url("http://x.test"), "http://x.test/p/1.jpg");
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut product = test_product();
        product.title = "  ".to_string();
        assert!(matches!(product.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_negative_price_and_nan_rating() {
        let mut product = test_product();
        product.price = Decimal::new(-1, 0);
        assert!(product.validate().is_err());

        let mut product = test_product();
        product.rating = f64::NAN;
        assert!(product.validate().is_err());
    }

    #[test]
    fn validate_accepts_well_formed_product() {
        assert_eq!(test_product().validate(), Ok(()));
    }
}
