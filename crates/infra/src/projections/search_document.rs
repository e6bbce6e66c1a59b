use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use storefront_catalog::{ProductAggregate, ProductType, Property, Sku};
use storefront_core::{CategoryId, ProductId};

use crate::projections::markup::strip_tags;

/// Search-index document for one product.
///
/// Field names and shapes are the wire contract with the index; renaming or
/// retyping a field breaks documents that are already indexed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDocument {
    pub id: ProductId,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub title: String,
    pub category_id: Option<CategoryId>,
    pub long_title: String,
    pub on_sale: bool,
    pub rating: f64,
    pub sold_count: u32,
    pub review_count: u32,
    pub price: Decimal,
    pub category: DocumentCategory,
    pub category_path: String,
    pub description: String,
    pub skus: Vec<SkuDocument>,
    pub properties: Vec<PropertyDocument>,
}

/// `category` field: full-name segments, or an empty string when the product
/// has no category.
///
/// The empty string (rather than an empty list) is what existing indexed
/// documents contain, so it is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentCategory {
    Segments(Vec<String>),
    Absent,
}

impl Serialize for DocumentCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocumentCategory::Segments(segments) => segments.serialize(serializer),
            DocumentCategory::Absent => serializer.serialize_str(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuDocument {
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

impl From<&Sku> for SkuDocument {
    fn from(sku: &Sku) -> Self {
        Self {
            title: sku.title.clone(),
            description: sku.description.clone(),
            price: sku.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDocument {
    pub name: String,
    pub value: String,
    /// `name:value`, for exact-match filtering on a single field.
    pub search_value: String,
}

impl From<&Property> for PropertyDocument {
    fn from(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            value: property.value.clone(),
            search_value: format!("{}:{}", property.name, property.value),
        }
    }
}

/// Flatten one product aggregate into its search document. Pure.
pub fn project(aggregate: &ProductAggregate) -> ProductDocument {
    let product = &aggregate.product;

    let (category, category_path) = match &aggregate.category {
        Some(view) => (DocumentCategory::Segments(view.name_segments()), view.path.clone()),
        None => (DocumentCategory::Absent, String::new()),
    };

    ProductDocument {
        id: product.id,
        product_type: product.product_type,
        title: product.title.clone(),
        category_id: product.category_id,
        long_title: product.long_title.clone(),
        on_sale: product.on_sale,
        rating: product.rating,
        sold_count: product.sold_count,
        review_count: product.review_count,
        price: product.price,
        category,
        category_path,
        description: strip_tags(&product.description),
        skus: aggregate.skus.iter().map(SkuDocument::from).collect(),
        properties: aggregate.properties.iter().map(PropertyDocument::from).collect(),
    }
}

impl From<&ProductAggregate> for ProductDocument {
    fn from(aggregate: &ProductAggregate) -> Self {
        project(aggregate)
    }
}

impl ProductDocument {
    /// The document as a JSON object, ready for an index client.
    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_catalog::{CategoryView, Product};
    use storefront_core::{PropertyId, SkuId};

    const FIELDS: [&str; 15] = [
        "id",
        "type",
        "title",
        "category_id",
        "long_title",
        "on_sale",
        "rating",
        "sold_count",
        "review_count",
        "price",
        "category",
        "category_path",
        "description",
        "skus",
        "properties",
    ];

    fn test_aggregate() -> ProductAggregate {
        let mut product = Product::new(
            ProductId::new(1),
            ProductType::Crowdfunding,
            "Phone X",
            Decimal::new(99900, 2),
        );
        product.long_title = "Phone X 5G dual sim".to_string();
        product.description = "<b>Great</b> phone".to_string();
        product.rating = 4.5;
        product.sold_count = 12;
        product.review_count = 3;
        ProductAggregate::new(product)
    }

    fn with_category(mut agg: ProductAggregate) -> ProductAggregate {
        agg.product.category_id = Some(CategoryId::new(4));
        agg.category = Some(CategoryView {
            id: CategoryId::new(4),
            name: "Phones".to_string(),
            path: "-1-".to_string(),
            full_name: "Electronics-Phones".to_string(),
        });
        agg
    }

    #[test]
    fn document_has_exactly_the_indexed_fields() {
        let json = project(&test_aggregate()).to_json().unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected = FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn missing_category_uses_empty_strings() {
        let doc = project(&test_aggregate());
        assert_eq!(doc.category, DocumentCategory::Absent);

        let json = doc.to_json().unwrap();
        assert_eq!(json["category"], json!(""));
        assert_eq!(json["category_path"], json!(""));
        assert_eq!(json["category_id"], JsonValue::Null);
    }

    #[test]
    fn category_full_name_is_split_into_segments() {
        let json = project(&with_category(test_aggregate())).to_json().unwrap();
        assert_eq!(json["category"], json!(["Electronics", "Phones"]));
        assert_eq!(json["category_path"], json!("-1-"));
        assert_eq!(json["category_id"], json!(4));
    }

    #[test]
    fn description_is_plain_text() {
        let doc = project(&test_aggregate());
        assert_eq!(doc.description, "Great phone");
    }

    #[test]
    fn scalar_fields_are_copied() {
        let json = project(&test_aggregate()).to_json().unwrap();
        assert_eq!(json["id"], json!(1));
        assert_eq!(json["type"], json!("crowdfunding"));
        assert_eq!(json["title"], json!("Phone X"));
        assert_eq!(json["long_title"], json!("Phone X 5G dual sim"));
        assert_eq!(json["on_sale"], json!(true));
        assert_eq!(json["rating"], json!(4.5));
        assert_eq!(json["sold_count"], json!(12));
        assert_eq!(json["review_count"], json!(3));
        assert_eq!(json["price"], json!("999.00"));
    }

    #[test]
    fn skus_keep_only_title_description_price() {
        let mut agg = test_aggregate();
        agg.skus.push(
            Sku::new(SkuId::new(77), ProductId::new(1), "128GB", "base model", Decimal::new(99900, 2))
                .with_stock(5),
        );

        let json = project(&agg).to_json().unwrap();
        assert_eq!(
            json["skus"],
            json!([{ "title": "128GB", "description": "base model", "price": "999.00" }])
        );
    }

    #[test]
    fn properties_carry_search_value() {
        let mut agg = test_aggregate();
        agg.properties = vec![
            Property::new(PropertyId::new(1), ProductId::new(1), "color", "red"),
            Property::new(PropertyId::new(2), ProductId::new(1), "color", "blue"),
        ];

        let doc = project(&agg);
        let search_values: Vec<&str> = doc.properties.iter().map(|p| p.search_value.as_str()).collect();
        assert_eq!(search_values, vec!["color:red", "color:blue"]);

        let json = doc.to_json().unwrap();
        assert_eq!(
            json["properties"][0],
            json!({ "name": "color", "value": "red", "search_value": "color:red" })
        );
    }

    #[test]
    fn no_skus_or_properties_yield_empty_lists() {
        let json = project(&test_aggregate()).to_json().unwrap();
        assert_eq!(json["skus"], json!([]));
        assert_eq!(json["properties"], json!([]));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn search_value_joins_name_and_value(name in "[a-z]{1,12}", value in "[a-zA-Z0-9 ]{0,16}") {
                let mut agg = test_aggregate();
                agg.properties = vec![Property::new(PropertyId::new(1), ProductId::new(1), name.clone(), value.clone())];
                let doc = project(&agg);
                prop_assert_eq!(&doc.properties[0].search_value, &format!("{name}:{value}"));
            }

            #[test]
            fn projection_never_leaves_tags_in_description(text in "[a-z ]{0,20}", tag in "[a-z]{1,6}") {
                let mut agg = test_aggregate();
                agg.product.description = format!("<{tag}>{text}</{tag}>");
                prop_assert_eq!(project(&agg).description, text);
            }
        }
    }
}
