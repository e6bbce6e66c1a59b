use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId, PropertyId};

/// A name/value attribute of a product. Names may repeat (multi-valued attributes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub product_id: ProductId,
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(
        id: PropertyId,
        product_id: ProductId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id,
            product_id,
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Entity for Property {
    type Id = PropertyId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// All values recorded under one property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub name: String,
    pub values: Vec<String>,
}

/// Group properties by name.
///
/// Groups appear in order of each name's first occurrence; values keep source order.
pub fn group_properties<'a>(properties: impl IntoIterator<Item = &'a Property>) -> Vec<PropertyGroup> {
    let mut groups: Vec<PropertyGroup> = Vec::new();
    for property in properties {
        match groups.iter_mut().find(|g| g.name == property.name) {
            Some(group) => group.values.push(property.value.clone()),
            None => groups.push(PropertyGroup {
                name: property.name.clone(),
                values: vec![property.value.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(id: u64, name: &str, value: &str) -> Property {
        Property::new(PropertyId::new(id), ProductId::new(1), name, value)
    }

    #[test]
    fn groups_values_by_name_in_first_seen_order() {
        let props = vec![
            prop(1, "memory", "128GB"),
            prop(2, "color", "black"),
            prop(3, "memory", "256GB"),
        ];

        let groups = group_properties(&props);
        assert_eq!(
            groups,
            vec![
                PropertyGroup {
                    name: "memory".to_string(),
                    values: vec!["128GB".to_string(), "256GB".to_string()],
                },
                PropertyGroup {
                    name: "color".to_string(),
                    values: vec!["black".to_string()],
                },
            ]
        );
    }

    #[test]
    fn no_properties_yields_no_groups() {
        assert!(group_properties(&Vec::<Property>::new()).is_empty());
    }
}
