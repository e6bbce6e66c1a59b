//! Hierarchical catalog categories.
//!
//! A category stores its ancestry as a delimited id string (`path`): `"-"` for a
//! root, `"-1-4-"` for a category under 1 → 4. The full name is the ancestor
//! names followed by the category's own name, joined with
//! [`CATEGORY_NAME_DELIMITER`].

use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, Entity};

/// Separator between segments of a category full name (`"Phones-Android"`).
pub const CATEGORY_NAME_DELIMITER: char = '-';

const PATH_DELIMITER: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub is_directory: bool,
    pub level: u32,
    pub path: String,
}

impl Category {
    pub fn root(id: CategoryId, name: impl Into<String>, is_directory: bool) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
            is_directory,
            level: 0,
            path: PATH_DELIMITER.to_string(),
        }
    }

    /// Child of `parent`: one level deeper, parent id appended to the path.
    pub fn child_of(parent: &Category, id: CategoryId, name: impl Into<String>, is_directory: bool) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: Some(parent.id),
            is_directory,
            level: parent.level + 1,
            path: format!("{}{}{}", parent.path, parent.id, PATH_DELIMITER),
        }
    }

    /// Ancestor ids, root first. Unparseable segments are ignored.
    pub fn path_ids(&self) -> Vec<CategoryId> {
        self.path
            .split(PATH_DELIMITER)
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<CategoryId>().ok())
            .collect()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Full name given this category's ancestors (any order; sorted by level here).
    pub fn full_name<'a>(&self, ancestors: impl IntoIterator<Item = &'a Category>) -> String {
        let mut ancestors: Vec<&Category> = ancestors.into_iter().collect();
        ancestors.sort_by_key(|c| c.level);

        let mut full_name = String::new();
        for ancestor in ancestors {
            full_name.push_str(&ancestor.name);
            full_name.push(CATEGORY_NAME_DELIMITER);
        }
        full_name.push_str(&self.name);
        full_name
    }

    pub fn view<'a>(&self, ancestors: impl IntoIterator<Item = &'a Category>) -> CategoryView {
        CategoryView {
            id: self.id,
            name: self.name.clone(),
            path: self.path.clone(),
            full_name: self.full_name(ancestors),
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Category as carried on a resolved product aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub path: String,
    pub full_name: String,
}

impl CategoryView {
    /// Full name split into its segments.
    pub fn name_segments(&self) -> Vec<String> {
        self.full_name
            .split(CATEGORY_NAME_DELIMITER)
            .map(str::to_string)
            .collect()
    }
}
