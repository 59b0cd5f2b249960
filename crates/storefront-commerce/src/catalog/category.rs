//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A top-level product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name. Products refer to their category by this name.
    pub name: String,
    /// Category description.
    #[serde(default)]
    pub description: String,
    /// Category image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Shown on the home page.
    #[serde(default)]
    pub featured: bool,
    /// Announced but not yet browsable.
    #[serde(default)]
    pub coming_soon: bool,
    /// Optional second level.
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// Check if the category can be browsed.
    pub fn is_browsable(&self) -> bool {
        !self.coming_soon
    }

    /// Case-insensitive name comparison, as used by category URLs.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A subcategory within a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subcategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults_from_json() {
        let json = r#"{"id": "3", "name": "Fashion", "comingSoon": true}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Fashion");
        assert!(!category.is_browsable());
        assert!(category.subcategories.is_empty());
        assert!(!category.featured);
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let json = r#"{"id": "4", "name": "Electronics"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert!(category.name_matches("electronics"));
        assert!(!category.name_matches("electronic"));
    }
}
