//! Category records.

use crate::error::CommerceError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category as shown alongside products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Category image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Category {
    /// Create a category with just an id and a name.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: None,
            image: None,
        }
    }

    /// Validate a loose catalog record.
    pub fn from_catalog(record: CatalogCategory) -> Result<Self, CommerceError> {
        let id = record
            .id
            .filter(|id| !id.is_blank())
            .ok_or_else(|| CommerceError::InvalidArgument("category id is missing".to_string()))?;

        let name = record
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| {
                CommerceError::InvalidArgument(format!("category {} has no name", id))
            })?;

        Ok(Self {
            id,
            name,
            slug: record.slug,
            image: record.image,
        })
    }
}

/// Category record as returned by the catalog API, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogCategory {
    pub id: Option<CategoryId>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
}

/// Parse a category listing.
///
/// Records without an id or name, or with wrongly typed fields, are skipped
/// so the rest of the listing stays usable.
pub fn parse_categories(json: &str) -> Result<Vec<Category>, CommerceError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = records.len();

    let categories: Vec<Category> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let parsed = serde_json::from_value::<CatalogCategory>(value)
                .map_err(CommerceError::from)
                .and_then(Category::from_catalog);
            match parsed {
                Ok(category) => Some(category),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping catalog category");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(total, parsed = categories.len(), "parsed category listing");
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories() {
        let json = r#"[
            {"id": 1, "name": "Clothes", "slug": "clothes", "image": "https://i.imgur.com/a.jpeg"},
            {"id": 2, "name": "Electronics"}
        ]"#;

        let categories = parse_categories(json).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id.as_str(), "1");
        assert_eq!(categories[0].slug.as_deref(), Some("clothes"));
        assert_eq!(categories[1].image, None);
    }

    #[test]
    fn test_parse_categories_skips_invalid() {
        let json = r#"[{"name": "No id"}, {"id": 3, "name": ""}, {"id": 4, "name": "Shoes"}]"#;

        let categories = parse_categories(json).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Shoes");
    }

    #[test]
    fn test_parse_categories_skips_wrongly_typed_records() {
        let json = r#"[
            {"id": 1.5, "name": "Fractional"},
            {"id": 2, "name": ["Toys"]},
            "Furniture",
            {"id": 5, "name": "Garden"}
        ]"#;

        let categories = parse_categories(json).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id.as_str(), "5");
    }

    #[test]
    fn test_parse_categories_rejects_malformed_json() {
        let result = parse_categories("{\"id\": 1");
        assert!(matches!(result, Err(CommerceError::Serialization(_))));
    }
}
