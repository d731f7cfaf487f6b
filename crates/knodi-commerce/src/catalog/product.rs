//! Product snapshots and catalog record parsing.

use crate::catalog::category::{CatalogCategory, Category};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Image shown when a product has no usable image URL.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/300x200?text=No+Image";

/// A product as received from the catalog.
///
/// Immutable once constructed. The cart and favorites copy what they need
/// from it instead of holding on to a live record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL-friendly slug used by detail pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URLs, first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category the product is listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Product {
    /// Create a product with no images, slug or category.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: None,
            price,
            description: None,
            images: Vec::new(),
            category: None,
        }
    }

    /// Set the image URLs.
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// First non-blank image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        primary_image(&self.images)
    }

    /// Primary image or `placeholder`.
    pub fn display_image<'a>(&'a self, placeholder: &'a str) -> &'a str {
        display_image(&self.images, placeholder)
    }

    /// Validate a loose catalog record into a product priced in `currency`.
    ///
    /// The id and title are required. A record with a malformed category
    /// keeps the product and drops the category.
    pub fn from_catalog(record: CatalogProduct, currency: Currency) -> Result<Self, CommerceError> {
        let id = record
            .id
            .filter(|id| !id.is_blank())
            .ok_or_else(|| CommerceError::InvalidArgument("product id is missing".to_string()))?;

        let title = record
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CommerceError::InvalidArgument(format!("product {} has no title", id)))?;

        let price = match record.price {
            None => {
                return Err(CommerceError::InvalidPrice {
                    product: id.to_string(),
                    reason: "missing".to_string(),
                })
            }
            Some(p) if !p.is_finite() => {
                return Err(CommerceError::InvalidPrice {
                    product: id.to_string(),
                    reason: "not a finite number".to_string(),
                })
            }
            Some(p) if p < 0.0 => {
                return Err(CommerceError::InvalidPrice {
                    product: id.to_string(),
                    reason: format!("negative amount {}", p),
                })
            }
            Some(p) => Money::checked_from_decimal(p, currency).ok_or_else(|| {
                CommerceError::InvalidPrice {
                    product: id.to_string(),
                    reason: format!("amount {} is out of range", p),
                }
            })?,
        };

        let category = record
            .category
            .filter(|c| !c.is_null())
            .and_then(|c| match category_from_value(c) {
                Ok(category) => Some(category),
                Err(e) => {
                    tracing::debug!(product = %id, error = %e, "dropping malformed category");
                    None
                }
            });

        Ok(Self {
            id,
            title,
            slug: record.slug,
            price,
            description: record.description,
            images: record.images.unwrap_or_default(),
            category,
        })
    }
}

/// Product record as returned by the catalog API, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogProduct {
    pub id: Option<ProductId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    /// Kept loose so a category of the wrong shape drops only the category.
    pub category: Option<serde_json::Value>,
}

fn category_from_value(value: serde_json::Value) -> Result<Category, CommerceError> {
    let record: CatalogCategory = serde_json::from_value(value)?;
    Category::from_catalog(record)
}

/// First non-blank entry of `images`.
pub fn primary_image(images: &[String]) -> Option<&str> {
    images
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
}

/// The image to render for a list of image URLs, falling back to `placeholder`.
pub fn display_image<'a>(images: &'a [String], placeholder: &'a str) -> &'a str {
    primary_image(images).unwrap_or(placeholder)
}

/// Parse a single product record, as returned by a detail query.
pub fn parse_product(json: &str, currency: Currency) -> Result<Product, CommerceError> {
    let record: CatalogProduct = serde_json::from_str(json)?;
    Product::from_catalog(record, currency)
}

/// Parse a product listing.
///
/// Invalid records, including ones with wrongly typed fields, are logged and
/// skipped. Only malformed JSON or a top level that is not an array fails
/// the whole listing.
pub fn parse_products(json: &str, currency: Currency) -> Result<Vec<Product>, CommerceError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = records.len();

    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let parsed = serde_json::from_value::<CatalogProduct>(value)
                .map_err(CommerceError::from)
                .and_then(|record| Product::from_catalog(record, currency));
            match parsed {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping catalog product");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(total, parsed = products.len(), "parsed product listing");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
        {
            "id": 4,
            "title": "Handmade Fresh Table",
            "slug": "handmade-fresh-table",
            "price": 687,
            "description": "Andy shoes are designed to keeping in...",
            "category": {"id": 5, "name": "Others", "slug": "others"},
            "images": ["https://placeimg.com/640/480/any?r=0.9178516507833767"]
        },
        {
            "id": 9,
            "title": "Classic Cap",
            "price": 12.5,
            "images": []
        }
    ]"#;

    #[test]
    fn test_parse_products() {
        let products = parse_products(LISTING, Currency::USD).unwrap();
        assert_eq!(products.len(), 2);

        let table = &products[0];
        assert_eq!(table.id, ProductId::new("4"));
        assert_eq!(table.price, Money::new(68700, Currency::USD));
        assert_eq!(table.slug.as_deref(), Some("handmade-fresh-table"));
        assert_eq!(table.category.as_ref().map(|c| c.name.as_str()), Some("Others"));

        let cap = &products[1];
        assert_eq!(cap.price.amount_cents, 1250);
        assert!(cap.images.is_empty());
    }

    #[test]
    fn test_parse_products_skips_invalid_records() {
        let json = r#"[
            {"title": "No id", "price": 1},
            {"id": "", "title": "Blank id", "price": 1},
            {"id": 2, "price": 1},
            {"id": 3, "title": "No price"},
            {"id": 4, "title": "Negative", "price": -1},
            {"id": 5, "title": "Fine", "price": 3}
        ]"#;

        let products = parse_products(json, Currency::USD).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Fine");
    }

    #[test]
    fn test_missing_id_is_invalid_argument() {
        let record = CatalogProduct {
            title: Some("Nameless".to_string()),
            price: Some(10.0),
            ..Default::default()
        };

        let err = Product::from_catalog(record, Currency::USD).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidArgument(_)));
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let record = CatalogProduct {
            id: Some(ProductId::new("1")),
            title: Some("Broken".to_string()),
            price: Some(f64::NAN),
            ..Default::default()
        };

        let err = Product::from_catalog(record, Currency::USD).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice { .. }));
    }

    #[test]
    fn test_malformed_category_is_dropped() {
        let json = r#"{"id": 1, "title": "Mug", "price": 8, "category": {"name": "No id"}}"#;
        let product = parse_product(json, Currency::USD).unwrap();
        assert!(product.category.is_none());
    }

    #[test]
    fn test_category_of_wrong_shape_is_dropped() {
        let json = r#"[
            {"id": 1, "title": "Mug", "price": 8, "category": "Shoes"},
            {"id": 2, "title": "Cup", "price": 6, "category": [1, 2]},
            {"id": 3, "title": "Jug", "price": 9, "category": null}
        ]"#;

        let products = parse_products(json, Currency::USD).unwrap();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p.category.is_none()));
    }

    #[test]
    fn test_parse_products_skips_wrongly_typed_records() {
        let json = r#"[
            {"id": 1, "title": "Notebook", "price": 3},
            {"id": 2, "title": "Pencil", "price": "12.50"},
            {"id": 2.5, "title": "Eraser", "price": 1},
            {"id": 4, "title": "Ruler", "price": 2, "images": "ruler.png"},
            "not a record",
            {"id": 5, "title": "Stapler", "price": 4, "category": "Office"}
        ]"#;

        let products = parse_products(json, Currency::USD).unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn test_parse_products_rejects_malformed_json() {
        assert!(matches!(
            parse_products("[{\"id\": 1", Currency::USD),
            Err(CommerceError::Serialization(_))
        ));
        assert!(matches!(
            parse_products(r#"{"id": 1}"#, Currency::USD),
            Err(CommerceError::Serialization(_))
        ));
    }

    #[test]
    fn test_out_of_range_price_rejected() {
        let record = CatalogProduct {
            id: Some(ProductId::new("1")),
            title: Some("Yacht".to_string()),
            price: Some(1e20),
            ..Default::default()
        };

        let err = Product::from_catalog(record, Currency::USD).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice { .. }));

        let products =
            parse_products(r#"[{"id": 1, "title": "Yacht", "price": 1e20}]"#, Currency::USD)
                .unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_null_images_become_empty() {
        let json = r#"{"id": 1, "title": "Mug", "price": 8, "images": null}"#;
        let product = parse_product(json, Currency::USD).unwrap();
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_display_image_falls_back_to_placeholder() {
        let product = Product::new("1", "Mug", Money::new(800, Currency::USD));
        assert_eq!(
            product.display_image(DEFAULT_PLACEHOLDER_IMAGE),
            DEFAULT_PLACEHOLDER_IMAGE
        );

        let product = product.with_images(["", "https://i.imgur.com/mug.jpeg"]);
        assert_eq!(
            product.display_image(DEFAULT_PLACEHOLDER_IMAGE),
            "https://i.imgur.com/mug.jpeg"
        );
    }

    #[test]
    fn test_primary_image_skips_blank_entries() {
        let images = vec!["  ".to_string()];
        assert_eq!(primary_image(&images), None);
        assert_eq!(display_image(&images, "fallback.png"), "fallback.png");
    }
}
