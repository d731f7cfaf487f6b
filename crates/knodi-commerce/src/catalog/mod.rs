//! Catalog records.
//!
//! Typed product and category snapshots, plus the parsers that turn the
//! catalog API's loose JSON records into them.

mod category;
mod product;

pub use category::{parse_categories, CatalogCategory, Category};
pub use product::{
    display_image, parse_product, parse_products, primary_image, CatalogProduct, Product,
    DEFAULT_PLACEHOLDER_IMAGE,
};
