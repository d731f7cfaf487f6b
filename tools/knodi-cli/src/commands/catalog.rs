//! List the products in a catalog listing.

use anyhow::Result;
use knodi_commerce::prelude::*;
use serde::Serialize;

use super::CatalogArgs;
use crate::context::Context;

const COLUMNS: [usize; 4] = [6, 32, 10, 16];

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let products = parse_products(&ctx.read_file(&args.path)?, ctx.config.store.currency)?;
    let placeholder = ctx.config.store.placeholder_image.as_str();
    let listed = filter_by_title(&products, args.title.as_deref());

    if ctx.output.is_json() {
        let entries: Vec<CatalogEntry> = listed
            .iter()
            .map(|p| CatalogEntry::new(p, placeholder))
            .collect();
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header(&format!("Catalog ({} products)", listed.len()));
    if listed.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "TITLE", "PRICE", "CATEGORY"], &COLUMNS);
    for product in listed {
        let category = product
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        ctx.output.table_row(
            &[
                product.id.as_str(),
                product.title.as_str(),
                product.price.display().as_str(),
                category,
            ],
            &COLUMNS,
        );
        if ctx.output.is_verbose() {
            ctx.output.kv("image", product.display_image(placeholder));
        }
    }

    Ok(())
}

/// Products whose title contains `title`, case-insensitively.
pub fn filter_by_title<'a>(products: &'a [Product], title: Option<&str>) -> Vec<&'a Product> {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(needle) => {
            let needle = needle.to_lowercase();
            products
                .iter()
                .filter(|p| p.title.to_lowercase().contains(&needle))
                .collect()
        }
        None => products.iter().collect(),
    }
}

/// A product as listed, with the image that would be rendered.
#[derive(Debug, Serialize)]
pub struct CatalogEntry<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub display_price: String,
    pub display_image: &'a str,
}

impl<'a> CatalogEntry<'a> {
    pub fn new(product: &'a Product, placeholder: &'a str) -> Self {
        Self {
            product,
            display_price: product.price.display(),
            display_image: product.display_image(placeholder),
        }
    }
}
