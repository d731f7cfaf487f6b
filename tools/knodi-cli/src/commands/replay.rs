//! Replay a recorded shopper session against a catalog listing.

use anyhow::Result;
use knodi_commerce::prelude::*;
use serde::Serialize;

use super::ReplayArgs;
use crate::context::Context;
use crate::output::{badge_text, Output};
use crate::session::{parse_steps, resolve_steps};

const CART_COLUMNS: [usize; 5] = [6, 28, 5, 10, 12];

/// Run the replay command.
pub fn run(args: ReplayArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.store.currency;
    let catalog = parse_products(&ctx.read_file(&args.catalog)?, currency)?;
    let steps = parse_steps(&ctx.read_file(&args.script)?)?;
    let actions = resolve_steps(&steps, &catalog)?;

    tracing::info!(
        products = catalog.len(),
        steps = actions.len(),
        "replaying session"
    );

    let mut store = Store::new(ctx.config.store.clone());

    if args.trace {
        let output = ctx.output.clone();
        store.subscribe(move |state| {
            output.kv(
                "state",
                &format!(
                    "cart={} favorites={} total={}",
                    state.cart.item_count(),
                    state.favorites.favorite_count(),
                    cart_total(&state.cart)
                ),
            );
        });
    }

    for (i, action) in actions.into_iter().enumerate() {
        if args.trace {
            ctx.output.info(&format!("[{}] {}", i + 1, action));
        }
        store.dispatch(action);
    }

    if ctx.output.is_json() {
        ctx.output.json(&ReplaySummary::new(&store, args.sort));
        return Ok(());
    }

    print_cart(&store, &ctx.output);
    print_favorites(&store, args.sort, &ctx.output);

    Ok(())
}

/// Machine-readable result of a replay.
#[derive(Debug, Serialize)]
pub struct ReplaySummary<'a> {
    pub cart: CartPricing,
    pub cart_total: String,
    pub favorites: Vec<&'a Product>,
    pub favorite_count: usize,
    pub sort: FavoriteSort,
}

impl<'a> ReplaySummary<'a> {
    pub fn new(store: &'a Store, sort: FavoriteSort) -> Self {
        Self {
            cart: store.pricing(),
            cart_total: store.cart_total().display(),
            favorites: store.sorted_favorites(sort),
            favorite_count: store.favorite_count(),
            sort,
        }
    }
}

fn print_cart(store: &Store, output: &Output) {
    output.header(&format!("Cart {}", badge_text(store.cart_badge())));

    if store.cart().is_empty() {
        output.info("Your cart is empty.");
        return;
    }

    output.table_row(&["ID", "TITLE", "QTY", "PRICE", "SUBTOTAL"], &CART_COLUMNS);
    for item in store.cart().items() {
        output.table_row(
            &[
                item.id.as_str(),
                item.title.as_str(),
                item.quantity.to_string().as_str(),
                item.price.display().as_str(),
                line_total(item).display().as_str(),
            ],
            &CART_COLUMNS,
        );
        if output.is_verbose() {
            output.kv("image", store.display_image(&item.images));
        }
    }

    output.kv("Total", &store.cart_total().display());
}

fn print_favorites(store: &Store, sort: FavoriteSort, output: &Output) {
    output.header(&format!("Favorites {}", badge_text(store.favorites_badge())));

    let favorites = store.sorted_favorites(sort);
    if favorites.is_empty() {
        output.info("No favorite products yet.");
        return;
    }

    if sort != FavoriteSort::Default {
        output.kv("Sorted", sort.display_name());
    }
    for product in favorites {
        let category = product
            .category
            .as_ref()
            .map(|c| format!(" ({})", c.name))
            .unwrap_or_default();
        output.list_item(&format!(
            "{} {}{}",
            product.price.display(),
            product.title,
            category
        ));
        if output.is_verbose() {
            output.kv("image", product.display_image(&store.config().placeholder_image));
        }
    }
}
