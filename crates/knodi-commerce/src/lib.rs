//! Cart and favorites state for the Knodi storefront.
//!
//! This crate is the client-side state core of the storefront:
//!
//! - **Catalog**: typed product and category snapshots parsed from catalog records
//! - **Cart**: line items with add/increase/decrease/remove/clear and derived totals
//! - **Favorites**: a toggle set of product snapshots with price sort views
//! - **Store**: the tagged [`Action`] type, the pure [`reduce`] transition and
//!   the [`Store`] container that owns the committed state
//!
//! # Example
//!
//! ```rust
//! use knodi_commerce::prelude::*;
//!
//! let a = Product::new("1", "Notebook", Money::new(500, Currency::USD));
//! let b = Product::new("2", "Pencil", Money::new(700, Currency::USD));
//!
//! let cart = CartState::new(Currency::USD)
//!     .add_to_cart(&a)
//!     .add_to_cart(&b)
//!     .increase_quantity(&b.id);
//!
//! assert_eq!(cart_total(&cart).display(), "$19.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod store;

pub use error::CommerceError;
pub use ids::{CategoryId, ProductId};
pub use money::{Currency, Money};
pub use store::{reduce, Action, Store, StoreConfig, StoreState, SubscriptionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{CategoryId, ProductId};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        display_image, parse_categories, parse_product, parse_products, CatalogCategory,
        CatalogProduct, Category, Product, DEFAULT_PLACEHOLDER_IMAGE,
    };

    // Cart
    pub use crate::cart::{
        cart_total, item_count, line_total, CartLineItem, CartPricing, CartState,
        LineItemPricing,
    };

    // Favorites
    pub use crate::favorites::{favorite_count, is_favorite, FavoriteSet, FavoriteSort};

    // Store
    pub use crate::store::{reduce, Action, Store, StoreConfig, StoreState, SubscriptionId};
}
