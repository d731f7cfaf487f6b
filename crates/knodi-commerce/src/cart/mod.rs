//! Shopping cart module.
//!
//! Contains the cart state, its line items and the derived pricing views.

mod cart;
mod pricing;

pub use cart::{CartLineItem, CartState};
pub use pricing::{cart_total, item_count, line_total, CartPricing, LineItemPricing};
