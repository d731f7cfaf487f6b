//! Cart pricing calculations.
//!
//! Totals are derived from the line items on every read and never stored.

use crate::cart::{CartLineItem, CartState};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Unit price times quantity for one line.
pub fn line_total(item: &CartLineItem) -> Money {
    item.line_total()
}

/// Sum of every line total.
pub fn cart_total(state: &CartState) -> Money {
    state.total()
}

/// Number of distinct products in the cart (the badge count).
pub fn item_count(state: &CartState) -> usize {
    state.item_count()
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Per-line breakdown, in cart order.
    pub line_items: Vec<LineItemPricing>,
    /// Distinct products.
    pub item_count: usize,
    /// Units across all lines.
    pub total_quantity: u64,
    /// Sum of line subtotals.
    pub grand_total: Money,
}

impl CartPricing {
    /// Build the breakdown for `state`.
    pub fn for_cart(state: &CartState) -> Self {
        let line_items = state
            .items()
            .iter()
            .map(|item| LineItemPricing {
                id: item.id.clone(),
                unit_price: item.price,
                quantity: item.quantity,
                subtotal: line_total(item),
            })
            .collect();

        Self {
            line_items,
            item_count: item_count(state),
            total_quantity: state.total_quantity(),
            grand_total: cart_total(state),
        }
    }

    /// Breakdown for one product.
    pub fn line(&self, id: &ProductId) -> Option<&LineItemPricing> {
        self.line_items.iter().find(|l| &l.id == id)
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product id.
    pub id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// unit_price * quantity.
    pub subtotal: Money,
}
