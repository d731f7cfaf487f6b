//! Cart state and line items.
//!
//! Every operation takes the current state by reference and returns the
//! next one, so a caller can hold on to the previous value and compare.
//! No operation fails: acting on an id that is not in the cart returns an
//! unchanged copy.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One row in the cart: a product snapshot and how many of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product id; unique within a cart.
    pub id: ProductId,
    /// Title at the time the product was first added.
    pub title: String,
    /// Unit price at the time the product was first added.
    pub price: Money,
    /// Image URLs at the time the product was first added.
    pub images: Vec<String>,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Snapshot a product's display fields with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            images: product.images.clone(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// The shopping cart.
///
/// Line items keep the order in which products were first added.
///
/// Deserializing rejects carts with a repeated id, a zero quantity or a line
/// priced in another currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "CartRecord")]
pub struct CartState {
    items: Vec<CartLineItem>,
    currency: Currency,
}

/// Unchecked wire form of [`CartState`].
#[derive(Deserialize)]
struct CartRecord {
    items: Vec<CartLineItem>,
    currency: Currency,
}

impl TryFrom<CartRecord> for CartState {
    type Error = CommerceError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        record.check()?;
        Ok(Self {
            items: record.items,
            currency: record.currency,
        })
    }
}

impl CartRecord {
    fn check(&self) -> Result<(), CommerceError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(CommerceError::InvalidState(format!(
                    "product {} appears twice in the cart",
                    item.id
                )));
            }
            if item.quantity == 0 {
                return Err(CommerceError::InvalidState(format!(
                    "product {} has quantity 0",
                    item.id
                )));
            }
            if item.price.currency != self.currency {
                return Err(CommerceError::InvalidState(format!(
                    "product {} is priced in {}, cart is in {}",
                    item.id, item.price.currency, self.currency
                )));
            }
        }
        Ok(())
    }
}

impl CartState {
    /// An empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart gets its quantity bumped and keeps its
    /// position and original snapshot. A new product is appended.
    ///
    /// A product priced in a currency other than the cart's is not added:
    /// the call is a no-op that returns an unchanged copy and logs a warning.
    pub fn add_to_cart(&self, product: &Product) -> Self {
        if product.price.currency != self.currency {
            tracing::warn!(
                product = %product.id,
                price_currency = %product.price.currency,
                cart_currency = %self.currency,
                "ignoring product priced in another currency"
            );
            return self.clone();
        }

        if self.contains(&product.id) {
            return self.increase_quantity(&product.id);
        }

        let mut next = self.clone();
        next.items.push(CartLineItem::from_product(product));
        next
    }

    /// Add one to the quantity of `id`.
    pub fn increase_quantity(&self, id: &ProductId) -> Self {
        let mut next = self.clone();
        if let Some(item) = next.items.iter_mut().find(|i| &i.id == id) {
            item.quantity = item.quantity.saturating_add(1);
        }
        next
    }

    /// Take one off the quantity of `id`; the last one removes the line.
    pub fn decrease_quantity(&self, id: &ProductId) -> Self {
        match self.quantity_of(id) {
            Some(q) if q > 1 => {
                let mut next = self.clone();
                if let Some(item) = next.items.iter_mut().find(|i| &i.id == id) {
                    item.quantity = q - 1;
                }
                next
            }
            Some(_) => self.remove_from_cart(id),
            None => self.clone(),
        }
    }

    /// Drop the line for `id`.
    pub fn remove_from_cart(&self, id: &ProductId) -> Self {
        Self {
            items: self.items.iter().filter(|i| &i.id != id).cloned().collect(),
            currency: self.currency,
        }
    }

    /// Drop every line.
    pub fn clear_cart(&self) -> Self {
        Self::new(self.currency)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Currency all prices in this cart are expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Get the line for `id`.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Whether `id` has a line in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Quantity for `id`, if present.
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.get(id).map(|i| i.quantity)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        let lines: Vec<Money> = self.items.iter().map(CartLineItem::line_total).collect();
        Money::sum(lines.iter(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::new(cents, Currency::USD))
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartState::new(Currency::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero(Currency::USD));
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let p = product("1", 1000);
        let cart = CartState::new(Currency::USD).add_to_cart(&p).add_to_cart(&p);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.quantity_of(&p.id), Some(2));
        assert_eq!(cart.total().amount_cents, 2000);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let a = product("a", 100);
        let b = product("b", 200);
        let cart = CartState::new(Currency::USD)
            .add_to_cart(&a)
            .add_to_cart(&b)
            .add_to_cart(&a);

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let original = product("1", 1000);
        let repriced = Product::new("1", "Renamed", Money::new(5000, Currency::USD));

        let cart = CartState::new(Currency::USD)
            .add_to_cart(&original)
            .add_to_cart(&repriced);

        let line = cart.get(&original.id).unwrap();
        assert_eq!(line.title, "Product 1");
        assert_eq!(line.price.amount_cents, 1000);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_add_ignores_other_currency() {
        let euro = Product::new("1", "Croissant", Money::new(250, Currency::EUR));
        let cart = CartState::new(Currency::USD).add_to_cart(&euro);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_last_unit_removes_line() {
        let p = product("1", 1000);
        let cart = CartState::new(Currency::USD).add_to_cart(&p);
        let cart = cart.decrease_quantity(&p.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_above_one() {
        let p = product("1", 1000);
        let cart = CartState::new(Currency::USD)
            .add_to_cart(&p)
            .increase_quantity(&p.id)
            .increase_quantity(&p.id)
            .decrease_quantity(&p.id);
        assert_eq!(cart.quantity_of(&p.id), Some(2));
    }

    #[test]
    fn test_operations_on_absent_id_are_noops() {
        let p = product("1", 1000);
        let cart = CartState::new(Currency::USD).add_to_cart(&p);
        let missing = ProductId::new("404");

        assert_eq!(cart.increase_quantity(&missing), cart);
        assert_eq!(cart.decrease_quantity(&missing), cart);
        assert_eq!(cart.remove_from_cart(&missing), cart);
    }

    #[test]
    fn test_remove_item() {
        let a = product("a", 100);
        let b = product("b", 200);
        let cart = CartState::new(Currency::USD)
            .add_to_cart(&a)
            .add_to_cart(&b)
            .remove_from_cart(&a.id);

        assert_eq!(cart.item_count(), 1);
        assert!(!cart.contains(&a.id));
        assert!(cart.contains(&b.id));
    }

    #[test]
    fn test_clear_keeps_currency() {
        let p = Product::new("1", "Tea", Money::new(300, Currency::GBP));
        let cart = CartState::new(Currency::GBP).add_to_cart(&p).clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.currency(), Currency::GBP);
        assert_eq!(cart.total(), Money::zero(Currency::GBP));
    }

    #[test]
    fn test_quantity_saturates() {
        let p = product("1", 1);
        let mut cart = CartState::new(Currency::USD).add_to_cart(&p);
        cart.items[0].quantity = u32::MAX;
        let cart = cart.increase_quantity(&p.id);
        assert_eq!(cart.quantity_of(&p.id), Some(u32::MAX));
    }

    #[test]
    fn test_total_quantity_vs_item_count() {
        let a = product("a", 100);
        let b = product("b", 200);
        let cart = CartState::new(Currency::USD)
            .add_to_cart(&a)
            .add_to_cart(&a)
            .add_to_cart(&b);

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let cart = CartState::new(Currency::USD)
            .add_to_cart(&product("1", 500))
            .add_to_cart(&product("2", 700));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_ids() {
        let json = r#"{
            "currency": "USD",
            "items": [
                {"id": "1", "title": "A", "price": {"amount_cents": 100, "currency": "USD"}, "images": [], "quantity": 1},
                {"id": 1, "title": "A", "price": {"amount_cents": 100, "currency": "USD"}, "images": [], "quantity": 3}
            ]
        }"#;

        let err = serde_json::from_str::<CartState>(json).unwrap_err();
        assert!(err.to_string().contains("appears twice"));
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"{
            "currency": "USD",
            "items": [
                {"id": "1", "title": "A", "price": {"amount_cents": 100, "currency": "USD"}, "images": [], "quantity": 0}
            ]
        }"#;

        let err = serde_json::from_str::<CartState>(json).unwrap_err();
        assert!(err.to_string().contains("quantity 0"));
    }

    #[test]
    fn test_deserialize_rejects_foreign_currency_line() {
        let json = r#"{
            "currency": "USD",
            "items": [
                {"id": "1", "title": "A", "price": {"amount_cents": 100, "currency": "EUR"}, "images": [], "quantity": 1}
            ]
        }"#;

        assert!(serde_json::from_str::<CartState>(json).is_err());
    }
}
