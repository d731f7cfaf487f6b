//! Recorded shopper sessions.
//!
//! A session script is a JSON array of steps. Steps that need a full
//! product snapshot name it by id and are resolved against a catalog
//! listing; the rest carry the id straight through.
//!
//! ```json
//! [
//!   {"type": "ADD_TO_CART", "product": 1},
//!   {"type": "INCREASE_QTY", "product": 1},
//!   {"type": "TOGGLE_FAVORITE", "product": 3},
//!   {"type": "CLEAR_CART"}
//! ]
//! ```

use anyhow::{anyhow, Context, Result};
use knodi_commerce::prelude::*;
use serde::{Deserialize, Serialize};

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    AddToCart { product: ProductId },
    #[serde(rename = "INCREASE_QTY")]
    IncreaseQuantity { product: ProductId },
    #[serde(rename = "DECREASE_QTY")]
    DecreaseQuantity { product: ProductId },
    RemoveFromCart { product: ProductId },
    ClearCart,
    ToggleFavorite { product: ProductId },
    ClearFavorites,
}

impl Step {
    /// Turn the step into an action, looking up snapshots in `catalog`.
    pub fn resolve(&self, catalog: &[Product]) -> Result<Action> {
        let lookup = |id: &ProductId| {
            catalog
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("Product {} is not in the catalog", id))
        };

        Ok(match self {
            Step::AddToCart { product } => Action::AddToCart(lookup(product)?),
            Step::IncreaseQuantity { product } => Action::IncreaseQuantity(product.clone()),
            Step::DecreaseQuantity { product } => Action::DecreaseQuantity(product.clone()),
            Step::RemoveFromCart { product } => Action::RemoveFromCart(product.clone()),
            Step::ClearCart => Action::ClearCart,
            Step::ToggleFavorite { product } => Action::ToggleFavorite(lookup(product)?),
            Step::ClearFavorites => Action::ClearFavorites,
        })
    }
}

/// Parse a session script.
pub fn parse_steps(json: &str) -> Result<Vec<Step>> {
    serde_json::from_str(json).context("Invalid session script")
}

/// Resolve every step, failing on the first unknown product.
pub fn resolve_steps(steps: &[Step], catalog: &[Product]) -> Result<Vec<Action>> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| step.resolve(catalog).with_context(|| format!("Step {}", i + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Notebook", Money::new(500, Currency::USD)),
            Product::new("2", "Pencil", Money::new(700, Currency::USD)),
        ]
    }

    #[test]
    fn test_parse_and_resolve() {
        let steps = parse_steps(
            r#"[
                {"type": "ADD_TO_CART", "product": 1},
                {"type": "ADD_TO_CART", "product": "2"},
                {"type": "INCREASE_QTY", "product": 2},
                {"type": "TOGGLE_FAVORITE", "product": 1},
                {"type": "CLEAR_FAVORITES"}
            ]"#,
        )
        .unwrap();

        let actions = resolve_steps(&steps, &catalog()).unwrap();
        assert_eq!(actions.len(), 5);
        assert_eq!(actions[2], Action::IncreaseQuantity(ProductId::new("2")));

        let state = actions
            .iter()
            .fold(StoreState::default(), |s, a| reduce(&s, a));
        assert_eq!(cart_total(&state.cart).amount_cents, 1900);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_unknown_product_names_the_step() {
        let steps = parse_steps(
            r#"[{"type": "CLEAR_CART"}, {"type": "TOGGLE_FAVORITE", "product": 99}]"#,
        )
        .unwrap();

        let err = resolve_steps(&steps, &catalog()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Step 2"));
        assert!(message.contains("99"));
    }

    #[test]
    fn test_id_steps_do_not_need_catalog() {
        let step = Step::RemoveFromCart {
            product: ProductId::new("404"),
        };
        assert_eq!(
            step.resolve(&[]).unwrap(),
            Action::RemoveFromCart(ProductId::new("404"))
        );
    }

    #[test]
    fn test_unknown_step_type_rejected() {
        assert!(parse_steps(r#"[{"type": "CHECKOUT"}]"#).is_err());
    }
}
