//! The state container.
//!
//! [`StoreState`] holds both slices. [`reduce`] is the single pure
//! transition from one state to the next; [`Store`] owns the committed
//! state, applies actions through `reduce` and notifies subscribers.
//!
//! ```
//! use knodi_commerce::prelude::*;
//!
//! let mut store = Store::new(StoreConfig::default());
//! let mug = Product::new("1", "Mug", Money::new(1000, Currency::USD));
//!
//! store.dispatch(Action::AddToCart(mug.clone()));
//! store.dispatch(Action::AddToCart(mug));
//!
//! assert_eq!(store.item_count(), 1);
//! assert_eq!(store.cart_total().amount_cents, 2000);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::{CartPricing, CartState};
use crate::catalog::{Product, DEFAULT_PLACEHOLDER_IMAGE};
use crate::favorites::{FavoriteSet, FavoriteSort};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Settings a store is constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Currency every cart total is expressed in.
    #[serde(default)]
    pub currency: Currency,

    /// Image shown for products without one.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

/// A mutation intent dispatched by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddToCart(Product),
    #[serde(rename = "INCREASE_QTY")]
    IncreaseQuantity(ProductId),
    #[serde(rename = "DECREASE_QTY")]
    DecreaseQuantity(ProductId),
    RemoveFromCart(ProductId),
    ClearCart,
    ToggleFavorite(Product),
    ClearFavorites,
}

impl Action {
    /// Tag name, as used in recorded sessions.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddToCart(_) => "ADD_TO_CART",
            Action::IncreaseQuantity(_) => "INCREASE_QTY",
            Action::DecreaseQuantity(_) => "DECREASE_QTY",
            Action::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Action::ClearCart => "CLEAR_CART",
            Action::ToggleFavorite(_) => "TOGGLE_FAVORITE",
            Action::ClearFavorites => "CLEAR_FAVORITES",
        }
    }

    /// Product the action targets, if any.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            Action::AddToCart(p) | Action::ToggleFavorite(p) => Some(&p.id),
            Action::IncreaseQuantity(id)
            | Action::DecreaseQuantity(id)
            | Action::RemoveFromCart(id) => Some(id),
            Action::ClearCart | Action::ClearFavorites => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.product_id() {
            Some(id) => write!(f, "{}({})", self.kind(), id),
            None => write!(f, "{}", self.kind()),
        }
    }
}

/// Both slices of storefront state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreState {
    pub cart: CartState,
    pub favorites: FavoriteSet,
}

impl StoreState {
    /// Empty cart and favorites, cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            cart: CartState::new(currency),
            favorites: FavoriteSet::new(),
        }
    }
}

/// Apply `action` to `state`, producing the next state.
///
/// Cart actions leave favorites untouched and vice versa.
pub fn reduce(state: &StoreState, action: &Action) -> StoreState {
    match action {
        Action::AddToCart(product) => StoreState {
            cart: state.cart.add_to_cart(product),
            favorites: state.favorites.clone(),
        },
        Action::IncreaseQuantity(id) => StoreState {
            cart: state.cart.increase_quantity(id),
            favorites: state.favorites.clone(),
        },
        Action::DecreaseQuantity(id) => StoreState {
            cart: state.cart.decrease_quantity(id),
            favorites: state.favorites.clone(),
        },
        Action::RemoveFromCart(id) => StoreState {
            cart: state.cart.remove_from_cart(id),
            favorites: state.favorites.clone(),
        },
        Action::ClearCart => StoreState {
            cart: state.cart.clear_cart(),
            favorites: state.favorites.clone(),
        },
        Action::ToggleFavorite(product) => StoreState {
            cart: state.cart.clone(),
            favorites: state.favorites.toggle_favorite(product),
        },
        Action::ClearFavorites => StoreState {
            cart: state.cart.clone(),
            favorites: state.favorites.clear_favorites(),
        },
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&StoreState) + Send + Sync>;

/// Owns the committed storefront state.
///
/// Constructed once at startup and handed to whatever renders the
/// storefront; there is no global instance.
pub struct Store {
    config: StoreConfig,
    state: StoreState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Store {
    /// A store with an empty cart and no favorites.
    pub fn new(config: StoreConfig) -> Self {
        let state = StoreState::new(config.currency);
        Self {
            config,
            state,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Apply `action` and commit the result.
    pub fn dispatch(&mut self, action: Action) -> &StoreState {
        let next = reduce(&self.state, &action);
        let changed = next != self.state;
        self.state = next;

        tracing::debug!(
            action = action.kind(),
            product = action.product_id().map(ProductId::as_str),
            changed,
            cart_items = self.state.cart.item_count(),
            favorites = self.state.favorites.favorite_count(),
            "dispatched action"
        );

        for (_, listener) in &self.listeners {
            listener(&self.state);
        }

        &self.state
    }

    /// Call `listener` with the committed state after every dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop notifying a listener. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartState {
        &self.state.cart
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.state.favorites
    }

    pub fn cart_total(&self) -> Money {
        self.state.cart.total()
    }

    pub fn item_count(&self) -> usize {
        self.state.cart.item_count()
    }

    pub fn pricing(&self) -> CartPricing {
        CartPricing::for_cart(&self.state.cart)
    }

    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.state.favorites.is_favorite(id)
    }

    pub fn favorite_count(&self) -> usize {
        self.state.favorites.favorite_count()
    }

    /// Favorites in display order.
    pub fn sorted_favorites(&self, sort: FavoriteSort) -> Vec<&Product> {
        sort.apply(&self.state.favorites)
    }

    /// Cart badge count, `None` when the cart is empty.
    pub fn cart_badge(&self) -> Option<usize> {
        badge(self.item_count())
    }

    /// Favorites badge count, `None` when there are no favorites.
    pub fn favorites_badge(&self) -> Option<usize> {
        badge(self.favorite_count())
    }

    /// Image to render for `images` under this store's placeholder.
    pub fn display_image<'a>(&'a self, images: &'a [String]) -> &'a str {
        crate::catalog::display_image(images, &self.config.placeholder_image)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn badge(count: usize) -> Option<usize> {
    (count > 0).then_some(count)
}
