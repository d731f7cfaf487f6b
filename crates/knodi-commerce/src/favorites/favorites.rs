//! The favorites set.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Products the shopper has marked as favorite, in the order they were marked.
///
/// Membership is by product id; each id appears at most once, and
/// deserializing a set that repeats an id fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "FavoritesRecord")]
pub struct FavoriteSet {
    items: Vec<Product>,
}

#[derive(Deserialize)]
struct FavoritesRecord {
    items: Vec<Product>,
}

impl TryFrom<FavoritesRecord> for FavoriteSet {
    type Error = CommerceError;

    fn try_from(record: FavoritesRecord) -> Result<Self, Self::Error> {
        if let Some(dup) = first_repeated_id(&record.items) {
            return Err(CommerceError::InvalidState(format!(
                "product {} appears twice in favorites",
                dup
            )));
        }
        Ok(Self {
            items: record.items,
        })
    }
}

impl FavoriteSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `product` if its id is present, otherwise append it.
    ///
    /// Re-favoriting after a removal stores the snapshot passed in, not the
    /// one that was removed.
    pub fn toggle_favorite(&self, product: &Product) -> Self {
        if self.is_favorite(&product.id) {
            Self {
                items: self
                    .items
                    .iter()
                    .filter(|p| p.id != product.id)
                    .cloned()
                    .collect(),
            }
        } else {
            let mut items = self.items.clone();
            items.push(product.clone());
            Self { items }
        }
    }

    /// Drop every favorite.
    pub fn clear_favorites(&self) -> Self {
        Self::new()
    }

    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }

    pub fn favorite_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshots in the order they were favorited.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|p| &p.id == id)
    }
}

fn first_repeated_id(items: &[Product]) -> Option<ProductId> {
    let mut seen = HashSet::new();
    items
        .iter()
        .find(|p| !seen.insert(&p.id))
        .map(|p| p.id.clone())
}

/// Whether `id` is in `state`.
pub fn is_favorite(state: &FavoriteSet, id: &ProductId) -> bool {
    state.is_favorite(id)
}

/// Number of favorites (the badge count).
pub fn favorite_count(state: &FavoriteSet) -> usize {
    state.favorite_count()
}
