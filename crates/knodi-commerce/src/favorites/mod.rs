//! Favorites module.
//!
//! Contains the favorites set and the sort orders used to display it.

mod favorites;
mod sort;

pub use favorites::{favorite_count, is_favorite, FavoriteSet};
pub use sort::FavoriteSort;
