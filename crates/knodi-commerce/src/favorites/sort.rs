//! Sort orders for the favorites page.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::favorites::FavoriteSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to order favorites for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FavoriteSort {
    /// The order products were favorited in.
    #[default]
    Default,
    /// Cheapest first.
    LowToHigh,
    /// Most expensive first.
    HighToLow,
}

impl FavoriteSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteSort::Default => "default",
            FavoriteSort::LowToHigh => "lowToHigh",
            FavoriteSort::HighToLow => "highToLow",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FavoriteSort::Default => "Sort by",
            FavoriteSort::LowToHigh => "Price: Low to High",
            FavoriteSort::HighToLow => "Price: High to Low",
        }
    }

    /// Borrowed view of `favorites` in this order.
    ///
    /// Products with equal prices keep their favorited order.
    pub fn apply<'a>(&self, favorites: &'a FavoriteSet) -> Vec<&'a Product> {
        let mut view: Vec<&Product> = favorites.items().iter().collect();
        match self {
            FavoriteSort::Default => {}
            FavoriteSort::LowToHigh => view.sort_by_key(|p| p.price.amount_cents),
            FavoriteSort::HighToLow => {
                view.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
            }
        }
        view
    }
}

impl FromStr for FavoriteSort {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "" | "default" => Ok(FavoriteSort::Default),
            "lowtohigh" | "priceasc" => Ok(FavoriteSort::LowToHigh),
            "hightolow" | "pricedesc" => Ok(FavoriteSort::HighToLow),
            _ => Err(CommerceError::UnknownSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for FavoriteSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn favorites() -> FavoriteSet {
        [("a", 500), ("b", 100), ("c", 900), ("d", 100)]
            .iter()
            .fold(FavoriteSet::new(), |set, (id, cents)| {
                set.toggle_favorite(&Product::new(*id, *id, Money::new(*cents, Currency::USD)))
            })
    }

    fn ids(view: &[&Product]) -> Vec<String> {
        view.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_keeps_favorite_order() {
        let set = favorites();
        assert_eq!(ids(&FavoriteSort::Default.apply(&set)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_low_to_high_is_stable() {
        let set = favorites();
        assert_eq!(ids(&FavoriteSort::LowToHigh.apply(&set)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_high_to_low_is_stable() {
        let set = favorites();
        assert_eq!(ids(&FavoriteSort::HighToLow.apply(&set)), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_sort_does_not_mutate_set() {
        let set = favorites();
        let before = set.clone();
        let _ = FavoriteSort::HighToLow.apply(&set);
        assert_eq!(set, before);
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!("lowToHigh".parse::<FavoriteSort>().unwrap(), FavoriteSort::LowToHigh);
        assert_eq!("high-to-low".parse::<FavoriteSort>().unwrap(), FavoriteSort::HighToLow);
        assert_eq!("default".parse::<FavoriteSort>().unwrap(), FavoriteSort::Default);
        assert!("sideways".parse::<FavoriteSort>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FavoriteSort::LowToHigh).unwrap();
        assert_eq!(json, "\"lowToHigh\"");
    }
}
