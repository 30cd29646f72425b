//! Shop product filtering and ordering.
//!
//! Products are read from existing markup and never mutated here; the output
//! is a list of indices into the original list, in display order.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::numbers::usize_to_f64;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Product attributes scraped from a product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub category: String,
    pub price: i64,
    pub title: String,
    pub description: String,
}

/// Sort selector values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep markup order.
    #[default]
    None,
    PriceLow,
    PriceHigh,
    /// Simulated: shuffled, no popularity data exists.
    Popular,
    /// Simulated: shuffled, no recency data exists.
    Newest,
}

impl SortKey {
    /// Map a `<select>` value; unknown values keep markup order.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "popular" => Self::Popular,
            "newest" => Self::Newest,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn is_deterministic(self) -> bool {
        !matches!(self, Self::Popular | Self::Newest)
    }
}

/// Current filter control values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub category: String,
    pub search: String,
    pub sort: SortKey,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            sort: SortKey::None,
        }
    }
}

impl FilterQuery {
    #[must_use]
    pub fn new(category: &str, search: &str, sort: SortKey) -> Self {
        Self {
            category: category.to_string(),
            search: search.to_string(),
            sort,
        }
    }
}

fn matches_category(product: &Product, category: &str) -> bool {
    category == ALL_CATEGORIES || product.category == category
}

fn matches_search(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Category filter, then text search, then sort.
///
/// Search is skipped when the text is blank; otherwise the lowercased text is
/// matched as a substring of the title or description. `rng` is only drawn
/// from by the simulated sort keys.
pub fn filter_products<R: Rng + ?Sized>(
    products: &[Product],
    query: &FilterQuery,
    rng: &mut R,
) -> Vec<usize> {
    let needle = (!query.search.trim().is_empty()).then(|| query.search.to_lowercase());
    let mut shown: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_category(p, &query.category))
        .filter(|(_, p)| needle.as_deref().is_none_or(|n| matches_search(p, n)))
        .map(|(idx, _)| idx)
        .collect();

    match query.sort {
        SortKey::PriceLow => shown.sort_by_key(|&idx| products[idx].price),
        SortKey::PriceHigh => shown.sort_by_key(|&idx| std::cmp::Reverse(products[idx].price)),
        SortKey::Popular | SortKey::Newest => shown.shuffle(rng),
        SortKey::None => {}
    }
    shown
}

/// Reveal schedule for shown products: `(index, delay_secs)`.
#[must_use]
pub fn stagger(order: &[usize], step_secs: f64) -> Vec<(usize, f64)> {
    order
        .iter()
        .enumerate()
        .map(|(position, &idx)| (idx, usize_to_f64(position) * step_secs))
        .collect()
}
