//! One-shot fade-in of cards as they scroll into view.
use std::collections::BTreeSet;

/// Cards that get the reveal treatment.
pub const REVEAL_SELECTOR: &str = ".feature-card, .event-card, .product-card";

/// Tracks which observed elements have been revealed. Revealed elements never
/// hide again.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    threshold: f64,
    revealed: BTreeSet<usize>,
}

impl RevealTracker {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            revealed: BTreeSet::new(),
        }
    }

    /// Record an intersection report; `true` the first time element `index`
    /// is at least `threshold` visible.
    pub fn observe(&mut self, index: usize, ratio: f64) -> bool {
        ratio >= self.threshold && self.revealed.insert(index)
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }
}

/// Inline style pair for a card's reveal state.
#[must_use]
pub fn reveal_style(revealed: bool, offset_px: u32) -> (&'static str, String) {
    if revealed {
        ("1", "translateY(0)".to_string())
    } else {
        ("0", format!("translateY({offset_px}px)"))
    }
}
