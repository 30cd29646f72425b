//! Shopping cart state and its pure view description.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("cart is empty")]
    Empty,
}

impl CartError {
    /// Catalog key of the user-facing message.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Empty => "notice.cart.empty",
        }
    }
}

/// A single line in the cart. `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }
}

/// Cart lines in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Add one unit of `name`. Repeat purchases bump the quantity; the price
    /// of the first purchase is kept. Returns the new quantity.
    pub fn add(&mut self, name: &str, unit_price: i64) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity += 1;
            item.quantity
        } else {
            self.items.push(CartItem {
                name: name.to_string(),
                unit_price,
                quantity: 1,
            });
            1
        }
    }

    /// Remove every line named `name`. Returns how many lines were dropped.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |sum, item| sum.saturating_add(item.line_total()))
    }

    /// Guard used by checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] when there is nothing to pay for.
    pub fn ensure_not_empty(&self) -> Result<i64, CartError> {
        if self.is_empty() {
            Err(CartError::Empty)
        } else {
            Ok(self.total())
        }
    }
}

/// Rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: i64,
    pub line_total_label: String,
}

/// Everything the cart container and total element show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: i64,
    pub total_label: String,
}

impl CartView {
    /// Build the view from cart state. Pure: no DOM, no side effects.
    #[must_use]
    pub fn render(cart: &Cart, format_price: &dyn Fn(i64) -> String) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| {
                let line_total = item.line_total();
                CartLineView {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    line_total,
                    line_total_label: format_price(line_total),
                }
            })
            .collect();
        let total = cart.total();
        Self {
            lines,
            total,
            total_label: format_price(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_adds_increment_quantity_in_place() {
        let mut cart = Cart::new();
        assert_eq!(cart.add("Diamond Sword", 50_000), 1);
        cart.add("VIP Rank", 200_000);
        assert_eq!(cart.add("Diamond Sword", 50_000), 2);
        let names: Vec<_> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Diamond Sword", "VIP Rank"]);
        assert_eq!(cart.total(), 300_000);
    }

    #[test]
    fn names_are_case_sensitive_keys() {
        let mut cart = Cart::new();
        cart.add("Elytra", 10);
        cart.add("elytra", 10);
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add("Elytra", 10);
        cart.add("Totem", 20);
        assert_eq!(cart.remove("Elytra"), 1);
        let once = cart.clone();
        assert_eq!(cart.remove("Elytra"), 0);
        assert_eq!(cart, once);
        assert_eq!(cart.remove("Nope"), 0);
    }

    #[test]
    fn empty_cart_guard() {
        let mut cart = Cart::new();
        assert_eq!(cart.ensure_not_empty(), Err(CartError::Empty));
        cart.add("Totem", 20);
        assert_eq!(cart.ensure_not_empty(), Ok(20));
    }

    #[test]
    fn view_lists_line_totals_and_grand_total() {
        let mut cart = Cart::new();
        cart.add("Totem", 1_500);
        cart.add("Totem", 1_500);
        cart.add("Apple", 250);
        let view = CartView::render(&cart, &|n| format!("{n}T"));
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.lines[0].line_total_label, "3000T");
        assert_eq!(view.total, 3_250);
        assert_eq!(view.total_label, "3250T");
    }
}
