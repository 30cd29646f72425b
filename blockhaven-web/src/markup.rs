//! HTML and inline-style fragments built from controller views.
//!
//! Kept free of `web_sys` so the strings can be checked on the host.
use blockhaven_site::{CartLineView, CartView, NoticeKind, NoticeView};

/// Escape text for interpolation into HTML content or quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Labels a cart row needs from the catalog.
#[derive(Debug, Clone)]
pub struct CartLabels {
    /// Template containing `{qty}`.
    pub quantity: String,
    pub remove: String,
}

#[must_use]
pub fn cart_line_html(line: &CartLineView, labels: &CartLabels) -> String {
    let name = escape_html(&line.name);
    let quantity = escape_html(&labels.quantity.replace("{qty}", &line.quantity.to_string()));
    format!(
        r#"<div class="cart-item"><div class="cart-item-info"><span class="cart-item-name">{name}</span><span class="cart-item-quantity">{quantity}</span></div><div class="cart-item-price">{price}</div><button class="remove-item" data-name="{name}">{remove}</button></div>"#,
        price = escape_html(&line.line_total_label),
        remove = escape_html(&labels.remove),
    )
}

/// All `.cart-item` rows for `#cartItems`.
#[must_use]
pub fn cart_items_html(view: &CartView, labels: &CartLabels) -> String {
    view.lines
        .iter()
        .map(|line| cart_line_html(line, labels))
        .collect()
}

#[must_use]
pub fn notice_class(kind: NoticeKind) -> String {
    format!("notification notification-{}", kind.as_str())
}

#[must_use]
pub fn notice_html(view: &NoticeView, close_label: &str) -> String {
    format!(
        r#"<div class="notification-content"><span class="notification-message">{}</span><button class="notification-close">{}</button></div>"#,
        escape_html(&view.message),
        escape_html(close_label),
    )
}

/// Inline style for a notice parked off-screen to the right.
#[must_use]
pub fn notice_style(kind: NoticeKind) -> String {
    let mut css = String::from(
        "position: fixed; top: 20px; right: 20px; background: var(--bg-card); \
         border: 2px solid var(--border-color); border-radius: 10px; padding: 15px 20px; \
         color: var(--text-light); z-index: 10000; transform: translateX(100%); \
         transition: transform 0.3s ease; box-shadow: 0 8px 25px var(--shadow-color);",
    );
    if let Some(accent) = kind.accent() {
        css.push_str(&format!(" border-color: {accent};"));
    }
    css
}

#[must_use]
pub fn particle_style(x: f64, y: f64) -> String {
    format!(
        "position: fixed; left: {x}px; top: {y}px; width: 4px; height: 4px; \
         background: var(--primary-gold); border-radius: 50%; pointer-events: none; z-index: 1000;"
    )
}

/// Parse a `data-price` attribute; surrounding whitespace is tolerated.
#[must_use]
pub fn parse_price(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
