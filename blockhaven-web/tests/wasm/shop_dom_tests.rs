#![cfg(target_arch = "wasm32")]

use blockhaven_site::{Catalog, CartLineView, CartView, Effect, SortKey};
use blockhaven_web::apply::{Applier, Labels, read_products};
use blockhaven_web::dom;
use blockhaven_web::format::fmt_number;
use blockhaven_web::listeners::read_filter;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const SHOP_FIXTURE: &str = r#"
<select id="categoryFilter"><option value="all">All</option><option value="weapons" selected>Weapons</option></select>
<select id="sortFilter"><option value="">-</option><option value="price-high" selected>High</option></select>
<input id="searchInput" type="text" value="Sword">
<div id="productsGrid">
  <div class="product-card" data-category="weapons" data-price="50000"><h3 class="product-title">Diamond Sword</h3><p class="product-description">Sharp</p></div>
  <div class="product-card" data-category="armor" data-price="30000"><h3 class="product-title">Iron Armor</h3><p class="product-description">Sturdy</p></div>
  <div class="product-card" data-category="weapons" data-price="80000"><h3 class="product-title">Netherite Sword</h3><p class="product-description">Sharper</p></div>
</div>
<div id="cartModal"><div id="cartItems"></div><span id="cartTotal"></span>
  <div class="modal-footer"><button class="btn-primary" data-action="checkout">Pay</button></div>
</div>
"#;

fn mount(html: &str) {
    let body = dom::document().body().expect("body");
    body.set_inner_html(html);
}

fn applier() -> Applier {
    let (cards, _) = read_products();
    Applier::new(Labels::from_catalog(&Catalog::default_catalog()), cards)
}

fn grid_titles() -> Vec<String> {
    dom::query_all("#productsGrid .product-title")
        .iter()
        .filter_map(|el| el.text_content())
        .collect()
}

#[wasm_bindgen_test]
fn products_are_read_in_document_order() {
    mount(SHOP_FIXTURE);
    let (cards, products) = read_products();
    assert_eq!(cards.len(), 3);
    assert_eq!(products[0].title, "Diamond Sword");
    assert_eq!(products[1].category, "armor");
    assert_eq!(products[2].price, 80_000);
}

#[wasm_bindgen_test]
fn filter_controls_are_read_together() {
    mount(SHOP_FIXTURE);
    let query = read_filter();
    assert_eq!(query.category, "weapons");
    assert_eq!(query.sort, SortKey::PriceHigh);
    assert_eq!(query.search, "Sword");
}

#[wasm_bindgen_test]
fn layout_reorders_and_hides_cards() {
    mount(SHOP_FIXTURE);
    let applier = applier();
    applier
        .apply(&Effect::LayoutProducts(vec![2, 0]))
        .expect("layout");
    assert_eq!(
        grid_titles(),
        vec!["Iron Armor", "Netherite Sword", "Diamond Sword"]
    );
    let hidden = dom::query("[data-category=\"armor\"]").expect("armor card");
    assert!(
        hidden
            .get_attribute("style")
            .unwrap_or_default()
            .contains("display: none")
    );
}

#[wasm_bindgen_test]
fn hover_lifts_the_same_card_after_a_sort() {
    mount(SHOP_FIXTURE);
    let applier = applier();
    applier
        .apply(&Effect::LayoutProducts(vec![2, 0, 1]))
        .expect("layout");
    assert_eq!(
        grid_titles(),
        vec!["Netherite Sword", "Diamond Sword", "Iron Armor"]
    );
    applier
        .apply(&Effect::LiftCard {
            index: 0,
            lifted: true,
        })
        .expect("lift");
    let transform = |price: &str| {
        dom::query(&format!("[data-price=\"{price}\"]"))
            .and_then(|card| card.get_attribute("style"))
            .unwrap_or_default()
    };
    assert!(transform("50000").contains("translateY(-10px) scale(1.02)"));
    assert!(!transform("80000").contains("translateY(-10px)"));
}

#[wasm_bindgen_test]
fn cart_render_and_checkout_label_round_trip() {
    mount(SHOP_FIXTURE);
    let applier = applier();
    let view = CartView {
        lines: vec![CartLineView {
            name: "Diamond Sword".into(),
            quantity: 1,
            line_total: 50_000,
            line_total_label: "50,000 تومان".into(),
        }],
        total: 50_000,
        total_label: "50,000 تومان".into(),
    };
    applier.apply(&Effect::RenderCart(view)).expect("render");
    assert!(dom::query("#cartItems .remove-item[data-name=\"Diamond Sword\"]").is_some());
    let total = dom::query("#cartTotal").and_then(|el| el.text_content());
    assert_eq!(total.as_deref(), Some("50,000 تومان"));

    applier
        .apply(&Effect::SetCheckoutBusy(Some("در حال پردازش...".into())))
        .expect("busy");
    let button = dom::query(".modal-footer .btn-primary").expect("button");
    assert_eq!(button.text_content().as_deref(), Some("در حال پردازش..."));
    applier.apply(&Effect::SetCheckoutBusy(None)).expect("idle");
    assert_eq!(button.text_content().as_deref(), Some("Pay"));
    assert!(!button.has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn large_totals_keep_locale_digits() {
    let persian = |text: &str| text.chars().any(|c| ('۰'..='۹').contains(&c));
    assert!(persian(&fmt_number(50_000, "fa-IR")));
    assert!(persian(&fmt_number(3_000_000_000, "fa-IR")));
}
