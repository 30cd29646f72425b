//! Applies controller [`Effect`]s to the live document.
use std::cell::RefCell;
use std::collections::HashMap;

use blockhaven_site::effects::reveal::reveal_style;
use blockhaven_site::{
    AuthForm, Catalog, Effect, NoticeId, NoticeView, ParticleBurst, Product, REVEAL_SELECTOR,
    UiEvent,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, HtmlButtonElement, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::dom::{
    self, WebError, append_to_body, html_by_id, js_error_message, query, query_all, set_class,
    set_style,
};
use crate::listeners::{REVEAL_INDEX_ATTR, text_inputs};
use crate::markup::{
    CartLabels, cart_items_html, notice_class, notice_html, notice_style, parse_price,
    particle_style,
};
use crate::runtime::dispatch;

const ORIGINAL_LABEL_ATTR: &str = "data-original-label";
const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Catalog strings the applier renders directly.
#[derive(Debug, Clone)]
pub struct Labels {
    pub cart: CartLabels,
    pub close: String,
}

impl Labels {
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            cart: CartLabels {
                quantity: catalog.t("cart.quantity"),
                remove: catalog.t("cart.remove"),
            },
            close: catalog.t("notice.close"),
        }
    }
}

/// Product cards under `#productsGrid` with the data the filter needs, in
/// document order. Card indices in layout effects refer to this order.
#[must_use]
pub fn read_products() -> (Vec<HtmlElement>, Vec<Product>) {
    let Some(grid) = html_by_id("productsGrid") else {
        return (Vec::new(), Vec::new());
    };
    let children = grid.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|el| el.class_list().contains("product-card"))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|card| {
            let product = Product {
                category: card.get_attribute("data-category").unwrap_or_default(),
                price: card
                    .get_attribute("data-price")
                    .as_deref()
                    .and_then(parse_price)
                    .unwrap_or(0),
                title: text_of(&card, ".product-title"),
                description: text_of(&card, ".product-description"),
            };
            (card, product)
        })
        .unzip()
}

fn text_of(card: &Element, selector: &str) -> String {
    card.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

pub struct Applier {
    labels: Labels,
    cards: Vec<HtmlElement>,
    notice_listeners: RefCell<HashMap<NoticeId, Closure<dyn FnMut(Event)>>>,
}

impl Applier {
    #[must_use]
    pub fn new(labels: Labels, cards: Vec<HtmlElement>) -> Self {
        Self {
            labels,
            cards,
            notice_listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Apply effects in order; a failing effect is logged and skipped.
    pub fn apply_all(&self, effects: &[Effect]) {
        for effect in effects {
            if let Err(err) = self.apply(effect) {
                log::error!("applying {effect:?}: {err}");
            }
        }
    }

    /// # Errors
    /// Returns the browser error when a DOM call fails. Missing elements are
    /// skipped silently.
    pub fn apply(&self, effect: &Effect) -> Result<(), WebError> {
        match effect {
            Effect::ShowNotice(view) => self.show_notice(view)?,
            Effect::SlideInNotice(id) => {
                if let Some(el) = notice(*id) {
                    set_style(&el, "transform", "translateX(0)");
                }
            }
            Effect::SlideOutNotice(id) => {
                if let Some(el) = notice(*id) {
                    set_style(&el, "transform", "translateX(100%)");
                }
            }
            Effect::RemoveNotice(id) => {
                if let Some(el) = notice(*id) {
                    el.remove();
                }
                self.notice_listeners.borrow_mut().remove(id);
            }
            Effect::SetMenuOpen(open) => {
                for selector in [".hamburger", ".nav-menu"] {
                    if let Some(el) = query(selector) {
                        set_class(&el, "active", *open);
                    }
                }
            }
            Effect::SetScrollTopVisible(visible) => {
                if let Some(el) = dom::document().get_element_by_id("scrollTop") {
                    set_class(&el, "visible", *visible);
                }
            }
            Effect::ScrollToTop => {
                let options = ScrollToOptions::new();
                options.set_top(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                dom::window().scroll_to_with_scroll_to_options(&options);
            }
            Effect::PrepareReveal(offset) => {
                let (opacity, transform) = reveal_style(false, *offset);
                for card in query_all(REVEAL_SELECTOR) {
                    set_style(&card, "opacity", opacity);
                    set_style(&card, "transform", &transform);
                    set_style(&card, "transition", REVEAL_TRANSITION);
                }
            }
            Effect::RevealCard(index) => {
                if let Some(card) = query(&format!("[{REVEAL_INDEX_ATTR}=\"{index}\"]")) {
                    let (opacity, transform) = reveal_style(true, 0);
                    set_style(&card, "opacity", opacity);
                    set_style(&card, "transform", &transform);
                }
            }
            Effect::ShowPageTransition => {
                append_to_body("div", "page-transition")?;
            }
            Effect::Navigate(href) => dom::window().location().set_href(href)?,
            Effect::RenderCart(view) => {
                if let Some(items) = html_by_id("cartItems") {
                    items.set_inner_html(&cart_items_html(view, &self.labels.cart));
                }
                if let Some(total) = html_by_id("cartTotal") {
                    total.set_text_content(Some(&view.total_label));
                }
            }
            Effect::SetCheckoutBusy(label) => set_checkout_busy(label.as_deref())?,
            Effect::HideCart => {
                if let Some(modal) = html_by_id("cartModal") {
                    set_style(&modal, "display", "none");
                }
            }
            Effect::LayoutProducts(order) => self.layout_products(order)?,
            Effect::AnimateProducts(delays) => {
                for (index, delay) in delays {
                    if let Some(card) = self.cards.get(*index) {
                        set_style(card, "animation-delay", &format!("{delay}s"));
                        set_class(card, "animate-in", true);
                    }
                }
            }
            Effect::SetAuthLoading { form, loading } => set_auth_loading(*form, *loading),
            Effect::CopyText(text) => copy_text(text),
            Effect::SetPlayerCount(count) => {
                if let Some(el) = html_by_id("playerCount") {
                    el.set_text_content(Some(&count.to_string()));
                }
            }
            Effect::PulsePlayerCount(on) => {
                if let Some(el) = html_by_id("playerCount") {
                    set_style(&el, "transform", if *on { "scale(1.2)" } else { "scale(1)" });
                }
            }
            Effect::SpawnParticles(burst) => spawn_particles(burst.clone())?,
            Effect::SetFieldFocused { field, focused } => {
                if let Some(parent) = text_inputs()
                    .get(*field)
                    .and_then(|input| input.parent_element())
                {
                    set_class(&parent, "focused", *focused);
                }
            }
            Effect::SetPasswordVisible {
                field,
                visible,
                glyph,
            } => {
                let id = field.element_id();
                if let Some(input) = dom::document().get_element_by_id(id) {
                    input.set_attribute("type", if *visible { "text" } else { "password" })?;
                }
                if let Some(toggle) = query(&format!("[data-target=\"{id}\"]")) {
                    toggle.set_text_content(Some(glyph));
                }
            }
            Effect::LiftCard { index, lifted } => {
                // Hover indices are bound at boot, before any reordering.
                if let Some(card) = self.cards.get(*index) {
                    let transform = if *lifted {
                        "translateY(-10px) scale(1.02)"
                    } else {
                        "translateY(0) scale(1)"
                    };
                    set_style(card, "transform", transform);
                }
            }
            Effect::PlaySound(cue) => log::info!("Playing Minecraft {} sound", cue.as_str()),
        }
        Ok(())
    }

    fn show_notice(&self, view: &NoticeView) -> Result<(), WebError> {
        let el = append_to_body("div", &notice_class(view.kind))?;
        el.set_attribute("data-notice-id", &view.id.0.to_string())?;
        el.set_attribute("style", &notice_style(view.kind))?;
        el.set_inner_html(&notice_html(view, &self.labels.close));
        if let Some(close) = el.query_selector(".notification-close")? {
            let id = view.id;
            let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                dispatch(UiEvent::NoticeCloseClicked(id));
            });
            close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            self.notice_listeners.borrow_mut().insert(id, closure);
        }
        Ok(())
    }

    fn layout_products(&self, order: &[usize]) -> Result<(), WebError> {
        let grid =
            html_by_id("productsGrid").ok_or_else(|| WebError::Missing("productsGrid".into()))?;
        for card in &self.cards {
            set_style(card, "display", "none");
        }
        for card in order.iter().filter_map(|&i| self.cards.get(i)) {
            set_style(card, "display", "block");
            grid.append_child(card)?;
        }
        Ok(())
    }
}

fn notice(id: NoticeId) -> Option<Element> {
    query(&format!("[data-notice-id=\"{}\"]", id.0))
}

fn set_checkout_busy(label: Option<&str>) -> Result<(), WebError> {
    let Some(button) =
        query(".modal-footer .btn-primary").or_else(|| query("[data-action=\"checkout\"]"))
    else {
        return Ok(());
    };
    match label {
        Some(label) => {
            if !button.has_attribute(ORIGINAL_LABEL_ATTR) {
                let original = button.text_content().unwrap_or_default();
                button.set_attribute(ORIGINAL_LABEL_ATTR, &original)?;
            }
            button.set_text_content(Some(label));
        }
        None => {
            if let Some(original) = button.get_attribute(ORIGINAL_LABEL_ATTR) {
                button.set_text_content(Some(&original));
                button.remove_attribute(ORIGINAL_LABEL_ATTR)?;
            }
        }
    }
    if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(label.is_some());
    }
    Ok(())
}

fn set_auth_loading(form: AuthForm, loading: bool) {
    let form_id = match form {
        AuthForm::Login => "loginForm",
        AuthForm::Register => "registerForm",
    };
    let Some(button) = query(&format!("#{form_id} .btn-primary")) else {
        return;
    };
    if let Ok(Some(text)) = button.query_selector(".btn-text") {
        set_style(&text, "display", if loading { "none" } else { "inline" });
    }
    if let Ok(Some(spinner)) = button.query_selector(".btn-loading") {
        set_style(&spinner, "display", if loading { "inline-block" } else { "none" });
    }
}

fn copy_text(text: &str) {
    let promise = dom::window().navigator().clipboard().write_text(text);
    wasm_bindgen_futures::spawn_local(async move {
        let ok = match JsFuture::from(promise).await {
            Ok(_) => true,
            Err(err) => {
                log::warn!("clipboard write failed: {}", js_error_message(&err));
                false
            }
        };
        dispatch(UiEvent::ClipboardWritten { ok });
    });
}

fn spawn_particles(burst: ParticleBurst) -> Result<(), WebError> {
    let dots = burst
        .particles()
        .iter()
        .map(|p| {
            let dot = append_to_body("div", "particle")?;
            dot.set_attribute("style", &particle_style(p.x, p.y))?;
            Ok(dot)
        })
        .collect::<Result<Vec<_>, WebError>>()?;
    next_frame(burst, dots);
    Ok(())
}

fn next_frame(mut burst: ParticleBurst, dots: Vec<Element>) {
    let callback = Closure::once_into_js(move || {
        let opacity = burst.opacity();
        let alive = burst.step();
        for (dot, p) in dots.iter().zip(burst.particles()) {
            set_style(dot, "left", &format!("{}px", p.x));
            set_style(dot, "top", &format!("{}px", p.y));
            set_style(dot, "opacity", &opacity.to_string());
        }
        if alive {
            next_frame(burst, dots);
        } else {
            for dot in &dots {
                dot.remove();
            }
        }
    });
    if let Err(err) = dom::window().request_animation_frame(callback.unchecked_ref()) {
        log::warn!("requestAnimationFrame: {}", js_error_message(&err));
    }
}
