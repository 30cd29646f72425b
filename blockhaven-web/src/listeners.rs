//! DOM-backed [`EventSource`]: turns browser events into [`UiEvent`]s.
use blockhaven_site::config::LayoutConfig;
use blockhaven_site::events::TEXT_INPUT_SELECTOR;
use blockhaven_site::{
    Action, EventSource, FilterQuery, LoginForm, PasswordField, RegisterForm, SortKey,
    Subscription, Target, UiEvent, ALL_CATEGORIES,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, FormData, HtmlAnchorElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent,
};

use crate::dom::{self, WebError, js_error_message};
use crate::runtime::dispatch;

pub const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

/// Owns every listener closure for the life of the page.
pub struct DomEventSource {
    layout: LayoutConfig,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
    observers: Vec<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>,
}

impl DomEventSource {
    #[must_use]
    pub const fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            listeners: Vec::new(),
            observers: Vec::new(),
        }
    }

    fn targets(target: Target) -> Vec<EventTarget> {
        match target {
            Target::Window => vec![dom::window().into()],
            Target::Document => vec![dom::document().into()],
            Target::Selector(selector) => dom::query_all(selector)
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }

    fn listen(&mut self, subscription: &Subscription) -> bool {
        let Some(name) = subscription.topic.event_name() else {
            return false;
        };
        let targets = Self::targets(subscription.target);
        for (index, target) in targets.iter().enumerate() {
            let action = subscription.action;
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(ui) = translate(action, index, &event) {
                    dispatch(ui);
                }
            });
            match target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
                Ok(()) => self.listeners.push(closure),
                Err(err) => log::warn!("{name} listener: {}", js_error_message(&err)),
            }
        }
        !targets.is_empty()
    }

    /// Same-origin anchors get a click handler that defers navigation;
    /// cross-origin anchors are left alone.
    fn intercept_links(&mut self, target: Target) -> bool {
        let Target::Selector(selector) = target else {
            return false;
        };
        let anchors = dom::query_all(selector);
        let host = dom::window().location().hostname().unwrap_or_default();
        for anchor in anchors
            .iter()
            .filter_map(|el| el.dyn_ref::<HtmlAnchorElement>())
            .filter(|a| a.hostname() == host)
        {
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                let href = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("href"))
                    .unwrap_or_default();
                dispatch(UiEvent::LinkClicked {
                    href,
                    same_origin: true,
                });
            });
            match anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            {
                Ok(()) => self.listeners.push(closure),
                Err(err) => log::warn!("link listener: {}", js_error_message(&err)),
            }
        }
        !anchors.is_empty()
    }

    fn observe_reveal(&mut self, target: Target) -> bool {
        let Target::Selector(selector) = target else {
            return false;
        };
        let cards = dom::query_all(selector);
        if cards.is_empty() {
            return false;
        }
        match self.build_observer(&cards) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("reveal observer unavailable: {err}");
                false
            }
        }
    }

    fn build_observer(&mut self, cards: &[Element]) -> Result<(), WebError> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(|entries: js_sys::Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let Some(index) = entry
                    .target()
                    .get_attribute(REVEAL_INDEX_ATTR)
                    .and_then(|raw| raw.parse().ok())
                else {
                    continue;
                };
                let ratio = if entry.is_intersecting() {
                    entry.intersection_ratio()
                } else {
                    0.0
                };
                dispatch(UiEvent::CardIntersected { index, ratio });
            }
        });
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(self.layout.reveal_threshold));
        options.set_root_margin(&self.layout.reveal_root_margin());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for (index, card) in cards.iter().enumerate() {
            card.set_attribute(REVEAL_INDEX_ATTR, &index.to_string())?;
            observer.observe(card);
        }
        self.observers.push((observer, callback));
        Ok(())
    }
}

impl EventSource for DomEventSource {
    fn subscribe(&mut self, subscription: &Subscription) -> bool {
        match subscription.action {
            Action::Reveal => self.observe_reveal(subscription.target),
            Action::FollowLink => self.intercept_links(subscription.target),
            _ => self.listen(subscription),
        }
    }
}

fn current_element(event: &Event) -> Option<Element> {
    event.current_target()?.dyn_into::<Element>().ok()
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn input_value(id: &str) -> Option<String> {
    dom::document()
        .get_element_by_id(id)?
        .dyn_into::<HtmlInputElement>()
        .ok()
        .map(|input| input.value())
}

fn select_value(id: &str) -> Option<String> {
    dom::document()
        .get_element_by_id(id)?
        .dyn_into::<HtmlSelectElement>()
        .ok()
        .map(|select| select.value())
}

/// Current state of the shop's filter controls; absent controls read as
/// their neutral value.
#[must_use]
pub fn read_filter() -> FilterQuery {
    let category = select_value("categoryFilter").unwrap_or_else(|| ALL_CATEGORIES.to_string());
    let sort = select_value("sortFilter").map_or(SortKey::None, |v| SortKey::from_value(&v));
    let search = input_value("searchInput").unwrap_or_default();
    FilterQuery::new(&category, &search, sort)
}

fn form_data(event: &Event) -> Option<FormData> {
    let form = current_element(event)?.dyn_into::<HtmlFormElement>().ok()?;
    FormData::new_with_form(&form).ok()
}

fn field(data: &FormData, name: &str) -> String {
    data.get(name).as_string().unwrap_or_default()
}

fn translate(action: Action, index: usize, event: &Event) -> Option<UiEvent> {
    let ui = match action {
        Action::ToggleMenu => UiEvent::MenuToggled,
        Action::CloseMenu => UiEvent::NavLinkClicked,
        Action::Scroll => UiEvent::Scrolled {
            y: dom::window().page_y_offset().unwrap_or(0.0),
            at_ms: event.time_stamp(),
        },
        Action::ScrollToTop => UiEvent::ScrollTopClicked,
        Action::SubmitLogin => {
            event.prevent_default();
            let data = form_data(event)?;
            UiEvent::LoginSubmitted(LoginForm {
                username: field(&data, "username"),
                password: field(&data, "password"),
            })
        }
        Action::SubmitRegister => {
            event.prevent_default();
            let data = form_data(event)?;
            UiEvent::RegisterSubmitted(RegisterForm {
                username: field(&data, "username"),
                email: field(&data, "email"),
                password: field(&data, "password"),
                confirm_password: field(&data, "confirmPassword"),
                terms: !field(&data, "terms").is_empty(),
            })
        }
        Action::FocusField => UiEvent::FieldFocused { field: index },
        Action::BlurField => {
            let empty = current_element(event)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .is_none_or(|input| input.value().is_empty());
            UiEvent::FieldBlurred {
                field: index,
                empty,
            }
        }
        Action::Filter => UiEvent::FilterChanged(read_filter()),
        Action::Buy => {
            let button = current_element(event)?;
            let name = button.get_attribute("data-name")?;
            let unit_price = button
                .get_attribute("data-price")
                .as_deref()
                .and_then(crate::markup::parse_price)?;
            UiEvent::AddToCart { name, unit_price }
        }
        Action::RemoveItem => {
            let button = target_element(event)?.closest(".remove-item").ok()??;
            UiEvent::RemoveFromCart {
                name: button.get_attribute("data-name")?,
            }
        }
        Action::Checkout => UiEvent::CheckoutClicked,
        Action::CloseCart => UiEvent::CartClosed,
        Action::Particles => {
            let el = target_element(event)?;
            let classes = el.class_list();
            if !(classes.contains("btn") || classes.contains("buy-btn")) {
                return None;
            }
            let rect = el.get_bounding_client_rect();
            UiEvent::ButtonClicked {
                x: rect.left() + rect.width() / 2.0,
                y: rect.top() + rect.height() / 2.0,
            }
        }
        Action::ArrowKey => {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            if !matches!(
                key.as_str(),
                "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
            ) {
                return None;
            }
            UiEvent::ArrowKeyPressed
        }
        Action::CopyAddress => UiEvent::CopyAddressClicked,
        Action::HoverCard(hovered) => UiEvent::CardHovered { index, hovered },
        Action::TogglePassword => {
            let target = current_element(event)?.get_attribute("data-target")?;
            UiEvent::PasswordToggled(PasswordField::from_element_id(&target)?)
        }
        Action::Reveal | Action::FollowLink => return None,
    };
    Some(ui)
}

/// Text inputs in the order used for `FieldFocused` indices.
#[must_use]
pub fn text_inputs() -> Vec<Element> {
    dom::query_all(TEXT_INPUT_SELECTOR)
}
