//! Event-subscription interface between the DOM and the controller.
//!
//! [`subscriptions_for`] is the single wiring table: which element listens to
//! which DOM event, and what the controller should do about it. A browser
//! [`EventSource`] attaches real listeners; tests substitute a recording one.
use serde::{Deserialize, Serialize};

use crate::auth::{LoginForm, PasswordField, RegisterForm};
use crate::effects::REVEAL_SELECTOR;
use crate::notify::NoticeId;
use crate::products::FilterQuery;
use crate::routes::Page;

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Target {
    Window,
    Document,
    /// Every element matching the CSS selector.
    Selector(&'static str),
}

/// DOM event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Click,
    Scroll,
    Input,
    Change,
    Submit,
    Focus,
    Blur,
    MouseEnter,
    MouseLeave,
    KeyDown,
    /// Visibility reports from an intersection observer.
    Intersect,
}

impl Topic {
    /// DOM event name, where one exists.
    #[must_use]
    pub const fn event_name(self) -> Option<&'static str> {
        match self {
            Self::Click => Some("click"),
            Self::Scroll => Some("scroll"),
            Self::Input => Some("input"),
            Self::Change => Some("change"),
            Self::Submit => Some("submit"),
            Self::Focus => Some("focus"),
            Self::Blur => Some("blur"),
            Self::MouseEnter => Some("mouseenter"),
            Self::MouseLeave => Some("mouseleave"),
            Self::KeyDown => Some("keydown"),
            Self::Intersect => None,
        }
    }
}

/// Controller behavior a subscription feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    ToggleMenu,
    CloseMenu,
    Scroll,
    ScrollToTop,
    Reveal,
    FollowLink,
    SubmitLogin,
    SubmitRegister,
    FocusField,
    BlurField,
    Filter,
    Buy,
    RemoveItem,
    Checkout,
    CloseCart,
    Particles,
    ArrowKey,
    CopyAddress,
    HoverCard(bool),
    TogglePassword,
}

/// One row of the wiring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Subscription {
    pub target: Target,
    pub topic: Topic,
    pub action: Action,
}

impl Subscription {
    #[must_use]
    pub const fn new(target: Target, topic: Topic, action: Action) -> Self {
        Self {
            target,
            topic,
            action,
        }
    }
}

/// Something that can attach listeners for a [`Subscription`].
pub trait EventSource {
    /// Attach the listener. Returns `false` when the target is absent, which
    /// callers treat as a silent skip.
    fn subscribe(&mut self, subscription: &Subscription) -> bool;
}

pub const TEXT_INPUT_SELECTOR: &str =
    r#"input[type="text"], input[type="email"], input[type="password"]"#;

const fn sub(target: &'static str, topic: Topic, action: Action) -> Subscription {
    Subscription::new(Target::Selector(target), topic, action)
}

/// Wiring shared by every page; absent elements are skipped.
const COMMON: &[Subscription] = &[
    sub(".hamburger", Topic::Click, Action::ToggleMenu),
    sub(".nav-link", Topic::Click, Action::CloseMenu),
    Subscription::new(Target::Window, Topic::Scroll, Action::Scroll),
    sub("#scrollTop", Topic::Click, Action::ScrollToTop),
    sub(REVEAL_SELECTOR, Topic::Intersect, Action::Reveal),
    sub("#loginForm", Topic::Submit, Action::SubmitLogin),
    sub("#registerForm", Topic::Submit, Action::SubmitRegister),
    sub(TEXT_INPUT_SELECTOR, Topic::Focus, Action::FocusField),
    sub(TEXT_INPUT_SELECTOR, Topic::Blur, Action::BlurField),
    sub("#categoryFilter", Topic::Change, Action::Filter),
    sub("#sortFilter", Topic::Change, Action::Filter),
    sub("#searchInput", Topic::Input, Action::Filter),
    sub("a[href]", Topic::Click, Action::FollowLink),
    sub(r#"[data-action="buy"]"#, Topic::Click, Action::Buy),
    sub("#cartItems", Topic::Click, Action::RemoveItem),
    sub(r#"[data-action="checkout"]"#, Topic::Click, Action::Checkout),
    sub(r#"[data-action="close-cart"]"#, Topic::Click, Action::CloseCart),
    Subscription::new(Target::Document, Topic::Click, Action::Particles),
    Subscription::new(Target::Document, Topic::KeyDown, Action::ArrowKey),
];

const HOME: &[Subscription] = &[sub(
    r#"[data-action="copy-ip"]"#,
    Topic::Click,
    Action::CopyAddress,
)];

/// Same cards, same order, as the product list read at boot.
pub const PRODUCT_CARDS: &str = "#productsGrid > .product-card";

const SHOP: &[Subscription] = &[
    sub(PRODUCT_CARDS, Topic::MouseEnter, Action::HoverCard(true)),
    sub(PRODUCT_CARDS, Topic::MouseLeave, Action::HoverCard(false)),
];

const AUTH: &[Subscription] = &[sub(
    r#"[data-action="toggle-password"]"#,
    Topic::Click,
    Action::TogglePassword,
)];

/// Full wiring table for `page`.
#[must_use]
pub fn subscriptions_for(page: Page) -> Vec<Subscription> {
    let extra = match page {
        Page::Home => HOME,
        Page::Shop => SHOP,
        Page::Login | Page::Register => AUTH,
    };
    COMMON.iter().chain(extra).copied().collect()
}

/// Everything the DOM can report to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    MenuToggled,
    NavLinkClicked,
    /// `at_ms` is the event timestamp used by the scroll throttle.
    Scrolled {
        y: f64,
        at_ms: f64,
    },
    ScrollTopClicked,
    LinkClicked {
        href: String,
        same_origin: bool,
    },
    CardIntersected {
        index: usize,
        ratio: f64,
    },
    AddToCart {
        name: String,
        unit_price: i64,
    },
    RemoveFromCart {
        name: String,
    },
    CheckoutClicked,
    CartClosed,
    FilterChanged(FilterQuery),
    LoginSubmitted(LoginForm),
    RegisterSubmitted(RegisterForm),
    CopyAddressClicked,
    ClipboardWritten {
        ok: bool,
    },
    /// A `.btn`/`.buy-btn` was clicked; coordinates are the element center.
    ButtonClicked {
        x: f64,
        y: f64,
    },
    NoticeCloseClicked(NoticeId),
    FieldFocused {
        field: usize,
    },
    FieldBlurred {
        field: usize,
        empty: bool,
    },
    PasswordToggled(PasswordField),
    CardHovered {
        index: usize,
        hovered: bool,
    },
    ArrowKeyPressed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_gets_common_wiring() {
        for page in [Page::Home, Page::Shop, Page::Login, Page::Register] {
            let subs = subscriptions_for(page);
            assert!(subs.starts_with(COMMON));
            assert!(
                subs.iter()
                    .any(|s| s.target == Target::Window && s.action == Action::Scroll)
            );
        }
    }

    #[test]
    fn page_specific_wiring_is_exclusive() {
        let has = |page, action| subscriptions_for(page).iter().any(|s| s.action == action);
        assert!(has(Page::Home, Action::CopyAddress));
        assert!(!has(Page::Shop, Action::CopyAddress));
        assert!(has(Page::Shop, Action::HoverCard(true)));
        assert!(has(Page::Login, Action::TogglePassword));
        assert!(has(Page::Register, Action::TogglePassword));
        assert!(!has(Page::Home, Action::TogglePassword));
    }

    #[test]
    fn wiring_rows_serialize_for_diagnostics() {
        let hover = SHOP[0];
        let json = serde_json::to_value(hover).unwrap();
        assert_eq!(json["target"]["Selector"], PRODUCT_CARDS);
        assert_eq!(json["topic"], "MouseEnter");
        assert_eq!(json["action"]["HoverCard"], true);
    }

    #[test]
    fn only_intersect_lacks_a_dom_event_name() {
        assert_eq!(Topic::Intersect.event_name(), None);
        assert_eq!(Topic::MouseEnter.event_name(), Some("mouseenter"));
    }
}
