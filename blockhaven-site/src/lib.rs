//! Blockhaven Site Core
//!
//! Platform-agnostic behavior for the Blockhaven server website: cart,
//! product filtering, notifications, simulated auth, and the controller that
//! ties them to DOM events. This crate has no web dependencies; the browser
//! glue lives in `blockhaven-web`.

pub mod auth;
pub mod cart;
pub mod config;
pub(crate) mod constants;
pub mod controller;
pub mod effects;
pub mod events;
pub mod i18n;
pub mod money;
pub mod notify;
pub mod numbers;
pub mod player_count;
pub mod products;
pub mod routes;
pub mod throttle;
pub mod timer;

// Re-export commonly used types
pub use auth::{AuthError, AuthForm, LoginForm, PasswordField, RegisterForm};
pub use cart::{Cart, CartError, CartItem, CartLineView, CartView};
pub use config::{ConfigError, SiteConfig};
pub use controller::{Deferred, Effect, PriceFormatter, SiteController, SiteState, SoundCue};
pub use effects::{ParticleBurst, REVEAL_SELECTOR, RevealTracker};
pub use events::{Action, EventSource, Subscription, Target, Topic, UiEvent, subscriptions_for};
pub use i18n::{Catalog, CatalogError};
pub use money::format_price;
pub use notify::{NoticeId, NoticeKind, NoticeView, NotificationCenter};
pub use player_count::PlayerCount;
pub use products::{ALL_CATEGORIES, FilterQuery, Product, SortKey, filter_products};
pub use routes::Page;
pub use throttle::{Throttle, Throttled, throttle};
pub use timer::{Scheduler, TimerHandle, VirtualScheduler};

/// Controller on virtual time with default config and the Persian catalog.
#[must_use]
pub fn virtual_site(seed: u64) -> SiteController<VirtualScheduler<Deferred>> {
    SiteController::virtual_time(SiteConfig::default_config(), Catalog::default_catalog(), seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recording(Vec<Subscription>);

    impl EventSource for Recording {
        fn subscribe(&mut self, subscription: &Subscription) -> bool {
            self.0.push(*subscription);
            true
        }
    }

    #[test]
    fn boot_subscribes_the_whole_wiring_table() {
        let mut site = virtual_site(1);
        let mut source = Recording(Vec::new());
        site.boot(Page::Shop, &mut source);
        assert_eq!(source.0, subscriptions_for(Page::Shop));
        assert_eq!(site.state().page, Page::Shop);
    }
}
