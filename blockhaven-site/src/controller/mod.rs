//! The coordinating controller that owns all site state.
//!
//! Every DOM event arrives as a [`UiEvent`]; [`SiteController::handle`]
//! mutates [`SiteState`] and returns the [`Effect`]s the DOM should apply.
//! Delayed work is handed to a [`Scheduler`] as [`Deferred`] payloads and comes
//! back through [`SiteController::fire`].
mod auth;
mod cart;
mod home;
mod layout;
mod notices;
mod shop;

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::auth::{AuthForm, LoginForm, PasswordField};
use crate::cart::{Cart, CartView};
use crate::config::SiteConfig;
use crate::effects::{ParticleBurst, RevealTracker};
use crate::events::{Action, EventSource, UiEvent, subscriptions_for};
use crate::i18n::Catalog;
use crate::money::format_price;
use crate::notify::{NoticeId, NoticeView, NotificationCenter};
use crate::player_count::PlayerCount;
use crate::products::{FilterQuery, Product};
use crate::routes::Page;
use crate::throttle::Throttle;
use crate::timer::{Scheduler, VirtualScheduler};

/// Renders an integer amount as a display price.
pub type PriceFormatter = Box<dyn Fn(i64) -> String>;

/// Sound cues; the browser layer only logs them for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    BlockBreak,
}

impl SoundCue {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlockBreak => "block_break",
        }
    }
}

/// A DOM mutation requested by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Effect {
    /// Insert the notice off-screen.
    ShowNotice(NoticeView),
    SlideInNotice(NoticeId),
    SlideOutNotice(NoticeId),
    RemoveNotice(NoticeId),
    SetMenuOpen(bool),
    SetScrollTopVisible(bool),
    ScrollToTop,
    /// Hide every reveal card, offset down by the given pixels.
    PrepareReveal(u32),
    RevealCard(usize),
    ShowPageTransition,
    Navigate(String),
    RenderCart(CartView),
    /// `Some(label)` disables the checkout control and shows `label`;
    /// `None` restores its original label and enables it.
    SetCheckoutBusy(Option<String>),
    HideCart,
    /// Show exactly these product indices, in this order; hide the rest.
    LayoutProducts(Vec<usize>),
    /// `(product index, animation delay in seconds)`.
    AnimateProducts(Vec<(usize, f64)>),
    SetAuthLoading {
        form: AuthForm,
        loading: bool,
    },
    CopyText(String),
    SetPlayerCount(u32),
    PulsePlayerCount(bool),
    SpawnParticles(ParticleBurst),
    SetFieldFocused {
        field: usize,
        focused: bool,
    },
    SetPasswordVisible {
        field: PasswordField,
        visible: bool,
        glyph: String,
    },
    LiftCard {
        index: usize,
        lifted: bool,
    },
    PlaySound(SoundCue),
}

/// Work scheduled for later.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    SlideInNotice(NoticeId),
    AutoDismissNotice(NoticeId),
    RemoveNotice(NoticeId),
    Navigate(String),
    CompleteCheckout,
    SettleLogin(LoginForm),
    SettleRegister,
    AnimateProducts(Vec<usize>),
    PlayerTick,
    EndPlayerPulse,
}

/// Everything the page remembers between events.
#[derive(Debug, Clone)]
pub struct SiteState {
    pub page: Page,
    pub cart: Cart,
    pub notices: NotificationCenter,
    pub player_count: PlayerCount,
    pub menu_open: bool,
    pub scroll_top_visible: bool,
    /// Scroll callbacks admitted by the throttle.
    pub scroll_frames: u64,
    pub reveal: RevealTracker,
    pub products: Vec<Product>,
    pub filter: FilterQuery,
    pub checkout_busy: bool,
    pub loading: HashSet<AuthForm>,
    pub visible_passwords: HashSet<PasswordField>,
}

impl SiteState {
    #[must_use]
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            page: Page::Home,
            cart: Cart::new(),
            notices: NotificationCenter::new(),
            player_count: PlayerCount::new(&config.player_count),
            menu_open: false,
            scroll_top_visible: false,
            scroll_frames: 0,
            reveal: RevealTracker::new(config.layout.reveal_threshold),
            products: Vec::new(),
            filter: FilterQuery::default(),
            checkout_busy: false,
            loading: HashSet::new(),
            visible_passwords: HashSet::new(),
        }
    }
}

/// Owns the state, the timers, and the message catalog for one page load.
pub struct SiteController<S: Scheduler<Deferred>> {
    state: SiteState,
    scheduler: S,
    rng: SmallRng,
    catalog: Catalog,
    config: SiteConfig,
    scroll_gate: Throttle,
    format_price: PriceFormatter,
}

impl<S: Scheduler<Deferred>> SiteController<S> {
    /// Build a controller with the host price formatter.
    #[must_use]
    pub fn new(config: SiteConfig, catalog: Catalog, scheduler: S, seed: u64) -> Self {
        let suffix = catalog.t("price.suffix");
        let formatter: PriceFormatter = Box::new(move |amount| format_price(amount, &suffix));
        Self::with_formatter(config, catalog, scheduler, seed, formatter)
    }

    /// Build a controller with a custom price formatter (the browser passes
    /// an `Intl.NumberFormat` backed one).
    #[must_use]
    pub fn with_formatter(
        config: SiteConfig,
        catalog: Catalog,
        scheduler: S,
        seed: u64,
        format_price: PriceFormatter,
    ) -> Self {
        Self {
            state: SiteState::new(&config),
            scroll_gate: Throttle::new(config.layout.scroll_throttle_ms),
            scheduler,
            rng: SmallRng::seed_from_u64(seed),
            catalog,
            config,
            format_price,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SiteState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Product cards read from the page markup, in document order.
    pub fn load_products(&mut self, products: Vec<Product>) {
        self.state.products = products;
    }

    /// Filter control values as the page loaded; the shop's first layout
    /// uses them.
    pub fn set_filter(&mut self, query: FilterQuery) {
        self.state.filter = query;
    }

    #[must_use]
    pub fn price(&self, amount: i64) -> String {
        (self.format_price)(amount)
    }

    /// Wire every subscription for `page` into `source`, then run the page's
    /// start-up actions.
    pub fn boot<E: EventSource + ?Sized>(&mut self, page: Page, source: &mut E) -> Vec<Effect> {
        self.state.page = page;
        let mut wired = HashSet::new();
        for subscription in subscriptions_for(page) {
            if source.subscribe(&subscription) {
                wired.insert(subscription.action);
            } else {
                log::debug!(
                    "skipping {:?} on {:?}: target absent",
                    subscription.action,
                    subscription.target
                );
            }
        }
        log::info!("booted {page:?} page with {} bound actions", wired.len());

        let mut effects = Vec::new();
        if wired.contains(&Action::Reveal) {
            effects.push(Effect::PrepareReveal(self.config.layout.reveal_offset_px));
        }
        effects.extend(self.tick_player_count());
        match page {
            Page::Home => {
                self.scheduler
                    .schedule(self.config.player_count.interval_ms, Deferred::PlayerTick);
            }
            Page::Shop => effects.extend(self.apply_filter(self.state.filter.clone())),
            Page::Login | Page::Register => {}
        }
        effects
    }

    /// Handle one DOM event.
    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        log::debug!("event {event:?}");
        match event {
            UiEvent::MenuToggled => self.toggle_menu(),
            UiEvent::NavLinkClicked => self.close_menu(),
            UiEvent::Scrolled { y, at_ms } => self.on_scroll(y, at_ms),
            UiEvent::ScrollTopClicked => vec![Effect::ScrollToTop],
            UiEvent::LinkClicked { href, same_origin } => self.follow_link(href, same_origin),
            UiEvent::CardIntersected { index, ratio } => self.reveal(index, ratio),
            UiEvent::AddToCart { name, unit_price } => self.add_to_cart(&name, unit_price),
            UiEvent::RemoveFromCart { name } => self.remove_from_cart(&name),
            UiEvent::CheckoutClicked => self.checkout(),
            UiEvent::CartClosed => vec![Effect::HideCart],
            UiEvent::FilterChanged(query) => self.apply_filter(query),
            UiEvent::LoginSubmitted(form) => self.submit_login(form),
            UiEvent::RegisterSubmitted(form) => self.submit_register(&form),
            UiEvent::CopyAddressClicked => vec![Effect::CopyText(self.config.server_address.clone())],
            UiEvent::ClipboardWritten { ok } => self.clipboard_written(ok),
            UiEvent::ButtonClicked { x, y } => vec![Effect::SpawnParticles(ParticleBurst::new(
                x,
                y,
                &self.config.particles,
            ))],
            UiEvent::NoticeCloseClicked(id) => self.close_notice(id),
            UiEvent::FieldFocused { field } => vec![Effect::SetFieldFocused {
                field,
                focused: true,
            }],
            UiEvent::FieldBlurred { field, empty } => {
                if empty {
                    vec![Effect::SetFieldFocused {
                        field,
                        focused: false,
                    }]
                } else {
                    Vec::new()
                }
            }
            UiEvent::PasswordToggled(field) => self.toggle_password(field),
            UiEvent::CardHovered { index, hovered } => vec![Effect::LiftCard {
                index,
                lifted: hovered,
            }],
            UiEvent::ArrowKeyPressed => vec![Effect::PlaySound(SoundCue::BlockBreak)],
        }
    }

    /// Run a task whose timer elapsed.
    pub fn fire(&mut self, task: Deferred) -> Vec<Effect> {
        log::debug!("timer {task:?}");
        match task {
            Deferred::SlideInNotice(id) => self.slide_in_notice(id),
            Deferred::AutoDismissNotice(id) => self.auto_dismiss_notice(id),
            Deferred::RemoveNotice(id) => self.remove_notice(id),
            Deferred::Navigate(href) => vec![Effect::Navigate(href)],
            Deferred::CompleteCheckout => self.complete_checkout(),
            Deferred::SettleLogin(form) => self.settle_login(&form),
            Deferred::SettleRegister => self.settle_register(),
            Deferred::AnimateProducts(order) => vec![Effect::AnimateProducts(
                crate::products::stagger(&order, self.config.shop.filter_stagger_secs),
            )],
            Deferred::PlayerTick => {
                self.scheduler
                    .schedule(self.config.player_count.interval_ms, Deferred::PlayerTick);
                self.tick_player_count()
            }
            Deferred::EndPlayerPulse => vec![Effect::PulsePlayerCount(false)],
        }
    }
}

impl SiteController<VirtualScheduler<Deferred>> {
    /// Controller on virtual time, for tests and the QA tester.
    #[must_use]
    pub fn virtual_time(config: SiteConfig, catalog: Catalog, seed: u64) -> Self {
        Self::new(config, catalog, VirtualScheduler::new(), seed)
    }

    /// Advance virtual time by `ms`, firing every task that comes due,
    /// including ones scheduled by tasks fired along the way.
    pub fn advance(&mut self, ms: u64) -> Vec<Effect> {
        let until = self.scheduler.now_ms() + ms;
        let mut effects = Vec::new();
        while let Some(task) = self.scheduler.pop_due(until) {
            effects.extend(self.fire(task));
        }
        self.scheduler.set_now(until);
        effects
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Subscription;

    struct Everything;

    impl EventSource for Everything {
        fn subscribe(&mut self, _subscription: &Subscription) -> bool {
            true
        }
    }

    struct Nothing;

    impl EventSource for Nothing {
        fn subscribe(&mut self, _subscription: &Subscription) -> bool {
            false
        }
    }

    fn controller() -> SiteController<VirtualScheduler<Deferred>> {
        SiteController::virtual_time(SiteConfig::default_config(), Catalog::default_catalog(), 7)
    }

    #[test]
    fn home_boot_schedules_the_player_walk() {
        let mut site = controller();
        let effects = site.boot(Page::Home, &mut Everything);
        assert_eq!(effects[0], Effect::PrepareReveal(30));
        assert!(matches!(effects[1], Effect::SetPlayerCount(_)));
        let ticks = site.advance(5_000);
        assert!(ticks.iter().any(|e| matches!(e, Effect::SetPlayerCount(_))));
        assert!(site.scheduler().pending() >= 1);
    }

    #[test]
    fn missing_targets_skip_reveal_setup() {
        let mut site = controller();
        let effects = site.boot(Page::Login, &mut Nothing);
        assert!(!effects.contains(&Effect::PrepareReveal(30)));
    }

    #[test]
    fn arrow_keys_cue_a_sound() {
        let mut site = controller();
        assert_eq!(
            site.handle(UiEvent::ArrowKeyPressed),
            vec![Effect::PlaySound(SoundCue::BlockBreak)]
        );
    }

    #[test]
    fn blur_keeps_focus_style_on_filled_fields() {
        let mut site = controller();
        assert!(
            site.handle(UiEvent::FieldBlurred {
                field: 0,
                empty: false
            })
            .is_empty()
        );
        assert_eq!(
            site.handle(UiEvent::FieldBlurred {
                field: 0,
                empty: true
            }),
            vec![Effect::SetFieldFocused {
                field: 0,
                focused: false
            }]
        );
    }
}
