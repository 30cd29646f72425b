//! Centralized timing and tuning constants for the Blockhaven site.
//!
//! These values are the defaults behind [`crate::config::SiteConfig`]. The
//! browser build can override them through `static/site.json`, but every
//! default is reviewed here rather than scattered across handlers.

// Notifications ------------------------------------------------------------
pub(crate) const NOTICE_SLIDE_IN_MS: u32 = 100;
pub(crate) const NOTICE_SLIDE_OUT_MS: u32 = 300;
pub(crate) const NOTICE_AUTO_DISMISS_MS: u32 = 5_000;

// Navigation and layout ----------------------------------------------------
pub(crate) const SCROLL_TOP_THRESHOLD_PX: f64 = 300.0;
pub(crate) const SCROLL_THROTTLE_MS: f64 = 16.0;
pub(crate) const PAGE_TRANSITION_MS: u32 = 300;
pub(crate) const REVEAL_THRESHOLD: f64 = 0.1;
pub(crate) const REVEAL_BOTTOM_MARGIN_PX: i32 = -50;
pub(crate) const REVEAL_OFFSET_PX: u32 = 30;

// Cart and shop ------------------------------------------------------------
pub(crate) const CHECKOUT_PROCESSING_MS: u32 = 2_000;
pub(crate) const FILTER_SETTLE_MS: u32 = 100;
pub(crate) const FILTER_STAGGER_SECS: f64 = 0.1;

// Auth ---------------------------------------------------------------------
pub(crate) const AUTH_PROCESSING_MS: u32 = 1_500;
pub(crate) const AUTH_REDIRECT_MS: u32 = 1_000;
pub(crate) const LOGIN_REDIRECT_URL: &str = "index.html";
pub(crate) const REGISTER_REDIRECT_URL: &str = "login.html";

// Player count -------------------------------------------------------------
pub(crate) const PLAYER_COUNT_INITIAL: u32 = 127;
pub(crate) const PLAYER_COUNT_MIN: u32 = 100;
pub(crate) const PLAYER_COUNT_MAX: u32 = 150;
pub(crate) const PLAYER_COUNT_STEP: u32 = 5;
pub(crate) const PLAYER_COUNT_INTERVAL_MS: u32 = 5_000;
pub(crate) const PLAYER_COUNT_PULSE_MS: u32 = 200;

// Particles ----------------------------------------------------------------
pub(crate) const PARTICLE_COUNT: usize = 8;
pub(crate) const PARTICLE_VELOCITY: f64 = 50.0;
pub(crate) const PARTICLE_FRAME_SCALE: f64 = 0.1;
pub(crate) const PARTICLE_FADE_PER_FRAME: f64 = 0.02;

// Site ---------------------------------------------------------------------
pub(crate) const SERVER_ADDRESS: &str = "play.myserver.com";
pub(crate) const NUMBER_LOCALE: &str = "fa-IR";
pub(crate) const DEFAULT_LANG: &str = "fa";
