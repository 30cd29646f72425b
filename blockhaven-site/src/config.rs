//! Site configuration with defaults and JSON overrides.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AUTH_PROCESSING_MS, AUTH_REDIRECT_MS, CHECKOUT_PROCESSING_MS, DEFAULT_LANG, FILTER_SETTLE_MS,
    FILTER_STAGGER_SECS, LOGIN_REDIRECT_URL, NOTICE_AUTO_DISMISS_MS, NOTICE_SLIDE_IN_MS,
    NOTICE_SLIDE_OUT_MS, NUMBER_LOCALE, PAGE_TRANSITION_MS, PARTICLE_COUNT, PARTICLE_FADE_PER_FRAME,
    PARTICLE_FRAME_SCALE, PARTICLE_VELOCITY, PLAYER_COUNT_INITIAL, PLAYER_COUNT_INTERVAL_MS,
    PLAYER_COUNT_MAX, PLAYER_COUNT_MIN, PLAYER_COUNT_PULSE_MS, PLAYER_COUNT_STEP,
    REGISTER_REDIRECT_URL, REVEAL_BOTTOM_MARGIN_PX, REVEAL_OFFSET_PX, REVEAL_THRESHOLD,
    SCROLL_THROTTLE_MS, SCROLL_TOP_THRESHOLD_PX, SERVER_ADDRESS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} bounds invalid (min {min} > max {max})")]
    InvertedBounds {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Notification lifecycle timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeTiming {
    pub slide_in_ms: u32,
    pub slide_out_ms: u32,
    pub auto_dismiss_ms: u32,
}

impl Default for NoticeTiming {
    fn default() -> Self {
        Self {
            slide_in_ms: NOTICE_SLIDE_IN_MS,
            slide_out_ms: NOTICE_SLIDE_OUT_MS,
            auto_dismiss_ms: NOTICE_AUTO_DISMISS_MS,
        }
    }
}

/// Scroll, reveal, and page-transition tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub scroll_top_threshold_px: f64,
    pub scroll_throttle_ms: f64,
    pub page_transition_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: i32,
    pub reveal_offset_px: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scroll_top_threshold_px: SCROLL_TOP_THRESHOLD_PX,
            scroll_throttle_ms: SCROLL_THROTTLE_MS,
            page_transition_ms: PAGE_TRANSITION_MS,
            reveal_threshold: REVEAL_THRESHOLD,
            reveal_bottom_margin_px: REVEAL_BOTTOM_MARGIN_PX,
            reveal_offset_px: REVEAL_OFFSET_PX,
        }
    }
}

impl LayoutConfig {
    /// Root margin string for an `IntersectionObserver`.
    #[must_use]
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.reveal_bottom_margin_px)
    }
}

/// Shop timings: checkout simulation and filter animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopTiming {
    pub checkout_processing_ms: u32,
    pub filter_settle_ms: u32,
    pub filter_stagger_secs: f64,
}

impl Default for ShopTiming {
    fn default() -> Self {
        Self {
            checkout_processing_ms: CHECKOUT_PROCESSING_MS,
            filter_settle_ms: FILTER_SETTLE_MS,
            filter_stagger_secs: FILTER_STAGGER_SECS,
        }
    }
}

/// Simulated auth round-trip timings and redirect targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthTiming {
    pub processing_ms: u32,
    pub redirect_ms: u32,
    pub login_redirect: String,
    pub register_redirect: String,
}

impl Default for AuthTiming {
    fn default() -> Self {
        Self {
            processing_ms: AUTH_PROCESSING_MS,
            redirect_ms: AUTH_REDIRECT_MS,
            login_redirect: LOGIN_REDIRECT_URL.to_string(),
            register_redirect: REGISTER_REDIRECT_URL.to_string(),
        }
    }
}

/// Cosmetic player-count random walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerCountConfig {
    pub initial: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub interval_ms: u32,
    pub pulse_ms: u32,
}

impl Default for PlayerCountConfig {
    fn default() -> Self {
        Self {
            initial: PLAYER_COUNT_INITIAL,
            min: PLAYER_COUNT_MIN,
            max: PLAYER_COUNT_MAX,
            step: PLAYER_COUNT_STEP,
            interval_ms: PLAYER_COUNT_INTERVAL_MS,
            pulse_ms: PLAYER_COUNT_PULSE_MS,
        }
    }
}

/// Button particle burst parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub velocity: f64,
    pub frame_scale: f64,
    pub fade_per_frame: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            velocity: PARTICLE_VELOCITY,
            frame_scale: PARTICLE_FRAME_SCALE,
            fade_per_frame: PARTICLE_FADE_PER_FRAME,
        }
    }
}

/// Every tunable the site scripts read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server_address: String,
    pub number_locale: String,
    pub default_lang: String,
    pub notices: NoticeTiming,
    pub layout: LayoutConfig,
    pub shop: ShopTiming,
    pub auth: AuthTiming,
    pub player_count: PlayerCountConfig,
    pub particles: ParticleConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl SiteConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            server_address: SERVER_ADDRESS.to_string(),
            number_locale: NUMBER_LOCALE.to_string(),
            default_lang: DEFAULT_LANG.to_string(),
            notices: NoticeTiming::default(),
            layout: LayoutConfig::default(),
            shop: ShopTiming::default(),
            auth: AuthTiming::default(),
            player_count: PlayerCountConfig::default(),
            particles: ParticleConfig::default(),
        }
    }

    /// Parse a (possibly partial) JSON override on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the resulting values fail
    /// [`SiteConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check bounds that would make the timers or the random walk misbehave.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pc = &self.player_count;
        if pc.min > pc.max {
            return Err(ConfigError::InvertedBounds {
                field: "player_count",
                min: pc.min,
                max: pc.max,
            });
        }
        if !(pc.min..=pc.max).contains(&pc.initial) {
            return Err(ConfigError::OutOfRange {
                field: "player_count.initial",
                min: pc.min,
                max: pc.max,
                value: pc.initial,
            });
        }
        if pc.interval_ms == 0 {
            return Err(ConfigError::Zero {
                field: "player_count.interval_ms",
            });
        }
        if self.notices.auto_dismiss_ms == 0 {
            return Err(ConfigError::Zero {
                field: "notices.auto_dismiss_ms",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_timings() {
        let cfg = SiteConfig::default_config();
        assert_eq!(cfg.notices.auto_dismiss_ms, 5_000);
        assert_eq!(cfg.shop.checkout_processing_ms, 2_000);
        assert_eq!(cfg.auth.processing_ms, 1_500);
        assert_eq!(cfg.layout.page_transition_ms, 300);
        assert_eq!(cfg.server_address, "play.myserver.com");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let cfg = SiteConfig::from_json(r#"{"server_address":"mc.example.org","player_count":{"initial":120}}"#)
            .expect("partial config parses");
        assert_eq!(cfg.server_address, "mc.example.org");
        assert_eq!(cfg.player_count.initial, 120);
        assert_eq!(cfg.player_count.max, 150);
        assert_eq!(cfg.notices, NoticeTiming::default());
    }

    #[test]
    fn inverted_player_bounds_are_rejected() {
        let err = SiteConfig::from_json(r#"{"player_count":{"min":200,"max":150,"initial":180}}"#)
            .expect_err("inverted bounds");
        assert!(matches!(err, ConfigError::InvertedBounds { .. }));
    }

    #[test]
    fn initial_outside_bounds_is_rejected() {
        let err = SiteConfig::from_json(r#"{"player_count":{"initial":99}}"#)
            .expect_err("initial below min");
        assert!(err.to_string().contains("player_count.initial"));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = SiteConfig::from_json("{not json").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn root_margin_uses_bottom_offset() {
        assert_eq!(LayoutConfig::default().reveal_root_margin(), "0px 0px -50px 0px");
    }
}
