//! Cosmetic online-player counter.
use rand::Rng;

use crate::config::PlayerCountConfig;
use crate::numbers::clamp_i64_to_u32;

/// Bounded random walk shown on the home page. No real server is queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCount {
    value: u32,
    min: u32,
    max: u32,
    step: u32,
}

impl PlayerCount {
    #[must_use]
    pub fn new(cfg: &PlayerCountConfig) -> Self {
        Self {
            value: cfg.initial.clamp(cfg.min, cfg.max),
            min: cfg.min,
            max: cfg.max,
            step: cfg.step,
        }
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Move by a uniform step in `[-step, +step]`, clamped to the bounds.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let step = i64::from(self.step);
        let delta = rng.gen_range(-step..=step);
        let next = (i64::from(self.value) + delta).clamp(i64::from(self.min), i64::from(self.max));
        self.value = clamp_i64_to_u32(next);
        self.value
    }
}
