//! Radial particle burst spawned on button clicks.
use serde::Serialize;

use crate::config::ParticleConfig;
use crate::numbers::usize_to_f64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
}

/// A burst of particles fading out together, one [`ParticleBurst::step`] per
/// animation frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleBurst {
    particles: Vec<Particle>,
    opacity: f64,
    frame_scale: f64,
    fade_per_frame: f64,
}

impl ParticleBurst {
    /// Spread `cfg.count` particles evenly around `(center_x, center_y)`.
    #[must_use]
    pub fn new(center_x: f64, center_y: f64, cfg: &ParticleConfig) -> Self {
        let count = usize_to_f64(cfg.count.max(1));
        let particles = (0..cfg.count)
            .map(|i| {
                let angle = usize_to_f64(i) / count * std::f64::consts::TAU;
                Particle {
                    x: center_x,
                    y: center_y,
                    vx: angle.cos() * cfg.velocity,
                    vy: angle.sin() * cfg.velocity,
                }
            })
            .collect();
        Self {
            particles,
            opacity: 1.0,
            frame_scale: cfg.frame_scale,
            fade_per_frame: cfg.fade_per_frame,
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Opacity applied this frame.
    #[must_use]
    pub const fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Advance one frame. Returns `false` once the burst has faded and its
    /// elements should be removed.
    pub fn step(&mut self) -> bool {
        for p in &mut self.particles {
            p.x += p.vx * self.frame_scale;
            p.y += p.vy * self.frame_scale;
        }
        self.opacity -= self.fade_per_frame;
        self.opacity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_particle_moves_right_by_five_pixels() {
        let mut burst = ParticleBurst::new(100.0, 50.0, &ParticleConfig::default());
        assert_eq!(burst.particles().len(), 8);
        assert!(burst.step());
        let first = burst.particles()[0];
        assert!((first.x - 105.0).abs() < 1e-9);
        assert!((first.y - 50.0).abs() < 1e-9);
        let quarter = burst.particles()[2];
        assert!((quarter.x - 100.0).abs() < 1e-9);
        assert!((quarter.y - 55.0).abs() < 1e-9);
    }

    #[test]
    fn burst_fades_out_in_about_fifty_frames() {
        let mut burst = ParticleBurst::new(0.0, 0.0, &ParticleConfig::default());
        let mut frames = 1;
        while burst.step() {
            frames += 1;
            assert!(frames < 100, "burst never faded");
        }
        assert!((49..=51).contains(&frames));
    }
}
