//! Decorative effects with no state worth persisting.
pub mod particles;
pub mod reveal;

pub use particles::{Particle, ParticleBurst};
pub use reveal::{REVEAL_SELECTOR, RevealTracker, reveal_style};
