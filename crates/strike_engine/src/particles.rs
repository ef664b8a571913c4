//! Particle backend seam
//!
//! Effects are fire-and-forget: the core names an effect and a position,
//! the backend owns everything visual about it.

use crate::foundation::math::Vec2;

/// Receives particle effect triggers from systems and hooks
pub trait ParticleBackend {
    /// Spawn `count` emissions of the named effect at `position`
    ///
    /// `elapsed` is the frame's delta time, for backends that scale
    /// emission by frame length.
    fn spawn(&mut self, effect: &str, elapsed: f32, count: u32, position: Vec2);
}

/// Backend that drops every effect
pub struct NullParticles;

impl ParticleBackend for NullParticles {
    fn spawn(&mut self, _effect: &str, _elapsed: f32, _count: u32, _position: Vec2) {}
}
