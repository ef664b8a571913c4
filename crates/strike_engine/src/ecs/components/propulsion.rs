//! Propulsion component for thrust and turning

use crate::foundation::math::Vec2;

/// Component converting throttle input into acceleration
///
/// Throttle values are normalized to [-1, 1] per axis; the propulsion
/// system scales them by `linear_accel` and `turn_rate`. Keyboard hooks and
/// the behavior system both write throttles here.
pub struct Propulsion {
    /// Thrust acceleration in units per second squared at full throttle
    pub linear_accel: f32,

    /// Turn speed in radians per second at full throttle
    pub turn_rate: f32,

    /// Linear throttle per axis, clamped to [-1, 1]
    pub linear_throttle: Vec2,

    /// Angular throttle, clamped to [-1, 1]
    pub angular_throttle: f32,

    /// Interpret the linear throttle in the owner's local frame
    /// (rotated by its angle) instead of world axes
    pub directed: bool,

    /// Particle effect emitted while thrusting
    pub exhaust_effect: Option<String>,
}

impl Propulsion {
    /// Create an idle propulsion unit
    pub fn new(linear_accel: f32, turn_rate: f32) -> Self {
        Self {
            linear_accel,
            turn_rate,
            linear_throttle: Vec2::zeros(),
            angular_throttle: 0.0,
            directed: false,
            exhaust_effect: None,
        }
    }
}
