//! Body component for entities that move under the physics step
//!
//! Carries the velocity and mass the collision system needs for elastic
//! momentum exchange, plus the integration parameters applied every frame.

use crate::foundation::math::Vec2;

/// Component for entities with mass and velocity
#[derive(Debug, Clone)]
pub struct Body {
    /// Mass in arbitrary units; must be positive for elastic collisions
    pub mass: f32,

    /// Linear velocity in units per second
    pub velocity: Vec2,

    /// Maximum speed limit (0 = no limit)
    pub max_speed: f32,

    /// Velocity damping factor per second (0 = none)
    pub deceleration: f32,

    /// Despawn the owner once it leaves the level bounds
    pub destroy_on_exit: bool,
}

impl Body {
    /// Create a resting body of the given mass
    pub fn new(mass: f32) -> Self {
        Self {
            mass,
            velocity: Vec2::zeros(),
            max_speed: 0.0,
            deceleration: 0.0,
            destroy_on_exit: false,
        }
    }

    /// Create a body with an initial velocity
    pub fn with_velocity(mass: f32, velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::new(mass)
        }
    }

    /// Advance one physics step, returning the positional displacement
    ///
    /// Displacement uses the velocity from the start of the step; damping
    /// and the speed limit apply afterwards.
    pub fn step(&mut self, delta_time: f32) -> Vec2 {
        let displacement = self.velocity * delta_time;

        if self.deceleration > 0.0 {
            self.velocity *= (1.0 - self.deceleration * delta_time).max(0.0);
        }

        if self.max_speed > 0.0 {
            let speed = self.velocity.magnitude();
            if speed > self.max_speed {
                self.velocity = self.velocity.normalize() * self.max_speed;
            }
        }

        displacement
    }
}
