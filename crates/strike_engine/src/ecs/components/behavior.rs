//! Autonomous steering component

use crate::ecs::entity::EntityId;
use crate::foundation::math::Vec2;

/// Steering mode for the behavior system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    /// Track a moving entity; degrades to `Coast` if the target dies
    Follow(EntityId),
    /// Head for a fixed point, then coast inside the arrival radius
    MoveTo(Vec2),
    /// No steering input
    Coast,
}

/// Component steering the owner's propulsion toward a goal
///
/// Requires a Propulsion component on the same entity; the behavior system
/// writes the angular throttle, leaving linear throttle to other inputs.
pub struct Behavior {
    /// Active steering mode
    pub steering: Steering,

    /// Distance at which `MoveTo` considers itself arrived
    pub arrival_radius: f32,
}

impl Behavior {
    /// Create a behavior in the given steering mode
    pub fn new(steering: Steering) -> Self {
        Self {
            steering,
            arrival_radius: 10.0,
        }
    }
}
