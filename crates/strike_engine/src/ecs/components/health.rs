//! Health component and death handling

use crate::ecs::component::EntityHook;

/// Component for entities that take damage
///
/// Death is handled by the health system: when hit points reach zero it
/// takes the death hook and effect out of the component and fires them,
/// so both happen at most once even if the entity lingers.
pub struct Health {
    /// Remaining hit points
    pub hit_points: f32,

    /// Hit point ceiling, kept for healing and HUD layers
    pub max_hit_points: f32,

    /// Particle effect triggered at the owner's position on death
    pub death_effect: Option<String>,

    /// Invoked when hit points reach zero
    pub on_death: Option<EntityHook>,
}

impl Health {
    /// Create a health pool filled to `hit_points`
    pub fn new(hit_points: f32) -> Self {
        Self {
            hit_points,
            max_hit_points: hit_points,
            death_effect: None,
            on_death: None,
        }
    }

    /// Whether the pool is exhausted
    pub fn is_dead(&self) -> bool {
        self.hit_points <= 0.0
    }
}
