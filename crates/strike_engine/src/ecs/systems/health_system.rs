//! Death resolution
//!
//! Damage only marks an entity as dead by driving its hit points to zero;
//! this system notices the crossing and runs the consequences. The death
//! effect and hook are taken off the component before they run, so however
//! many times an entity is damaged past zero, death resolves once.

use crate::ecs::component::{ComponentKey, ComponentKind, Payload};
use crate::ecs::components::Health;
use crate::ecs::system::System;
use crate::ecs::world::World;

/// Resolves entities whose hit points ran out
pub struct HealthSystem;

impl System for HealthSystem {
    fn name(&self) -> &str {
        "health"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let keys = world.component_keys(ComponentKind::Health);
        for key in keys {
            let Some(owner) = world.visit(ComponentKind::Health, key) else {
                continue;
            };
            let consumed = {
                let Some(health) = health_mut(world, key) else {
                    continue;
                };
                if health.is_dead() {
                    Some((health.death_effect.take(), health.on_death.take()))
                } else {
                    None
                }
            };
            let Some((effect, hook)) = consumed else {
                continue;
            };

            if let Some(effect) = effect {
                if let Some(position) = world.entity(owner).map(|e| e.position) {
                    world.particles.spawn(&effect, delta_time, 1, position);
                }
            }
            if let Some(hook) = hook {
                hook(world, owner);
            }
        }
    }
}

fn health_mut(world: &mut World, key: ComponentKey) -> Option<&mut Health> {
    match &mut world.component_mut(ComponentKind::Health, key)?.payload {
        Payload::Health(health) => Some(health),
        _ => None,
    }
}
