//! Propulsion system: throttle to acceleration

use crate::ecs::component::{ComponentKind, Payload};
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::foundation::math::{utils, Rotation2, Vec2};

/// Applies thrust and turning from propulsion throttles
///
/// Turning updates the entity angle directly; thrust accelerates the Body
/// sibling. Directed propulsion rotates the linear throttle into the
/// owner's frame, so throttle (1, 0) always means "forward".
pub struct PropulsionSystem;

impl System for PropulsionSystem {
    fn name(&self) -> &str {
        "propulsion"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        for key in world.component_keys(ComponentKind::Propulsion) {
            let Some(owner) = world.visit(ComponentKind::Propulsion, key) else {
                continue;
            };

            let Some(component) = world.component(ComponentKind::Propulsion, key) else {
                continue;
            };
            let Payload::Propulsion(propulsion) = &component.payload else {
                continue;
            };
            let linear_accel = propulsion.linear_accel;
            let turn_rate = propulsion.turn_rate;
            let throttle = Vec2::new(
                utils::clamp(propulsion.linear_throttle.x, -1.0, 1.0),
                utils::clamp(propulsion.linear_throttle.y, -1.0, 1.0),
            );
            let angular = utils::clamp(propulsion.angular_throttle, -1.0, 1.0);
            let directed = propulsion.directed;
            let exhaust = propulsion.exhaust_effect.clone();

            let Some(entity) = world.entity_mut(owner) else {
                continue;
            };
            entity.angle += angular * turn_rate * delta_time;
            let angle = entity.angle;
            let position = entity.position;

            if throttle.x == 0.0 && throttle.y == 0.0 {
                continue;
            }
            let thrust = if directed {
                Rotation2::new(angle) * throttle
            } else {
                throttle
            };

            let body = world
                .body_mut(owner)
                .expect("Propulsion requires a Body on the same entity");
            body.velocity += thrust * linear_accel * delta_time;

            if let Some(effect) = exhaust {
                world.particles.spawn(&effect, delta_time, 1, position);
            }
        }
    }
}
