//! Body integration system

use crate::config::LevelConfig;
use crate::ecs::component::{ComponentKind, Payload};
use crate::ecs::system::System;
use crate::ecs::world::World;

/// Integrates body motion into entity positions
///
/// Bodies flagged `destroy_on_exit` take their owner down once its center
/// leaves the level, so stray projectiles don't accumulate off-screen.
pub struct BodySystem {
    level: LevelConfig,
}

impl BodySystem {
    /// Create a body system bounded by `level`
    pub fn new(level: LevelConfig) -> Self {
        Self { level }
    }
}

impl System for BodySystem {
    fn name(&self) -> &str {
        "body"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        for key in world.component_keys(ComponentKind::Body) {
            let Some(owner) = world.visit(ComponentKind::Body, key) else {
                continue;
            };

            let Some(component) = world.component_mut(ComponentKind::Body, key) else {
                continue;
            };
            let Payload::Body(body) = &mut component.payload else {
                continue;
            };
            let displacement = body.step(delta_time);
            let destroy_on_exit = body.destroy_on_exit;

            let Some(entity) = world.entity_mut(owner) else {
                continue;
            };
            entity.position += displacement;
            let position = entity.position;

            if destroy_on_exit && !self.level.contains(position) {
                world.despawn(owner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Body;
    use crate::ecs::entity::EntityTag;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn test_bodies_move_their_entities() {
        let mut world = World::new();
        let mut system = BodySystem::new(LevelConfig::default());

        let ship = world.spawn(Vec2::new(100.0, 100.0), EntityTag::Ship);
        world.attach(
            ship,
            Payload::Body(Body::with_velocity(1.0, Vec2::new(60.0, -30.0))),
        );

        system.update(&mut world, 0.5);
        let position = world.entity(ship).unwrap().position;
        assert_relative_eq!(position.x, 130.0);
        assert_relative_eq!(position.y, 85.0);
    }

    #[test]
    fn test_inactive_body_released_without_disturbing_neighbors() {
        let mut world = World::new();
        let mut system = BodySystem::new(LevelConfig::default());

        let ids: Vec<_> = (0..5)
            .map(|i| {
                let id = world.spawn(Vec2::new(100.0, 100.0), EntityTag::Hazard);
                world.attach(
                    id,
                    Payload::Body(Body::with_velocity(1.0, Vec2::new(10.0 * (i + 1) as f32, 0.0))),
                );
                id
            })
            .collect();
        world
            .component_of_mut(ids[2], ComponentKind::Body)
            .unwrap()
            .active = false;

        system.update(&mut world, 1.0);

        // Neighbors each stepped exactly once, the inactive one not at all.
        for (i, &id) in ids.iter().enumerate() {
            let expected = if i == 2 { 100.0 } else { 100.0 + 10.0 * (i + 1) as f32 };
            assert_relative_eq!(world.entity(id).unwrap().position.x, expected);
        }
        assert_eq!(world.component_count(ComponentKind::Body), 4);
        assert!(!world.entity(ids[2]).unwrap().has_component(ComponentKind::Body));
    }

    #[test]
    fn test_exit_despawns_flagged_entities_only() {
        let mut world = World::new();
        let mut system = BodySystem::new(LevelConfig::default());

        let missile = world.spawn(Vec2::new(1190.0, 400.0), EntityTag::Missile);
        let mut body = Body::with_velocity(1.0, Vec2::new(1000.0, 0.0));
        body.destroy_on_exit = true;
        world.attach(missile, Payload::Body(body));

        let drifter = world.spawn(Vec2::new(1190.0, 400.0), EntityTag::Hazard);
        world.attach(
            drifter,
            Payload::Body(Body::with_velocity(1.0, Vec2::new(1000.0, 0.0))),
        );

        system.update(&mut world, 0.1);
        assert!(!world.is_alive(missile));
        assert!(world.is_alive(drifter));
    }
}
