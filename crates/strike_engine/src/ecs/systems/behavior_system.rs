//! Autonomous steering
//!
//! Turns each behavior's steering goal into an angular throttle on the
//! sibling propulsion. Goals degrade in place: a followed entity that dies
//! or a destination that has been reached becomes [`Steering::Coast`], and
//! coasting entities fly straight with whatever momentum they carry.

use crate::ecs::component::ComponentKind;
use crate::ecs::components::Steering;
use crate::ecs::entity::EntityId;
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::foundation::math::{utils, Vec2};

/// Steers entities toward their behavior goals
pub struct BehaviorSystem;

impl System for BehaviorSystem {
    fn name(&self) -> &str {
        "behavior"
    }

    fn update(&mut self, world: &mut World, _delta_time: f32) {
        let keys = world.component_keys(ComponentKind::Behavior);
        for key in keys {
            let Some(owner) = world.visit(ComponentKind::Behavior, key) else {
                continue;
            };
            let Some((position, angle)) = world.entity(owner).map(|e| (e.position, e.angle))
            else {
                continue;
            };
            let Some((steering, arrival_radius)) = world
                .behavior_mut(owner)
                .map(|b| (b.steering, b.arrival_radius))
            else {
                continue;
            };

            let goal = match steering {
                Steering::Follow(target) => match world.entity(target).map(|e| e.position) {
                    Some(goal) => Some(goal),
                    None => {
                        degrade_to_coast(world, owner);
                        None
                    }
                },
                Steering::MoveTo(goal) => {
                    if (goal - position).norm() <= arrival_radius {
                        degrade_to_coast(world, owner);
                        None
                    } else {
                        Some(goal)
                    }
                }
                Steering::Coast => None,
            };

            let angular_throttle = match goal {
                Some(goal) => steer_toward(position, angle, goal),
                None => 0.0,
            };
            world
                .propulsion_mut(owner)
                .expect("Behavior requires a Propulsion on the same entity")
                .angular_throttle = angular_throttle;
        }
    }
}

fn degrade_to_coast(world: &mut World, owner: EntityId) {
    if let Some(behavior) = world.behavior_mut(owner) {
        behavior.steering = Steering::Coast;
    }
}

/// Angular throttle that turns a heading toward a goal point, saturating at
/// full deflection
fn steer_toward(position: Vec2, angle: f32, goal: Vec2) -> f32 {
    let bearing = (goal.y - position.y).atan2(goal.x - position.x);
    utils::clamp(utils::wrap_angle(bearing - angle), -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::Payload;
    use crate::ecs::components::{Behavior, Propulsion};
    use crate::ecs::entity::EntityTag;
    use crate::foundation::math::constants;
    use approx::assert_relative_eq;

    fn spawn_steered(world: &mut World, steering: Steering) -> EntityId {
        let entity = world.spawn(Vec2::new(0.0, 0.0), EntityTag::Missile);
        world.attach(entity, Payload::Propulsion(Propulsion::new(100.0, 2.0)));
        world.attach(entity, Payload::Behavior(Behavior::new(steering)));
        entity
    }

    #[test]
    fn test_turns_toward_a_followed_entity() {
        let mut world = World::new();
        let target = world.spawn(Vec2::new(0.0, 50.0), EntityTag::Ship);
        let chaser = spawn_steered(&mut world, Steering::Follow(target));

        BehaviorSystem.update(&mut world, 0.016);

        // Target is straight up from a heading of zero: hard left turn,
        // saturated at full deflection.
        let throttle = world.propulsion_mut(chaser).unwrap().angular_throttle;
        assert_relative_eq!(throttle, 1.0);
    }

    #[test]
    fn test_small_bearing_error_gives_proportional_throttle() {
        let mut world = World::new();
        let chaser = spawn_steered(&mut world, Steering::MoveTo(Vec2::new(100.0, 0.0)));
        world.entity_mut(chaser).unwrap().angle = -0.25;

        BehaviorSystem.update(&mut world, 0.016);
        let throttle = world.propulsion_mut(chaser).unwrap().angular_throttle;
        assert_relative_eq!(throttle, 0.25, epsilon = 1.0e-6);
    }

    #[test]
    fn test_arrival_degrades_move_to_into_coast() {
        let mut world = World::new();
        let mover = spawn_steered(&mut world, Steering::MoveTo(Vec2::new(5.0, 0.0)));
        world.propulsion_mut(mover).unwrap().angular_throttle = 0.7;

        // Within the default arrival radius from the start.
        BehaviorSystem.update(&mut world, 0.016);

        assert!(matches!(
            world.behavior_mut(mover).unwrap().steering,
            Steering::Coast
        ));
        let throttle = world.propulsion_mut(mover).unwrap().angular_throttle;
        assert_relative_eq!(throttle, 0.0);
    }

    #[test]
    fn test_dead_follow_target_degrades_into_coast() {
        let mut world = World::new();
        let target = world.spawn(Vec2::new(0.0, 50.0), EntityTag::Ship);
        let chaser = spawn_steered(&mut world, Steering::Follow(target));

        world.despawn(target);
        BehaviorSystem.update(&mut world, 0.016);

        assert!(matches!(
            world.behavior_mut(chaser).unwrap().steering,
            Steering::Coast
        ));
    }

    #[test]
    fn test_wraps_the_bearing_across_the_seam() {
        let mut world = World::new();
        let chaser = spawn_steered(&mut world, Steering::MoveTo(Vec2::new(-100.0, -1.0)));
        world.entity_mut(chaser).unwrap().angle = constants::HALF_PI * 3.0;

        BehaviorSystem.update(&mut world, 0.016);

        // Goal sits just below the negative x axis; an unwrapped difference
        // would spin the long way around.
        let throttle = world.propulsion_mut(chaser).unwrap().angular_throttle;
        assert!(throttle < 0.0);
        assert!(throttle >= -1.0);
    }
}
