//! Countdown timers
//!
//! Each timer counts its remaining seconds down and fires its expiry hook
//! on the frame it crosses zero. Timers are one-shot: once the hook has run
//! the component is released, unless the hook re-armed it by pushing
//! `time_left` back above zero. The hook stays on the component through the
//! call, so a re-armed timer fires again without re-registering.

use crate::ecs::component::{ComponentKey, ComponentKind, EntityHook, Payload};
use crate::ecs::components::Timer;
use crate::ecs::system::System;
use crate::ecs::world::World;

/// Drives countdowns and their expiry hooks
pub struct TimerSystem;

impl System for TimerSystem {
    fn name(&self) -> &str {
        "timer"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let keys = world.component_keys(ComponentKind::Timer);
        for key in keys {
            let Some(owner) = world.visit(ComponentKind::Timer, key) else {
                continue;
            };
            let expired = {
                let Some(timer) = timer_mut(world, key) else {
                    continue;
                };
                timer.time_left -= delta_time;
                timer.time_left <= 0.0
            };
            if !expired {
                continue;
            }

            if let Some(hook) = expiry_hook(world, key) {
                hook(world, owner);
            }

            // The hook may have re-armed the timer, replaced it, or torn the
            // whole entity down; only a timer still at this key and still
            // expired is consumed.
            let still_expired = matches!(
                world.component(ComponentKind::Timer, key).map(|c| &c.payload),
                Some(Payload::Timer(timer)) if timer.time_left <= 0.0
            );
            if still_expired {
                world.release(ComponentKind::Timer, key);
            }
        }
    }
}

fn timer_mut(world: &mut World, key: ComponentKey) -> Option<&mut Timer> {
    match &mut world.component_mut(ComponentKind::Timer, key)?.payload {
        Payload::Timer(timer) => Some(timer),
        _ => None,
    }
}

fn expiry_hook(world: &World, key: ComponentKey) -> Option<EntityHook> {
    match &world.component(ComponentKind::Timer, key)?.payload {
        Payload::Timer(timer) => timer.on_expire.clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityTag;
    use crate::foundation::math::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_expiry_fires_once_and_consumes_the_timer() {
        let mut world = World::new();
        let entity = world.spawn(Vec2::new(0.0, 0.0), EntityTag::Explosion);
        let fired = Rc::new(Cell::new(0));
        let count = Rc::clone(&fired);
        world.attach(
            entity,
            Payload::Timer(Timer::with_hook(
                0.5,
                Rc::new(move |_world, _owner| count.set(count.get() + 1)),
            )),
        );

        let mut system = TimerSystem;
        system.update(&mut world, 0.3);
        assert_eq!(fired.get(), 0);
        system.update(&mut world, 0.3);
        assert_eq!(fired.get(), 1);
        assert!(!world
            .entity(entity)
            .unwrap()
            .has_component(ComponentKind::Timer));

        // Nothing left to fire.
        system.update(&mut world, 1.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_rearming_in_the_hook_keeps_the_timer() {
        let mut world = World::new();
        let entity = world.spawn(Vec2::new(0.0, 0.0), EntityTag::Hazard);
        let fired = Rc::new(Cell::new(0));
        let count = Rc::clone(&fired);
        world.attach(
            entity,
            Payload::Timer(Timer::with_hook(
                0.1,
                Rc::new(move |world, owner| {
                    count.set(count.get() + 1);
                    if let Some(timer) = world.timer_mut(owner) {
                        timer.time_left = 0.1;
                    }
                }),
            )),
        );

        let mut system = TimerSystem;
        for _ in 0..3 {
            system.update(&mut world, 0.2);
        }

        // Re-armed every expiry: fires each frame and survives.
        assert_eq!(fired.get(), 3);
        assert!(world
            .entity(entity)
            .unwrap()
            .has_component(ComponentKind::Timer));
    }

    #[test]
    fn test_hook_may_despawn_the_owner() {
        let mut world = World::new();
        let entity = world.spawn(Vec2::new(0.0, 0.0), EntityTag::Explosion);
        world.attach(
            entity,
            Payload::Timer(Timer::with_hook(
                0.1,
                Rc::new(|world, owner| {
                    world.despawn(owner);
                }),
            )),
        );

        TimerSystem.update(&mut world, 0.2);
        assert!(!world.is_alive(entity));
        assert_eq!(world.component_count(ComponentKind::Timer), 0);
    }

    #[test]
    fn test_hookless_timer_simply_expires() {
        let mut world = World::new();
        let entity = world.spawn(Vec2::new(0.0, 0.0), EntityTag::Scenery);
        world.attach(entity, Payload::Timer(Timer::new(0.1)));

        TimerSystem.update(&mut world, 0.2);
        assert!(!world
            .entity(entity)
            .unwrap()
            .has_component(ComponentKind::Timer));
    }
}
