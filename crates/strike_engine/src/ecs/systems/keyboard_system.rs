//! Keyboard event dispatch
//!
//! Drains the frame's key transitions from the world's input queue and
//! forwards each one to every keyboard listener, in attach order.

use crate::ecs::component::{ComponentKind, Payload};
use crate::ecs::system::System;
use crate::ecs::world::World;

/// Fans queued key presses and releases out to listener components
pub struct KeyboardSystem;

impl System for KeyboardSystem {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn update(&mut self, world: &mut World, _delta_time: f32) {
        let events = world.input.drain_keys();
        if events.is_empty() {
            return;
        }

        for (key_code, pressed) in events {
            // Listeners attached by an earlier event's hook see only later
            // events; the snapshot is taken per event.
            let keys = world.component_keys(ComponentKind::KeyboardListener);
            for key in keys {
                let Some(owner) = world.visit(ComponentKind::KeyboardListener, key) else {
                    continue;
                };
                let hook = match world.component(ComponentKind::KeyboardListener, key) {
                    Some(component) => match &component.payload {
                        Payload::KeyboardListener(listener) => listener.on_key.clone(),
                        _ => None,
                    },
                    None => None,
                };
                if let Some(hook) = hook {
                    hook(world, owner, key_code, pressed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::KeyboardListener;
    use crate::ecs::entity::EntityTag;
    use crate::foundation::math::Vec2;
    use crate::input::KeyCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_events_reach_every_listener_in_order() {
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["a", "b"] {
            let entity = world.spawn(Vec2::new(0.0, 0.0), EntityTag::Ship);
            let log = Rc::clone(&log);
            world.attach(
                entity,
                Payload::KeyboardListener(KeyboardListener::new(Rc::new(
                    move |_world, _owner, key_code, pressed| {
                        log.borrow_mut().push((name, key_code, pressed));
                    },
                ))),
            );
        }

        world.input.push_key(KeyCode::Space, true);
        world.input.push_key(KeyCode::Space, false);
        KeyboardSystem.update(&mut world, 0.016);

        assert_eq!(
            *log.borrow(),
            vec![
                ("a", KeyCode::Space, true),
                ("b", KeyCode::Space, true),
                ("a", KeyCode::Space, false),
                ("b", KeyCode::Space, false),
            ]
        );
        assert!(world.input.drain_keys().is_empty());
    }

    #[test]
    fn test_listener_hook_may_despawn_its_owner() {
        let mut world = World::new();
        let entity = world.spawn(Vec2::new(0.0, 0.0), EntityTag::Ship);
        world.attach(
            entity,
            Payload::KeyboardListener(KeyboardListener::new(Rc::new(
                |world, owner, _key_code, pressed| {
                    if pressed {
                        world.despawn(owner);
                    }
                },
            ))),
        );

        world.input.push_key(KeyCode::Escape, true);
        world.input.push_key(KeyCode::Escape, false);
        KeyboardSystem.update(&mut world, 0.016);

        assert!(!world.is_alive(entity));
        assert_eq!(world.entity_count(), 0);
    }
}
