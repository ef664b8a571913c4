//! Cursor hover tracking
//!
//! Each mouse listener keeps a click region centered on its owner. The
//! system re-centers every region, compares it against the cursor, and
//! fires enter and leave hooks on hover transitions.

use crate::ecs::component::{ComponentKey, ComponentKind, Payload};
use crate::ecs::components::MouseListener;
use crate::ecs::system::System;
use crate::ecs::world::World;

/// Tracks which listener regions the cursor is inside
pub struct MouseSystem;

impl System for MouseSystem {
    fn name(&self) -> &str {
        "mouse"
    }

    fn update(&mut self, world: &mut World, _delta_time: f32) {
        let cursor = world.input.cursor();
        let keys = world.component_keys(ComponentKind::MouseListener);
        for key in keys {
            let Some(owner) = world.visit(ComponentKind::MouseListener, key) else {
                continue;
            };
            let Some(position) = world.entity(owner).map(|e| e.position) else {
                continue;
            };

            let transition = {
                let Some(listener) = listener_mut(world, key) else {
                    continue;
                };
                listener.click_rect.set_center(position);
                let inside = listener.click_rect.contains_point(cursor);
                if inside == listener.hovered {
                    None
                } else {
                    listener.hovered = inside;
                    if inside {
                        listener.on_enter.clone()
                    } else {
                        listener.on_leave.clone()
                    }
                }
            };
            if let Some(hook) = transition {
                hook(world, owner);
            }
        }
    }
}

fn listener_mut(world: &mut World, key: ComponentKey) -> Option<&mut MouseListener> {
    match &mut world.component_mut(ComponentKind::MouseListener, key)?.payload {
        Payload::MouseListener(listener) => Some(listener),
        _ => None,
    }
}
