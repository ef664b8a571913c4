//! Collision detection and resolution
//!
//! One pass per frame over colliders in attach order. Each visit syncs the
//! hitbox to its owner, clamps keep-inside entities against the level, then
//! tests the collider against every later one. Interpenetrating elastic
//! pairs are rolled back in sub-steps until separate, exchange momentum,
//! and re-advance by the recovered time; collision hooks fire for every
//! intersecting pair whether or not it resolved elastically.

use crate::config::{CollisionConfig, LevelConfig};
use crate::ecs::component::{CollisionHook, ComponentKey, ComponentKind, Payload};
use crate::ecs::components::Collider;
use crate::ecs::entity::EntityId;
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::foundation::math::Rect;

/// Resolves hitbox overlap and boundary containment
pub struct CollisionSystem {
    level: LevelConfig,
    config: CollisionConfig,
}

impl CollisionSystem {
    /// Create a collision system for the given level and tuning
    pub fn new(level: LevelConfig, config: CollisionConfig) -> Self {
        Self { level, config }
    }

    /// Clamp a keep-inside collider's owner against the level edges
    ///
    /// Edge contact counts: the owner is shifted so the touching edge sits
    /// exactly on the bound and that axis of its velocity is zeroed.
    fn clamp_to_level(&self, world: &mut World, key: ComponentKey, owner: EntityId) {
        assert!(
            world.body(owner).is_some(),
            "keep-inside collider requires a Body on the same entity"
        );
        let Some(rect) = collider_rect(world, key) else {
            return;
        };
        let Some(center) = world.entity(owner).map(|e| e.position) else {
            return;
        };

        let left = center.x - rect.w / 2.0;
        let right = center.x + rect.w / 2.0;
        let top = center.y - rect.h / 2.0;
        let bottom = center.y + rect.h / 2.0;

        let mut position = center;
        let mut zero_x = false;
        let mut zero_y = false;

        if left <= 0.0 {
            position.x -= left;
            zero_x = true;
        }
        if right >= self.level.width {
            position.x -= right - self.level.width;
            zero_x = true;
        }
        if top <= 0.0 {
            position.y -= top;
            zero_y = true;
        }
        if bottom >= self.level.height {
            position.y -= bottom - self.level.height;
            zero_y = true;
        }

        if !zero_x && !zero_y {
            return;
        }
        if let Some(entity) = world.entity_mut(owner) {
            entity.position = position;
        }
        if let Some(body) = world.body_mut(owner) {
            if zero_x {
                body.velocity.x = 0.0;
            }
            if zero_y {
                body.velocity.y = 0.0;
            }
        }
    }

    /// Test one ordered pair; returns false once the first collider is gone
    /// so its remaining pairings can be abandoned
    fn test_pair(
        &self,
        world: &mut World,
        key: ComponentKey,
        other_key: ComponentKey,
        elapsed: f32,
    ) -> bool {
        // Revalidate our own side; an earlier pairing's hook may have
        // destroyed or deactivated it.
        let Some(own) = world.component(ComponentKind::Collider, key) else {
            return false;
        };
        if !own.active {
            return false;
        }
        let own_entity = own.owner();
        let Payload::Collider(own_collider) = &own.payload else {
            return false;
        };
        let own_rect = own_collider.rect;
        let own_mask = own_collider.mask;
        let own_elastic = own_collider.elastic;

        // Inactive partners are skipped, not released; their own visit in
        // this pass handles the release.
        let Some(other) = world.component(ComponentKind::Collider, other_key) else {
            return true;
        };
        if !other.active {
            return true;
        }
        let other_entity = other.owner();
        let Payload::Collider(other_collider) = &other.payload else {
            return true;
        };
        let other_mask = other_collider.mask;
        let other_elastic = other_collider.elastic;

        let (own_team, other_team) =
            match (world.entity(own_entity), world.entity(other_entity)) {
                (Some(a), Some(b)) => (a.team, b.team),
                _ => return true,
            };
        if world.same_team(own_entity, other_entity) {
            return true;
        }
        if !own_mask.allows(other_team) || !other_mask.allows(own_team) {
            return true;
        }

        // Sync the partner's hitbox just in time; an earlier resolution may
        // have moved its owner this frame.
        let Some(other_position) = world.entity(other_entity).map(|e| e.position) else {
            return true;
        };
        let other_rect = {
            let Some(collider) = collider_payload_mut(world, other_key) else {
                return true;
            };
            collider.rect.set_center(other_position);
            collider.rect
        };

        if !own_rect.intersects(&other_rect) {
            return true;
        }

        if own_elastic && other_elastic {
            self.resolve_elastic(world, key, other_key, own_entity, other_entity, elapsed);
        }

        // Hooks fire for every intersecting pair, own side first. The
        // second is skipped if the first destroyed its collider.
        if let Some(hook) = collision_hook(world, key) {
            hook(world, own_entity, other_entity);
        }
        if let Some(hook) = collision_hook(world, other_key) {
            hook(world, other_entity, own_entity);
        }

        world.component(ComponentKind::Collider, key).is_some()
    }

    /// Roll an interpenetrating elastic pair back, exchange momentum, and
    /// re-advance both by the recovered time
    fn resolve_elastic(
        &self,
        world: &mut World,
        key: ComponentKey,
        other_key: ComponentKey,
        own_entity: EntityId,
        other_entity: EntityId,
        elapsed: f32,
    ) {
        let (m1, v1) = {
            let body = world
                .body(own_entity)
                .expect("elastic collision requires a Body on both entities");
            (body.mass, body.velocity)
        };
        let (m2, v2) = {
            let body = world
                .body(other_entity)
                .expect("elastic collision requires a Body on both entities");
            (body.mass, body.velocity)
        };

        let (Some(mut rect1), Some(mut rect2)) =
            (collider_rect(world, key), collider_rect(world, other_key))
        else {
            return;
        };

        // Walk both hitboxes backwards along their velocities until they
        // separate, accumulating how much of the frame gets recovered.
        let step = elapsed / self.config.rollback_granularity;
        let mut recovered = 0.0;
        let mut steps = 0;
        let mut separated = true;
        while rect1.intersects(&rect2) {
            if steps >= self.config.max_rollback_steps {
                separated = false;
                break;
            }
            rect1.x -= v1.x * step;
            rect1.y -= v1.y * step;
            rect2.x -= v2.x * step;
            rect2.y -= v2.y * step;
            recovered += step;
            steps += 1;
        }

        if !separated {
            // Slow or tangent pairs can fail to separate along their own
            // velocities; push them apart directly instead of looping on.
            log::warn!(
                "Rollback capped at {steps} sub-steps; separating along the minimum overlap axis"
            );
            separate_rects(&mut rect1, &mut rect2);
            recovered = 0.0;
        }

        // Per-axis elastic exchange between the pre-collision velocities.
        let total_mass = m1 + m2;
        let new_v1 = (v1 * (m1 - m2) + v2 * (2.0 * m2)) / total_mass;
        let new_v2 = (v2 * (m2 - m1) + v1 * (2.0 * m1)) / total_mass;

        if let Some(collider) = collider_payload_mut(world, key) {
            collider.rect = rect1;
        }
        if let Some(collider) = collider_payload_mut(world, other_key) {
            collider.rect = rect2;
        }
        if let Some(entity) = world.entity_mut(own_entity) {
            entity.position = rect1.center() + new_v1 * recovered;
        }
        if let Some(entity) = world.entity_mut(other_entity) {
            entity.position = rect2.center() + new_v2 * recovered;
        }
        if let Some(body) = world.body_mut(own_entity) {
            body.velocity = new_v1;
        }
        if let Some(body) = world.body_mut(other_entity) {
            body.velocity = new_v2;
        }

        self.impact_effect(world, key, own_entity, elapsed);
        self.impact_effect(world, other_key, other_entity, elapsed);
    }

    /// Trigger a collider's impact effect at its owner's resolved position
    fn impact_effect(&self, world: &mut World, key: ComponentKey, owner: EntityId, elapsed: f32) {
        let effect = match collider_payload_mut(world, key) {
            Some(collider) => collider.effect.clone(),
            None => None,
        };
        let Some(effect) = effect else {
            return;
        };
        let Some(position) = world.entity(owner).map(|e| e.position) else {
            return;
        };
        world.particles.spawn(&effect, elapsed, 1, position);
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &str {
        "collision"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let keys = world.component_keys(ComponentKind::Collider);
        for (index, &key) in keys.iter().enumerate() {
            let Some(owner) = world.visit(ComponentKind::Collider, key) else {
                continue;
            };
            let Some(position) = world.entity(owner).map(|e| e.position) else {
                continue;
            };

            let keep_inside = {
                let Some(collider) = collider_payload_mut(world, key) else {
                    continue;
                };
                collider.rect.set_center(position);
                collider.keep_inside_level
            };
            if keep_inside {
                self.clamp_to_level(world, key, owner);
            }

            for &other_key in &keys[index + 1..] {
                if !self.test_pair(world, key, other_key, delta_time) {
                    break;
                }
            }
        }
    }
}

fn collider_payload_mut(world: &mut World, key: ComponentKey) -> Option<&mut Collider> {
    match &mut world.component_mut(ComponentKind::Collider, key)?.payload {
        Payload::Collider(collider) => Some(collider),
        _ => None,
    }
}

fn collider_rect(world: &World, key: ComponentKey) -> Option<Rect> {
    match &world.component(ComponentKind::Collider, key)?.payload {
        Payload::Collider(collider) => Some(collider.rect),
        _ => None,
    }
}

fn collision_hook(world: &World, key: ComponentKey) -> Option<CollisionHook> {
    match &world.component(ComponentKind::Collider, key)?.payload {
        Payload::Collider(collider) => collider.on_collision.clone(),
        _ => None,
    }
}

/// Push two boxes apart along whichever axis overlaps least, leaving them
/// exactly touching
fn separate_rects(a: &mut Rect, b: &mut Rect) {
    let (overlap_x, overlap_y) = a.overlap(b);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return;
    }
    if overlap_x < overlap_y {
        let shift = overlap_x / 2.0;
        if a.x < b.x {
            a.x -= shift;
            b.x += shift;
        } else {
            a.x += shift;
            b.x -= shift;
        }
    } else {
        let shift = overlap_y / 2.0;
        if a.y < b.y {
            a.y -= shift;
            b.y += shift;
        } else {
            a.y += shift;
            b.y -= shift;
        }
    }
}
