//! ECS World implementation
//!
//! The world is the explicit context object for a running game: it owns the
//! entity registry, the per-kind component stores, the targeting state, the
//! input queue, and the pluggable backends. Hooks receive `&mut World` and
//! may spawn or destroy anything; traversal safety rests on generational
//! keys plus the snapshot-and-revalidate convention in [`Self::visit`].

use crate::audio::{AudioBackend, NullAudio};
use crate::ecs::component::{Component, ComponentKey, ComponentKind, Payload};
use crate::ecs::components::{Behavior, Body, Collider, Health, Propulsion, Timer};
use crate::ecs::entity::{Entity, EntityId, EntityTag, Team};
use crate::ecs::store::ComponentStore;
use crate::ecs::systems::weapon_system::Targeting;
use crate::foundation::collections::OrderedList;
use crate::foundation::math::Vec2;
use crate::input::InputQueue;
use crate::particles::{NullParticles, ParticleBackend};
use crate::render::{AnimationMode, NullRenderer, RenderBackend};

/// ECS World containing all entities and components
pub struct World {
    entities: OrderedList<EntityId, Entity>,
    store: ComponentStore,

    /// Weapon and lockon state for the player-controlled shooter
    pub targeting: Targeting,

    /// Pending key events and cursor state fed by the driver
    pub input: InputQueue,

    /// Render backend receiving attach/detach calls
    pub renderer: Box<dyn RenderBackend>,

    /// Particle backend receiving effect triggers
    pub particles: Box<dyn ParticleBackend>,

    /// Audio backend for gameplay hooks
    pub audio: Box<dyn AudioBackend>,
}

impl World {
    /// Create an empty world wired to the null backends
    pub fn new() -> Self {
        Self {
            entities: OrderedList::new(),
            store: ComponentStore::new(),
            targeting: Targeting::new(),
            input: InputQueue::new(),
            renderer: Box::new(NullRenderer::new()),
            particles: Box::new(NullParticles),
            audio: Box::new(NullAudio),
        }
    }

    // --- entity registry ---

    /// Create an entity at `position` with no components
    pub fn spawn(&mut self, position: Vec2, tag: EntityTag) -> EntityId {
        let id = self.entities.push_back(Entity::new(position, tag));
        log::trace!("Spawned {tag:?} entity");
        id
    }

    /// Destroy an entity: renderable first, then components, then the record
    ///
    /// Returns false for a stale handle. Destroy hooks run mid-teardown and
    /// may themselves spawn or despawn entities.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(tag) = self.entities.get(id).map(|e| e.tag) else {
            return false;
        };
        self.detach_sprite(id);
        for kind in ComponentKind::ALL {
            self.detach(id, kind);
        }
        self.entities.remove(id);
        log::trace!("Despawned {tag:?} entity");
        true
    }

    /// Despawn every live entity
    pub fn clear_entities(&mut self) {
        log::debug!("Clearing {} entities", self.entities.len());
        while let Some(id) = self.entities.front_key() {
            self.despawn(id);
        }
    }

    /// Whether `id` refers to a live entity
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains(id)
    }

    /// Borrow an entity record
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Mutably borrow an entity record
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Snapshot of live entity ids in spawn order
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.keys().collect()
    }

    /// Whether two live entities share a non-neutral team
    pub fn same_team(&self, a: EntityId, b: EntityId) -> bool {
        match (self.entities.get(a), self.entities.get(b)) {
            (Some(ea), Some(eb)) => ea.team == eb.team && ea.team != Team::Neutral,
            _ => false,
        }
    }

    // --- component store ---

    /// Attach a component, panicking if the slot for its kind is taken
    ///
    /// The entity handle must be live. Populate the payload before
    /// attaching; the returned key addresses the stored component.
    pub fn attach(&mut self, entity: EntityId, payload: Payload) -> ComponentKey {
        let kind = payload.kind();
        let slot = self
            .entities
            .get(entity)
            .expect("attach: stale entity handle")
            .component_key(kind);
        assert!(
            slot.is_none(),
            "attach: entity already has a {kind:?} component"
        );

        let key = self.store.insert(Component::new(entity, payload));
        if let Some(e) = self.entities.get_mut(entity) {
            e.set_component_key(kind, Some(key));
        }
        key
    }

    /// Detach an entity's component of `kind`; no-op if absent
    pub fn detach(&mut self, entity: EntityId, kind: ComponentKind) {
        let Some(key) = self.entities.get(entity).and_then(|e| e.component_key(kind)) else {
            return;
        };
        self.release(kind, key);
    }

    /// Release a stored component by key: clear the owner's slot, drop the
    /// value, and fire its destroy hook exactly once. No-op on stale keys.
    pub fn release(&mut self, kind: ComponentKind, key: ComponentKey) {
        let Some(owner) = self.store.get(kind, key).map(Component::owner) else {
            return;
        };
        if let Some(entity) = self.entities.get_mut(owner) {
            if entity.component_key(kind) == Some(key) {
                entity.set_component_key(kind, None);
            }
        }
        let Some(mut component) = self.store.take(kind, key) else {
            return;
        };
        if let Some(hook) = component.on_destroy.take() {
            hook(self, owner);
        }
    }

    /// Traversal preamble shared by every system pass
    ///
    /// Revalidates `key`, lazily releases a component left inactive, and
    /// otherwise hands back its owner.
    pub fn visit(&mut self, kind: ComponentKind, key: ComponentKey) -> Option<EntityId> {
        let (active, owner) = {
            let component = self.store.get(kind, key)?;
            (component.active, component.owner())
        };
        if !active {
            self.release(kind, key);
            return None;
        }
        Some(owner)
    }

    /// Borrow a stored component by kind and key
    pub fn component(&self, kind: ComponentKind, key: ComponentKey) -> Option<&Component> {
        self.store.get(kind, key)
    }

    /// Mutably borrow a stored component by kind and key
    pub fn component_mut(
        &mut self,
        kind: ComponentKind,
        key: ComponentKey,
    ) -> Option<&mut Component> {
        self.store.get_mut(kind, key)
    }

    /// Borrow an entity's component of `kind`
    pub fn component_of(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        let key = self.entities.get(entity)?.component_key(kind)?;
        self.store.get(kind, key)
    }

    /// Mutably borrow an entity's component of `kind`
    pub fn component_of_mut(
        &mut self,
        entity: EntityId,
        kind: ComponentKind,
    ) -> Option<&mut Component> {
        let key = self.entities.get(entity)?.component_key(kind)?;
        self.store.get_mut(kind, key)
    }

    /// Snapshot of a kind's component keys in attach order
    pub fn component_keys(&self, kind: ComponentKind) -> Vec<ComponentKey> {
        self.store.keys(kind)
    }

    /// Number of live components of `kind`
    pub fn component_count(&self, kind: ComponentKind) -> usize {
        self.store.len(kind)
    }

    // --- typed payload access ---

    /// Body payload of `entity`, if attached
    pub fn body(&self, entity: EntityId) -> Option<&Body> {
        match &self.component_of(entity, ComponentKind::Body)?.payload {
            Payload::Body(body) => Some(body),
            _ => None,
        }
    }

    /// Mutable body payload of `entity`, if attached
    pub fn body_mut(&mut self, entity: EntityId) -> Option<&mut Body> {
        match &mut self.component_of_mut(entity, ComponentKind::Body)?.payload {
            Payload::Body(body) => Some(body),
            _ => None,
        }
    }

    /// Collider payload of `entity`, if attached
    pub fn collider(&self, entity: EntityId) -> Option<&Collider> {
        match &self.component_of(entity, ComponentKind::Collider)?.payload {
            Payload::Collider(collider) => Some(collider),
            _ => None,
        }
    }

    /// Mutable collider payload of `entity`, if attached
    pub fn collider_mut(&mut self, entity: EntityId) -> Option<&mut Collider> {
        match &mut self.component_of_mut(entity, ComponentKind::Collider)?.payload {
            Payload::Collider(collider) => Some(collider),
            _ => None,
        }
    }

    /// Mutable propulsion payload of `entity`, if attached
    pub fn propulsion_mut(&mut self, entity: EntityId) -> Option<&mut Propulsion> {
        match &mut self.component_of_mut(entity, ComponentKind::Propulsion)?.payload {
            Payload::Propulsion(propulsion) => Some(propulsion),
            _ => None,
        }
    }

    /// Health payload of `entity`, if attached
    pub fn health(&self, entity: EntityId) -> Option<&Health> {
        match &self.component_of(entity, ComponentKind::Health)?.payload {
            Payload::Health(health) => Some(health),
            _ => None,
        }
    }

    /// Mutable health payload of `entity`, if attached
    pub fn health_mut(&mut self, entity: EntityId) -> Option<&mut Health> {
        match &mut self.component_of_mut(entity, ComponentKind::Health)?.payload {
            Payload::Health(health) => Some(health),
            _ => None,
        }
    }

    /// Mutable timer payload of `entity`, if attached
    pub fn timer_mut(&mut self, entity: EntityId) -> Option<&mut Timer> {
        match &mut self.component_of_mut(entity, ComponentKind::Timer)?.payload {
            Payload::Timer(timer) => Some(timer),
            _ => None,
        }
    }

    /// Mutable behavior payload of `entity`, if attached
    pub fn behavior_mut(&mut self, entity: EntityId) -> Option<&mut Behavior> {
        match &mut self.component_of_mut(entity, ComponentKind::Behavior)?.payload {
            Payload::Behavior(behavior) => Some(behavior),
            _ => None,
        }
    }

    // --- gameplay operations ---

    /// Subtract hit points; death resolves on the health system's next pass
    pub fn deal_damage(&mut self, target: EntityId, amount: f32) {
        if let Some(health) = self.health_mut(target) {
            health.hit_points -= amount;
        }
    }

    /// Trigger the current weapon through the targeting state machine
    ///
    /// A weapon with a special-fire hook runs it immediately; otherwise the
    /// state machine starts working through the confirmed lock queue.
    pub fn fire_weapon(&mut self) {
        if let Some((shooter, special)) = self.targeting.begin_fire() {
            if let Some(hook) = special {
                hook(self, shooter);
            }
        }
    }

    // --- renderable plumbing ---

    /// Attach a static sprite, panicking if the entity already has one
    pub fn attach_sprite(&mut self, entity: EntityId, sprite: &str, depth: i32) {
        let existing = self
            .entities
            .get(entity)
            .expect("attach_sprite: stale entity handle")
            .renderable;
        assert!(
            existing.is_none(),
            "attach_sprite: entity already has a renderable"
        );
        let id = self.renderer.attach(entity, sprite, depth);
        if let Some(e) = self.entities.get_mut(entity) {
            e.renderable = Some(id);
        }
    }

    /// Attach an animated sprite, panicking if the entity already has one
    pub fn attach_animation(
        &mut self,
        entity: EntityId,
        sprite: &str,
        depth: i32,
        frame_size: Vec2,
        frame_rate: f32,
        mode: AnimationMode,
    ) {
        let existing = self
            .entities
            .get(entity)
            .expect("attach_animation: stale entity handle")
            .renderable;
        assert!(
            existing.is_none(),
            "attach_animation: entity already has a renderable"
        );
        let id = self
            .renderer
            .attach_animated(entity, sprite, depth, frame_size, frame_rate, mode);
        if let Some(e) = self.entities.get_mut(entity) {
            e.renderable = Some(id);
        }
    }

    /// Detach the entity's renderable; no-op if it has none
    pub fn detach_sprite(&mut self, entity: EntityId) {
        let Some(id) = self.entities.get(entity).and_then(|e| e.renderable) else {
            return;
        };
        if let Some(e) = self.entities.get_mut(entity) {
            e.renderable = None;
        }
        self.renderer.detach(id);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn spawn_ship(world: &mut World) -> EntityId {
        world.spawn(Vec2::new(100.0, 100.0), EntityTag::Ship)
    }

    #[test]
    fn test_slots_agree_with_store_membership() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);

        let body_key = world.attach(ship, Payload::Body(Body::new(10.0)));
        let collider_key = world.attach(ship, Payload::Collider(Collider::new(32.0, 32.0)));

        assert_eq!(
            world.entity(ship).unwrap().component_key(ComponentKind::Body),
            Some(body_key)
        );
        assert_eq!(world.component_count(ComponentKind::Body), 1);
        assert_eq!(world.component_count(ComponentKind::Collider), 1);

        world.detach(ship, ComponentKind::Body);
        assert!(!world.entity(ship).unwrap().has_component(ComponentKind::Body));
        assert_eq!(world.component_count(ComponentKind::Body), 0);
        assert!(world.component(ComponentKind::Collider, collider_key).is_some());
    }

    #[test]
    fn test_despawn_removes_entity_and_components() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        world.attach(ship, Payload::Body(Body::new(1.0)));
        world.attach(ship, Payload::Health(Health::new(50.0)));

        assert!(world.despawn(ship));
        assert!(!world.is_alive(ship));
        assert_eq!(world.component_count(ComponentKind::Body), 0);
        assert_eq!(world.component_count(ComponentKind::Health), 0);

        // Stale handle: guarded no-op.
        assert!(!world.despawn(ship));
    }

    #[test]
    #[should_panic(expected = "already has a Body component")]
    fn test_duplicate_attach_panics() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        world.attach(ship, Payload::Body(Body::new(1.0)));
        world.attach(ship, Payload::Body(Body::new(2.0)));
    }

    #[test]
    #[should_panic(expected = "stale entity handle")]
    fn test_attach_to_dead_entity_panics() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        world.despawn(ship);
        world.attach(ship, Payload::Body(Body::new(1.0)));
    }

    #[test]
    fn test_detach_absent_component_is_noop() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        world.detach(ship, ComponentKind::Timer);
        assert!(world.is_alive(ship));
    }

    #[test]
    fn test_destroy_hook_fires_exactly_once() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        let key = world.attach(ship, Payload::Timer(Timer::new(5.0)));

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        world.component_mut(ComponentKind::Timer, key).unwrap().on_destroy =
            Some(Rc::new(move |_, _| counter.set(counter.get() + 1)));

        world.detach(ship, ComponentKind::Timer);
        world.detach(ship, ComponentKind::Timer);
        world.release(ComponentKind::Timer, key);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_visit_releases_inactive_components() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        let key = world.attach(ship, Payload::Body(Body::new(1.0)));

        assert_eq!(world.visit(ComponentKind::Body, key), Some(ship));

        world.component_of_mut(ship, ComponentKind::Body).unwrap().active = false;
        assert_eq!(world.visit(ComponentKind::Body, key), None);
        assert!(!world.entity(ship).unwrap().has_component(ComponentKind::Body));
        assert_eq!(world.component_count(ComponentKind::Body), 0);
    }

    #[test]
    fn test_same_team_requires_equal_and_non_neutral() {
        let mut world = World::new();
        let a = spawn_ship(&mut world);
        let b = spawn_ship(&mut world);
        let c = spawn_ship(&mut world);

        world.entity_mut(a).unwrap().team = Team::Friendly;
        world.entity_mut(b).unwrap().team = Team::Friendly;
        assert!(world.same_team(a, b));

        world.entity_mut(b).unwrap().team = Team::Neutral;
        assert!(!world.same_team(a, b));

        // Two neutrals never count as teammates.
        world.entity_mut(a).unwrap().team = Team::Neutral;
        assert!(!world.same_team(a, b));

        world.entity_mut(c).unwrap().team = Team::Enemy;
        world.entity_mut(a).unwrap().team = Team::Enemy;
        assert!(world.same_team(a, c));

        world.despawn(c);
        assert!(!world.same_team(a, c));
    }

    #[test]
    fn test_deal_damage_defers_death_to_system() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        world.attach(ship, Payload::Health(Health::new(30.0)));

        world.deal_damage(ship, 10.0);
        assert_relative_eq!(world.health(ship).unwrap().hit_points, 20.0);

        world.deal_damage(ship, 25.0);
        assert!(world.health(ship).unwrap().is_dead());
        assert!(world.is_alive(ship));

        // Damage against a stale handle is swallowed.
        world.despawn(ship);
        world.deal_damage(ship, 10.0);
    }

    #[test]
    #[should_panic(expected = "already has a renderable")]
    fn test_attach_sprite_twice_panics() {
        let mut world = World::new();
        let ship = spawn_ship(&mut world);
        world.attach_sprite(ship, "ship", 0);
        world.attach_sprite(ship, "ship", 0);
    }

    #[test]
    fn test_clear_entities_empties_world() {
        let mut world = World::new();
        for _ in 0..4 {
            let id = spawn_ship(&mut world);
            world.attach(id, Payload::Body(Body::new(1.0)));
        }
        world.clear_entities();
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.component_count(ComponentKind::Body), 0);
    }
}
