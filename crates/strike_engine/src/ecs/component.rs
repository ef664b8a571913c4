//! Component envelopes, kinds, and hook signatures

use std::rc::Rc;

use crate::ecs::components::{
    Behavior, Body, Collider, Health, KeyboardListener, MouseListener, Propulsion, Timer,
};
use crate::ecs::entity::EntityId;
use crate::ecs::world::World;
use crate::foundation::collections::new_key_type;
use crate::input::KeyCode;

new_key_type! {
    /// Stable generational handle for a stored component
    pub struct ComponentKey;
}

/// Hook taking the world and one entity, e.g. destroy and expiry callbacks
pub type EntityHook = Rc<dyn Fn(&mut World, EntityId)>;

/// Collision hook: the world, the hook's own entity, then the other entity
pub type CollisionHook = Rc<dyn Fn(&mut World, EntityId, EntityId)>;

/// Keyboard hook: the world, the listening entity, the key, and press state
pub type KeyHook = Rc<dyn Fn(&mut World, EntityId, KeyCode, bool)>;

/// Discriminant for the component kinds an entity can carry, one slot each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Mass, velocity, and integration parameters
    Body,
    /// Hitbox participating in collision resolution
    Collider,
    /// Thrust and turning
    Propulsion,
    /// Hit points and death handling
    Health,
    /// One-shot or re-arming countdown
    Timer,
    /// Autonomous steering
    Behavior,
    /// Receives keyboard events
    KeyboardListener,
    /// Receives cursor hover transitions
    MouseListener,
}

impl ComponentKind {
    /// Number of component kinds
    pub const COUNT: usize = 8;

    /// Every kind, in store order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Body,
        Self::Collider,
        Self::Propulsion,
        Self::Health,
        Self::Timer,
        Self::Behavior,
        Self::KeyboardListener,
        Self::MouseListener,
    ];

    /// Slot and store index of this kind
    pub fn index(self) -> usize {
        match self {
            Self::Body => 0,
            Self::Collider => 1,
            Self::Propulsion => 2,
            Self::Health => 3,
            Self::Timer => 4,
            Self::Behavior => 5,
            Self::KeyboardListener => 6,
            Self::MouseListener => 7,
        }
    }
}

/// Kind-specific component data
pub enum Payload {
    /// See [`Body`]
    Body(Body),
    /// See [`Collider`]
    Collider(Collider),
    /// See [`Propulsion`]
    Propulsion(Propulsion),
    /// See [`Health`]
    Health(Health),
    /// See [`Timer`]
    Timer(Timer),
    /// See [`Behavior`]
    Behavior(Behavior),
    /// See [`KeyboardListener`]
    KeyboardListener(KeyboardListener),
    /// See [`MouseListener`]
    MouseListener(MouseListener),
}

impl Payload {
    /// Kind tag of this payload
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Body(_) => ComponentKind::Body,
            Self::Collider(_) => ComponentKind::Collider,
            Self::Propulsion(_) => ComponentKind::Propulsion,
            Self::Health(_) => ComponentKind::Health,
            Self::Timer(_) => ComponentKind::Timer,
            Self::Behavior(_) => ComponentKind::Behavior,
            Self::KeyboardListener(_) => ComponentKind::KeyboardListener,
            Self::MouseListener(_) => ComponentKind::MouseListener,
        }
    }
}

/// Envelope around a payload: ownership, liveness, and destroy hook
pub struct Component {
    owner: EntityId,

    /// Soft-removal flag; the owning kind's next traversal releases
    /// components left inactive
    pub active: bool,

    /// Kind-specific data
    pub payload: Payload,

    /// Invoked exactly once when the component is released
    pub on_destroy: Option<EntityHook>,
}

impl Component {
    pub(crate) fn new(owner: EntityId, payload: Payload) -> Self {
        Self {
            owner,
            active: true,
            payload,
            on_destroy: None,
        }
    }

    /// Entity this component is attached to
    pub fn owner(&self) -> EntityId {
        self.owner
    }
}
