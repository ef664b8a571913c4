//! Entity records and identity

use crate::ecs::component::{ComponentKey, ComponentKind};
use crate::foundation::collections::new_key_type;
use crate::foundation::math::Vec2;
use crate::render::RenderableId;

new_key_type! {
    /// Stable generational handle for an entity
    pub struct EntityId;
}

/// Coarse gameplay role of an entity
///
/// Hooks branch on the tag where behavior differs by role, e.g. a missile
/// striking a flare retargets instead of dealing damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    /// Short-lived visual burst
    Explosion,
    /// Player or enemy vessel
    Ship,
    /// Decoy that attracts homing projectiles
    Flare,
    /// Homing projectile
    Missile,
    /// Environmental obstacle
    Hazard,
    /// Background decoration
    Scenery,
}

/// Allegiance used for collision filtering and friendly fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    /// Collides with everyone, including other neutrals
    Neutral,
    /// Player side
    Friendly,
    /// Opposing side
    Enemy,
}

/// A game object: pose, allegiance, and one component slot per kind
pub struct Entity {
    /// Gameplay role
    pub tag: EntityTag,

    /// Allegiance
    pub team: Team,

    /// World-space position of the entity center
    pub position: Vec2,

    /// Orientation in radians
    pub angle: f32,

    /// Handle of the attached renderable, if any
    pub renderable: Option<RenderableId>,

    slots: [Option<ComponentKey>; ComponentKind::COUNT],
}

impl Entity {
    /// Create a neutral, component-less entity at `position`
    pub fn new(position: Vec2, tag: EntityTag) -> Self {
        Self {
            tag,
            team: Team::Neutral,
            position,
            angle: 0.0,
            renderable: None,
            slots: [None; ComponentKind::COUNT],
        }
    }

    /// Key of this entity's component of `kind`, if one is attached
    pub fn component_key(&self, kind: ComponentKind) -> Option<ComponentKey> {
        self.slots[kind.index()]
    }

    /// Whether a component of `kind` is attached
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub(crate) fn set_component_key(&mut self, kind: ComponentKind, key: Option<ComponentKey>) {
        self.slots[kind.index()] = key;
    }
}
