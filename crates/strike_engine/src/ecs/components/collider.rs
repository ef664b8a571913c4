//! Collider component and team-based collision filtering

use bitflags::bitflags;

use crate::ecs::component::CollisionHook;
use crate::ecs::entity::Team;
use crate::foundation::math::Rect;

bitflags! {
    /// Teams a collider reacts to
    ///
    /// A pair collides only when each collider's mask admits the other
    /// entity's team. Same-team filtering for non-neutral entities happens
    /// before masks are consulted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TeamMask: u8 {
        /// React to neutral entities
        const NEUTRAL = 1 << 0;
        /// React to friendly entities
        const FRIENDLY = 1 << 1;
        /// React to enemy entities
        const ENEMY = 1 << 2;
    }
}

impl TeamMask {
    /// Whether this mask admits the given team
    pub fn allows(self, team: Team) -> bool {
        self.contains(Self::from(team))
    }
}

impl From<Team> for TeamMask {
    fn from(team: Team) -> Self {
        match team {
            Team::Neutral => Self::NEUTRAL,
            Team::Friendly => Self::FRIENDLY,
            Team::Enemy => Self::ENEMY,
        }
    }
}

/// Component giving an entity a hitbox
pub struct Collider {
    /// Hitbox; the size is fixed at attach, the center is re-synced to the
    /// owner's position by the collision system each frame
    pub rect: Rect,

    /// Participates in rollback and momentum exchange (requires a Body)
    pub elastic: bool,

    /// Clamp the owner inside the level bounds (requires a Body)
    pub keep_inside_level: bool,

    /// Teams this collider reacts to
    pub mask: TeamMask,

    /// Particle effect triggered on elastic impact
    pub effect: Option<String>,

    /// Invoked with (world, own entity, other entity) on every collision
    pub on_collision: Option<CollisionHook>,
}

impl Collider {
    /// Create a hitbox of the given size reacting to every team
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, width, height),
            elastic: false,
            keep_inside_level: false,
            mask: TeamMask::all(),
            effect: None,
            on_collision: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_admits_by_team() {
        let mask = TeamMask::FRIENDLY | TeamMask::NEUTRAL;
        assert!(mask.allows(Team::Friendly));
        assert!(mask.allows(Team::Neutral));
        assert!(!mask.allows(Team::Enemy));
    }

    #[test]
    fn test_new_collider_reacts_to_all_teams() {
        let collider = Collider::new(32.0, 32.0);
        assert!(collider.mask.allows(Team::Neutral));
        assert!(collider.mask.allows(Team::Friendly));
        assert!(collider.mask.allows(Team::Enemy));
        assert!(!collider.elastic);
    }
}
