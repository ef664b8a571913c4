//! Render backend seam
//!
//! The core never draws. It reports renderable lifecycle to a backend,
//! which resolves entity poses by id at draw time. Swap in a real renderer
//! by assigning `world.renderer`.

use crate::ecs::entity::EntityId;
use crate::foundation::math::Vec2;

/// Opaque handle assigned by the render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderableId(pub u64);

/// Playback mode for animated sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    /// Repeat from the first frame
    Loop,
    /// Hold on the last frame
    Once,
}

/// Receives renderable attach/detach calls from the world
pub trait RenderBackend {
    /// Attach a static sprite to an entity
    fn attach(&mut self, entity: EntityId, sprite: &str, depth: i32) -> RenderableId;

    /// Attach a frame-animated sprite to an entity
    fn attach_animated(
        &mut self,
        entity: EntityId,
        sprite: &str,
        depth: i32,
        frame_size: Vec2,
        frame_rate: f32,
        mode: AnimationMode,
    ) -> RenderableId;

    /// Drop a renderable
    fn detach(&mut self, renderable: RenderableId);
}

/// Backend that hands out handles and draws nothing
pub struct NullRenderer {
    next_id: u64,
}

impl NullRenderer {
    /// Create a null renderer
    pub fn new() -> Self {
        Self { next_id: 0 }
    }
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for NullRenderer {
    fn attach(&mut self, _entity: EntityId, _sprite: &str, _depth: i32) -> RenderableId {
        let id = RenderableId(self.next_id);
        self.next_id += 1;
        id
    }

    fn attach_animated(
        &mut self,
        _entity: EntityId,
        _sprite: &str,
        _depth: i32,
        _frame_size: Vec2,
        _frame_rate: f32,
        _mode: AnimationMode,
    ) -> RenderableId {
        let id = RenderableId(self.next_id);
        self.next_id += 1;
        id
    }

    fn detach(&mut self, _renderable: RenderableId) {}
}
