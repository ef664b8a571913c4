//! Input listener components

use crate::ecs::component::{EntityHook, KeyHook};
use crate::foundation::math::Rect;

/// Component receiving every keyboard event
///
/// The keyboard system fans each queued key event out to every listener;
/// the hook decides which keys it cares about.
pub struct KeyboardListener {
    /// Invoked with (world, owner, key, pressed) per event
    pub on_key: Option<KeyHook>,
}

impl KeyboardListener {
    /// Create a listener with the given key hook
    pub fn new(on_key: KeyHook) -> Self {
        Self {
            on_key: Some(on_key),
        }
    }
}

/// Component reacting to the cursor hovering the owner
///
/// The mouse system centers `click_rect` on the owner each frame and fires
/// the enter/leave hooks on hover transitions. Edges count as inside.
pub struct MouseListener {
    /// Hover region, centered on the owner by the mouse system
    pub click_rect: Rect,

    /// Whether the cursor was inside the region last frame
    pub hovered: bool,

    /// Invoked when the cursor enters the region
    pub on_enter: Option<EntityHook>,

    /// Invoked when the cursor leaves the region
    pub on_leave: Option<EntityHook>,
}

impl MouseListener {
    /// Create a hover region of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            click_rect: Rect::new(0.0, 0.0, width, height),
            hovered: false,
            on_enter: None,
            on_leave: None,
        }
    }
}
