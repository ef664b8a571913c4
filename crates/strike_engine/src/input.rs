//! Input management system
//!
//! The driver pushes key edges and cursor motion into the [`InputQueue`];
//! the keyboard and mouse systems consume them each frame and fan them out
//! to listener components.

use std::collections::VecDeque;

use crate::foundation::math::Vec2;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Buffered input state between driver and systems
pub struct InputQueue {
    keys: VecDeque<(KeyCode, bool)>,
    cursor: Vec2,
}

impl InputQueue {
    /// Create an empty queue with the cursor at the origin
    pub fn new() -> Self {
        Self {
            keys: VecDeque::new(),
            cursor: Vec2::zeros(),
        }
    }

    /// Queue a key edge; `pressed` is true on press, false on release
    pub fn push_key(&mut self, key: KeyCode, pressed: bool) {
        self.keys.push_back((key, pressed));
    }

    /// Record the latest cursor position in level coordinates
    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Last known cursor position
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Take every queued key edge, oldest first
    pub fn drain_keys(&mut self) -> Vec<(KeyCode, bool)> {
        self.keys.drain(..).collect()
    }

    /// Number of queued key edges
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_event_order() {
        let mut queue = InputQueue::new();
        queue.push_key(KeyCode::W, true);
        queue.push_key(KeyCode::A, true);
        queue.push_key(KeyCode::W, false);

        let events = queue.drain_keys();
        assert_eq!(
            events,
            vec![(KeyCode::W, true), (KeyCode::A, true), (KeyCode::W, false)]
        );
        assert_eq!(queue.pending_keys(), 0);
    }

    #[test]
    fn test_cursor_keeps_latest_position() {
        let mut queue = InputQueue::new();
        queue.set_cursor(Vec2::new(10.0, 20.0));
        queue.set_cursor(Vec2::new(30.0, 40.0));
        assert_eq!(queue.cursor(), Vec2::new(30.0, 40.0));
    }
}
