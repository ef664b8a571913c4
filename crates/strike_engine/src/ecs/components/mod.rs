//! Component payload definitions
//!
//! One module per component kind. Payloads are plain data plus hook slots;
//! the systems under [`crate::ecs::systems`] give them behavior.

pub mod body;
pub mod collider;
pub mod propulsion;
pub mod health;
pub mod timer;
pub mod behavior;
pub mod listener;

pub use body::Body;
pub use collider::{Collider, TeamMask};
pub use propulsion::Propulsion;
pub use health::Health;
pub use timer::Timer;
pub use behavior::{Behavior, Steering};
pub use listener::{KeyboardListener, MouseListener};
