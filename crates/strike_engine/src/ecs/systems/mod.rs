//! Frame update systems
//!
//! One system per concern, each traversing a single component kind in
//! attach order. The standard pipeline runs them as: body, propulsion,
//! collision, keyboard, mouse, weapon, behavior, timer, health.

pub mod body_system;
pub mod propulsion_system;
pub mod collision_system;
pub mod keyboard_system;
pub mod mouse_system;
pub mod weapon_system;
pub mod behavior_system;
pub mod timer_system;
pub mod health_system;

pub use body_system::BodySystem;
pub use propulsion_system::PropulsionSystem;
pub use collision_system::CollisionSystem;
pub use keyboard_system::KeyboardSystem;
pub use mouse_system::MouseSystem;
pub use weapon_system::{FireHook, Targeting, Weapon, WeaponState, WeaponSystem};
pub use behavior_system::BehaviorSystem;
pub use timer_system::TimerSystem;
pub use health_system::HealthSystem;
