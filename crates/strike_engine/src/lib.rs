//! # Strike Engine
//!
//! Runtime core for a 2D arcade shooter, written in Rust.
//!
//! ## Features
//!
//! - **ECS Architecture**: Entities as loose component records with
//!   generation-checked handles
//! - **Fixed System Pipeline**: Deterministic per-frame update order
//! - **Arcade Physics**: AABB collision with sub-stepped rollback and
//!   elastic momentum exchange
//! - **Targeting State Machine**: Lockon accumulation, fire queues, and
//!   weapon swapping
//! - **Pluggable Backends**: Rendering, particles, and audio behind traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use strike_engine::prelude::*;
//!
//! fn main() {
//!     strike_engine::foundation::logging::init();
//!
//!     let mut session = Session::new(SessionConfig::default());
//!     let ship = session.world.spawn(Vec2::new(600.0, 400.0), EntityTag::Ship);
//!     session.world.attach(ship, Payload::Body(Body::new(10.0)));
//!
//!     // Driver loop: feed elapsed seconds each frame.
//!     session.tick(1.0 / 60.0);
//!     session.shutdown();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod ecs;
pub mod input;
pub mod render;
pub mod particles;
pub mod audio;
pub mod config;

mod session;

pub use session::Session;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Session,
        config::{CollisionConfig, Config, ConfigError, LevelConfig, SessionConfig},
        ecs::{
            components::{
                Behavior, Body, Collider, Health, KeyboardListener, MouseListener, Propulsion,
                Steering, TeamMask, Timer,
            },
            systems::{FireHook, Targeting, Weapon, WeaponState},
            CollisionHook, ComponentKey, ComponentKind, Entity, EntityHook, EntityId, EntityTag,
            KeyHook, Payload, Pipeline, System, Team, World,
        },
        foundation::math::{Rect, Vec2},
        input::{InputQueue, KeyCode},
        render::{AnimationMode, NullRenderer, RenderBackend, RenderableId},
        particles::{NullParticles, ParticleBackend},
        audio::{AudioBackend, NullAudio},
    };
}
