//! Entity-Component-System implementation
//!
//! Entities are loose records owning at most one component per kind;
//! components live in per-kind insertion-ordered stores; systems run in a
//! fixed pipeline once per frame. Creation and destruction are legal at any
//! point, including from hooks fired inside a traversal.

pub mod components;
pub mod entity;
pub mod component;
pub mod store;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{
    CollisionHook, Component, ComponentKey, ComponentKind, EntityHook, KeyHook, Payload,
};
pub use entity::{Entity, EntityId, EntityTag, Team};
pub use store::ComponentStore;
pub use system::{Pipeline, System};
pub use world::World;
