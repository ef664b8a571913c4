//! Session assembly
//!
//! A session is a world plus the standard frame pipeline, wired from a
//! [`SessionConfig`]. The driver owns the clock: it calls [`Session::tick`]
//! with each frame's elapsed seconds and the pipeline does the rest.

use crate::config::SessionConfig;
use crate::ecs::system::Pipeline;
use crate::ecs::systems::{
    BehaviorSystem, BodySystem, CollisionSystem, HealthSystem, KeyboardSystem, MouseSystem,
    PropulsionSystem, TimerSystem, WeaponSystem,
};
use crate::ecs::world::World;

/// A running game: the world and the pipeline that advances it
pub struct Session {
    /// The live world; gameplay code reaches in freely between ticks
    pub world: World,

    pipeline: Pipeline,
}

impl Session {
    /// Build a session with the standard system order
    ///
    /// Movement runs first and death resolution last, so a frame's damage
    /// is always visible to the frame that dealt it: body, propulsion,
    /// collision, keyboard, mouse, weapon, behavior, timer, health.
    pub fn new(config: SessionConfig) -> Self {
        log::info!(
            "Starting session on a {}x{} level",
            config.level.width,
            config.level.height
        );
        let pipeline = Pipeline::new(vec![
            Box::new(BodySystem::new(config.level)),
            Box::new(PropulsionSystem),
            Box::new(CollisionSystem::new(config.level, config.collision)),
            Box::new(KeyboardSystem),
            Box::new(MouseSystem),
            Box::new(WeaponSystem),
            Box::new(BehaviorSystem),
            Box::new(TimerSystem),
            Box::new(HealthSystem),
        ]);
        Self {
            world: World::new(),
            pipeline,
        }
    }

    /// Advance the world by one frame of `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) {
        self.pipeline.run(&mut self.world, delta_time);
    }

    /// The session's pipeline, for inspection
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Tear the session down, destroying every entity
    ///
    /// Destroy hooks fire as usual, so gameplay teardown runs exactly as it
    /// would for in-game destruction.
    pub fn shutdown(mut self) {
        log::info!(
            "Shutting down session with {} live entities",
            self.world.entity_count()
        );
        self.world.clear_entities();
    }
}
