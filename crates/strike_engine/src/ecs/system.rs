//! System trait and the fixed frame pipeline

use crate::ecs::world::World;

/// A per-frame update pass over the world
pub trait System {
    /// Short name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Run one frame's worth of work
    fn update(&mut self, world: &mut World, delta_time: f32);
}

/// Ordered list of systems, fixed at construction
///
/// Systems run in the order given; there is no registration after the
/// pipeline exists. Each may create or destroy entities, including ones a
/// later system is about to traverse.
pub struct Pipeline {
    systems: Vec<Box<dyn System>>,
}

impl Pipeline {
    /// Build a pipeline from an ordered system list
    pub fn new(systems: Vec<Box<dyn System>>) -> Self {
        Self { systems }
    }

    /// Run every system once, in order
    pub fn run(&mut self, world: &mut World, delta_time: f32) {
        for system in &mut self.systems {
            log::trace!("Running {} system", system.name());
            system.update(world, delta_time);
        }
    }

    /// Names of the systems in run order
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Number of systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether the pipeline holds no systems
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
