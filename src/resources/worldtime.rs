//! Simulation clock resource.
//!
//! Advanced once per step by
//! [`update_world_time`](crate::systems::time::update_world_time).

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Seconds simulated since the session started.
    pub elapsed: f32,
    /// Seconds advanced by the current step, already scaled.
    pub delta: f32,
    pub time_scale: f32,
    /// Steps simulated so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }
}
