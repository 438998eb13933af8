//! Step clock.
//!
//! The session runs at a fixed rate, so [`update_world_time`] is called once
//! per step by [`step`](crate::game::step) with `1 / fps` seconds, before the
//! schedule runs. Systems read the scaled delta from
//! [`WorldTime`](crate::resources::worldtime::WorldTime).
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::worldtime::WorldTime;

/// Advance the clock by one step of `dt` unscaled seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut clock = world.resource_mut::<WorldTime>();
    clock.delta = dt * clock.time_scale;
    clock.elapsed += clock.delta;
    clock.frame_count += 1;
    trace!(
        "Step {} at {:.3}s (+{:.4}s)",
        clock.frame_count, clock.elapsed, clock.delta
    );
}
