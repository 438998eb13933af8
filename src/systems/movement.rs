//! Kinematic movement.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Move every body by its velocity over the step. Frozen bodies stay put.
pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        let step = rigidbody.displacement(time.delta);
        if step != glam::Vec2::ZERO {
            position.pos += step;
        }
    }
}
