//! Kinematic body component.
//!
//! The [`RigidBody`] component stores a constant velocity consumed by the
//! movement system. The `frozen` flag holds the entity in place without
//! losing its velocity, which is how enemy bullets are paused.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// When true, movement system skips this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            frozen: false,
        }
    }

    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            frozen: false,
        }
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Displacement over `dt` seconds, zero while frozen.
    pub fn displacement(&self, dt: f32) -> Vec2 {
        if self.frozen {
            Vec2::ZERO
        } else {
            self.velocity * dt
        }
    }
}
