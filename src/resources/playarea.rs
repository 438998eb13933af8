//! Play-area size resource.
//!
//! Fixed for the lifetime of a session; the collision grid is laid out from
//! it once at startup.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::boxcollider::Aabb;

/// Play-area size in world units. Origin at the bottom-left.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub w: f32,
    pub h: f32,
}

impl PlayArea {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w: w as f32,
            h: h as f32,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(self.w, self.h))
    }

    /// Clamp a center position so a box of `half` extents stays inside.
    pub fn clamp_center(&self, pos: Vec2, half: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(half.x, (self.w - half.x).max(half.x)),
            pos.y.clamp(half.y, (self.h - half.y).max(half.y)),
        )
    }
}
