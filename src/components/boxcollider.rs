//! Axis-aligned bounding boxes.
//!
//! [`Aabb`] is the play-area rectangle every tracked object exposes to the
//! collision grid. [`BoxCollider`] is the component that produces it from an
//! entity's [`MapPosition`](super::mapposition::MapPosition).
//!
//! Coordinates follow the play area: origin at the bottom-left, `y` grows
//! upward.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build a box from two corners. Swapped corners are normalized.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build a box of `size` centered on `center`.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Corners in grid registration order: bottom-left, top-left, top-right,
    /// bottom-right.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.min.x, self.max.y),
            self.max,
            Vec2::new(self.max.x, self.min.y),
        ]
    }

    /// Strict overlap test. Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Overlapping region of two boxes, if any.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Aabb {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// Point containment, edges included.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    /// Offset of the box's minimum corner from the entity position.
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size, anchored at its minimum corner.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Create a BoxCollider centered on the entity position, the way sprites
    /// are anchored.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::new(-width * 0.5, -height * 0.5),
        }
    }

    /// Modify BoxCollider with given offset
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Bounding box for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        Aabb::new(p0, p1)
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size.abs() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_swapped_corners() {
        let b = Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(0.0, 5.0));
        assert_eq!(b.min, Vec2::new(0.0, 5.0));
        assert_eq!(b.max, Vec2::new(10.0, 20.0));
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 15.0);
    }

    #[test]
    fn from_center_spans_half_size_each_way() {
        let b = Aabb::from_center(Vec2::new(512.0, 40.0), Vec2::new(16.0, 16.0));
        assert_eq!(b.min, Vec2::new(504.0, 32.0));
        assert_eq!(b.max, Vec2::new(520.0, 48.0));
        assert_eq!(b.center(), Vec2::new(512.0, 40.0));
    }

    #[test]
    fn corners_are_in_registration_order() {
        let b = Aabb::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(
            b.corners(),
            [
                Vec2::new(1.0, 2.0),
                Vec2::new(1.0, 4.0),
                Vec2::new(3.0, 4.0),
                Vec2::new(3.0, 2.0),
            ]
        );
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn intersection_is_the_shared_region() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 8.0), Vec2::new(20.0, 20.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, Vec2::new(5.0, 8.0));
        assert_eq!(i.max, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn contains_point_includes_edges() {
        let b = Aabb::new(Vec2::ZERO, Vec2::new(4.0, 4.0));
        assert!(b.contains_point(Vec2::new(4.0, 0.0)));
        assert!(!b.contains_point(Vec2::new(4.1, 0.0)));
    }

    #[test]
    fn centered_collider_surrounds_position() {
        let c = BoxCollider::centered(16.0, 8.0);
        let b = c.aabb(Vec2::new(100.0, 100.0));
        assert_eq!(b.min, Vec2::new(92.0, 96.0));
        assert_eq!(b.max, Vec2::new(108.0, 104.0));
        assert_eq!(c.half_extents(), Vec2::new(8.0, 4.0));
    }

    #[test]
    fn collider_handles_negative_size() {
        let c = BoxCollider::new(-10.0, -10.0);
        let b = c.aabb(Vec2::new(50.0, 50.0));
        assert_eq!(b.min, Vec2::new(40.0, 40.0));
        assert_eq!(b.max, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn with_offset_moves_the_box() {
        let c = BoxCollider::new(2.0, 2.0).with_offset(Vec2::new(1.0, 1.0));
        let b = c.aabb(Vec2::ZERO);
        assert_eq!(b.min, Vec2::new(1.0, 1.0));
    }
}
