//! Capability contract for objects tracked by the collision grid.
//!
//! Anything that can report a kind, a bounding box and an optional pixel mask
//! can take part in collision detection; no common base type is required.
//! [`TrackedObject`] is the owned per-frame snapshot the simulation builds
//! from ECS components.

use std::sync::Arc;

use glam::Vec2;

use super::boxcollider::Aabb;
use super::collisionmask::CollisionMask;
use super::objectkind::ObjectKind;

pub trait Collidable {
    fn kind(&self) -> ObjectKind;

    /// Current bounding box in play-area coordinates.
    fn bounds(&self) -> Aabb;

    /// Pixel mask stretched over [`Collidable::bounds`]. `None` means the
    /// whole box is solid.
    fn mask(&self) -> Option<&CollisionMask>;

    /// Narrow-phase test. Returns the contact point on a collision.
    #[cfg_attr(not(test), allow(dead_code))]
    fn collides_with(&self, other: &dyn Collidable) -> Option<Vec2> {
        narrow_phase(self.bounds(), self.mask(), other.bounds(), other.mask())
    }
}

/// Bounding-box pre-check followed by a pixel-mask intersection.
///
/// The overlap rectangle is sampled at the centre of every cell of a sampling
/// lattice no coarser than one world unit or the finest mask pixel involved.
/// The first sample solid in both masks is the contact point. With no mask on
/// either side the boxes alone decide and the contact is the overlap centre.
pub fn narrow_phase(
    bounds_a: Aabb,
    mask_a: Option<&CollisionMask>,
    bounds_b: Aabb,
    mask_b: Option<&CollisionMask>,
) -> Option<Vec2> {
    let overlap = bounds_a.intersection(&bounds_b)?;
    if mask_a.is_none() && mask_b.is_none() {
        return Some(overlap.center());
    }

    let pitch = [(bounds_a, mask_a), (bounds_b, mask_b)]
        .into_iter()
        .filter_map(|(bounds, mask)| mask.map(|m| pixel_pitch(&bounds, m)))
        .fold(Vec2::ONE, Vec2::min);
    let cols = ((overlap.width() / pitch.x).ceil() as usize).max(1);
    let rows = ((overlap.height() / pitch.y).ceil() as usize).max(1);
    let step = Vec2::new(
        overlap.width() / cols as f32,
        overlap.height() / rows as f32,
    );

    for row in 0..rows {
        for col in 0..cols {
            let point = overlap.min + Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * step;
            let solid_a = mask_a.is_none_or(|m| m.is_solid_at(&bounds_a, point));
            if solid_a && mask_b.is_none_or(|m| m.is_solid_at(&bounds_b, point)) {
                return Some(point);
            }
        }
    }
    None
}

/// World size of one mask pixel stretched over `bounds`. Empty masks and
/// degenerate boxes fall back to one unit.
fn pixel_pitch(bounds: &Aabb, mask: &CollisionMask) -> Vec2 {
    let axis = |extent: f32, pixels: usize| {
        let pitch = extent / pixels as f32;
        if pitch.is_finite() && pitch > 0.0 { pitch } else { 1.0 }
    };
    Vec2::new(
        axis(bounds.width(), mask.width()),
        axis(bounds.height(), mask.height()),
    )
}

/// Owned snapshot of a tracked object for one simulation step.
#[derive(Debug, Clone)]
pub struct TrackedObject {
    pub kind: ObjectKind,
    pub bounds: Aabb,
    pub mask: Option<Arc<CollisionMask>>,
}

impl TrackedObject {
    pub fn new(kind: ObjectKind, bounds: Aabb) -> Self {
        Self {
            kind,
            bounds,
            mask: None,
        }
    }

    pub fn with_mask(mut self, mask: Option<Arc<CollisionMask>>) -> Self {
        self.mask = mask;
        self
    }
}

impl Collidable for TrackedObject {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn mask(&self) -> Option<&CollisionMask> {
        self.mask.as_deref()
    }
}
