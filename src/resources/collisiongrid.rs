//! Spatial collision grid.
//!
//! The play area is split into uniform cells. Every step the grid is cleared,
//! each live object is registered into the cells its bounding-box corners fall
//! in, and detailed collision tests only run between objects sharing a cell.
//!
//! # Per-step usage
//!
//! ```ignore
//! grid.initialize();
//! grid.update_locations(objects.iter().map(|(key, obj)| (*key, obj)));
//! let hits = grid.check_collisions(&sources, |key| objects.get(&key));
//! ```
//!
//! # Cell layout
//!
//! Cell indices start at the bottom-left of the play area and run right, then
//! up: in a 10-column grid index 10 is the first cell of the second row.
//!
//! # Pair pruning
//!
//! Before the narrow phase runs, a candidate is skipped when it is the source
//! itself, has the same [`ObjectKind`], or is the source's own side
//! (player with player shots, enemy with enemy shots).
//!
//! [`ObjectKind`]: crate::components::objectkind::ObjectKind

use std::hash::Hash;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::components::boxcollider::Aabb;
use crate::components::collidable::{Collidable, narrow_phase};

/// Nominal cell size used when none is given.
pub const DEFAULT_CELL_SIZE: u32 = 100;

/// Cell indices an object occupies: one per distinct bounding-box corner.
pub type CellSet = ArrayVec<usize, 4>;

/// Derived layout of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridDimensions {
    /// Lay out cells over a `width` x `height` area starting from a nominal
    /// cell size.
    ///
    /// Any remainder left by the integer division is absorbed by growing the
    /// cells, so `columns * cell_width >= width` and
    /// `rows * cell_height >= height`. An area smaller than one nominal cell
    /// gets a single column/row.
    pub fn new(width: u32, height: u32, cell_width: u32, cell_height: u32) -> Self {
        let (columns, cell_width) = split_axis(width, cell_width);
        let (rows, cell_height) = split_axis(height, cell_height);
        Self {
            width,
            height,
            columns,
            rows,
            cell_width,
            cell_height,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Column and row of a play-area point, clamped into the grid.
    pub fn cell_coords(&self, x: f32, y: f32) -> (u32, u32) {
        let col = (x / self.cell_width as f32).floor().max(0.0) as u32;
        let row = (y / self.cell_height as f32).floor().max(0.0) as u32;
        (col.min(self.columns - 1), row.min(self.rows - 1))
    }

    /// Cell index of a play-area point.
    pub fn cell_index(&self, x: f32, y: f32) -> usize {
        let (col, row) = self.cell_coords(x, y);
        row as usize * self.columns as usize + col as usize
    }

    /// Play-area rectangle covered by a cell.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cell_bounds(&self, index: usize) -> Option<Aabb> {
        if index >= self.cell_count() {
            return None;
        }
        let col = (index % self.columns as usize) as f32;
        let row = (index / self.columns as usize) as f32;
        let size = Vec2::new(self.cell_width as f32, self.cell_height as f32);
        let min = Vec2::new(col, row) * size;
        Some(Aabb::new(min, min + size))
    }
}

fn split_axis(extent: u32, nominal: u32) -> (u32, u32) {
    let nominal = nominal.max(1);
    let count = extent / nominal;
    if count == 0 {
        return (1, nominal);
    }
    let remainder = extent % nominal;
    (count, nominal + remainder.div_ceil(count))
}

/// Collision found by the grid: `source` was checked and hit `hit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCollision<K> {
    pub source: K,
    pub hit: K,
    /// First overlapping point reported by the narrow phase.
    pub contact: Vec2,
}

/// Broad-phase grid keyed by `K` (an [`Entity`] in the simulation).
///
/// Bins are rebuilt every step; nothing is removed incrementally. An object
/// left out of the next rebuild simply stops being tracked.
#[derive(Resource, Debug, Clone)]
pub struct CollisionGrid<K = Entity>
where
    K: Copy + Eq + Hash,
{
    dims: GridDimensions,
    bins: FxHashMap<usize, SmallVec<[K; 4]>>,
    object_cells: FxHashMap<K, CellSet>,
}

impl<K> CollisionGrid<K>
where
    K: Copy + Eq + Hash,
{
    /// Grid over a `width` x `height` play area with the default cell size.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_cell_size(width, height, DEFAULT_CELL_SIZE, DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(width: u32, height: u32, cell_width: u32, cell_height: u32) -> Self {
        Self {
            dims: GridDimensions::new(width, height, cell_width, cell_height),
            bins: FxHashMap::default(),
            object_cells: FxHashMap::default(),
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn rows(&self) -> u32 {
        self.dims.rows
    }

    pub fn columns(&self) -> u32 {
        self.dims.columns
    }

    pub fn cell_width(&self) -> u32 {
        self.dims.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.dims.cell_height
    }

    /// Clear all bins and the object index. Call once per step before
    /// registering objects again.
    pub fn initialize(&mut self) {
        self.bins.clear();
        self.object_cells.clear();
    }

    /// Register `object` under `key` in every cell its bounding box touches.
    ///
    /// `None` is ignored, so a handle to an object destroyed earlier in the
    /// step can be passed as is. Registering the same key again replaces its
    /// previous cells.
    pub fn update_location<T>(&mut self, key: K, object: Option<&T>)
    where
        T: Collidable + ?Sized,
    {
        let Some(object) = object else {
            return;
        };
        let cells = self.covered_cells(&object.bounds());

        if let Some(previous) = self.object_cells.remove(&key) {
            for index in previous.iter().filter(|i| !cells.contains(*i)) {
                if let Some(bin) = self.bins.get_mut(index) {
                    bin.retain(|k| *k != key);
                }
            }
        }

        for &index in &cells {
            let bin = self.bins.entry(index).or_default();
            if !bin.contains(&key) {
                bin.push(key);
            }
        }
        self.object_cells.insert(key, cells);
    }

    /// Register every object of a collection.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn update_locations<'a, T, I>(&mut self, objects: I)
    where
        T: Collidable + ?Sized + 'a,
        I: IntoIterator<Item = (K, &'a T)>,
    {
        for (key, object) in objects {
            self.update_location(key, Some(object));
        }
    }

    /// Look for the first collision of `source` against the objects sharing
    /// its cells.
    ///
    /// `lookup` resolves keys to objects; keys it cannot resolve are skipped.
    /// A `None` source or one not registered this step yields `None`.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn check_collision<'a, T, F>(&self, source: Option<K>, lookup: F) -> Option<GridCollision<K>>
    where
        T: Collidable + ?Sized + 'a,
        F: Fn(K) -> Option<&'a T>,
    {
        self.first_collision(source?, &lookup, &FxHashSet::default())
    }

    /// Check every key of `sources` in order.
    ///
    /// At most one collision is reported per source. Objects already involved
    /// in a collision earlier in the pass are skipped both as sources and as
    /// candidates, since the caller is expected to remove them.
    pub fn check_collisions<'a, T, F>(&self, sources: &[K], lookup: F) -> Vec<GridCollision<K>>
    where
        T: Collidable + ?Sized + 'a,
        F: Fn(K) -> Option<&'a T>,
    {
        let mut resolved: FxHashSet<K> = FxHashSet::default();
        let mut collisions = Vec::new();
        for &source in sources {
            if resolved.contains(&source) {
                continue;
            }
            if let Some(collision) = self.first_collision(source, &lookup, &resolved) {
                resolved.insert(collision.source);
                resolved.insert(collision.hit);
                collisions.push(collision);
            }
        }
        collisions
    }

    /// Cells occupied by `key` this step.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cells_of(&self, key: K) -> Option<&[usize]> {
        self.object_cells.get(&key).map(|cells| cells.as_slice())
    }

    /// Occupants of a cell. Empty for cells nothing was registered in.
    pub fn bin(&self, index: usize) -> &[K] {
        self.bins.get(&index).map(|bin| bin.as_slice()).unwrap_or(&[])
    }

    /// Non-empty bins as `(cell index, occupants)`, in no particular order.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn occupied_bins(&self) -> impl Iterator<Item = (usize, &[K])> {
        self.bins
            .iter()
            .filter(|(_, bin)| !bin.is_empty())
            .map(|(index, bin)| (*index, bin.as_slice()))
    }

    /// Number of objects registered this step.
    pub fn tracked_count(&self) -> usize {
        self.object_cells.len()
    }

    fn covered_cells(&self, bounds: &Aabb) -> CellSet {
        let mut cells = CellSet::new();
        for corner in bounds.corners() {
            let index = self.dims.cell_index(corner.x, corner.y);
            if !cells.contains(&index) {
                cells.push(index);
            }
        }
        cells
    }

    fn first_collision<'a, T, F>(
        &self,
        source: K,
        lookup: &F,
        resolved: &FxHashSet<K>,
    ) -> Option<GridCollision<K>>
    where
        T: Collidable + ?Sized + 'a,
        F: Fn(K) -> Option<&'a T>,
    {
        let cells = self.object_cells.get(&source)?;
        let source_obj = lookup(source)?;
        let source_kind = source_obj.kind();

        for index in cells {
            let Some(bin) = self.bins.get(index) else {
                continue;
            };
            if bin.len() < 2 {
                continue;
            }
            for &candidate in bin {
                if candidate == source || resolved.contains(&candidate) {
                    continue;
                }
                let Some(other) = lookup(candidate) else {
                    continue;
                };
                if source_kind.is_exempt_with(other.kind()) {
                    continue;
                }
                let contact =
                    narrow_phase(source_obj.bounds(), source_obj.mask(), other.bounds(), other.mask());
                if let Some(contact) = contact {
                    trace!("Grid cell {} resolved a collision", index);
                    return Some(GridCollision {
                        source,
                        hit: candidate,
                        contact,
                    });
                }
            }
        }
        None
    }
}
