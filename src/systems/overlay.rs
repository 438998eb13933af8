//! Grid overlay diagnostics.
//!
//! With [`SimulationConfig::show_grid`] on, the occupancy of every grid cell
//! is logged at debug level each step, top row first.
use std::hash::Hash;

use bevy_ecs::prelude::*;
use log::{Level, debug, log_enabled};

use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::simulationconfig::SimulationConfig;
use crate::resources::worldtime::WorldTime;

pub fn grid_overlay_system(
    config: Res<SimulationConfig>,
    grid: Res<CollisionGrid>,
    time: Res<WorldTime>,
) {
    if !config.show_grid || !log_enabled!(Level::Debug) {
        return;
    }
    debug!(
        "Grid at step {} ({} tracked):\n{}",
        time.frame_count,
        grid.tracked_count(),
        occupancy_map(&grid)
    );
}

/// One text line per grid row, top row first. Each cell shows its occupant
/// count: `.` for none, `1`-`9`, `+` for more.
pub fn occupancy_map<K>(grid: &CollisionGrid<K>) -> String
where
    K: Copy + Eq + Hash,
{
    let dims = grid.dimensions();
    let columns = dims.columns as usize;
    let mut out = String::with_capacity((columns + 1) * dims.rows as usize);
    for row in (0..dims.rows as usize).rev() {
        for col in 0..columns {
            let count = grid.bin(row * columns + col).len();
            out.push(match count {
                0 => '.',
                1..=9 => char::from(b'0' + count as u8),
                _ => '+',
            });
        }
        if row > 0 {
            out.push('\n');
        }
    }
    out
}
