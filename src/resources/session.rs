//! Session bookkeeping resources.
//!
//! [`SessionState`] holds what the spawn systems need between steps: the
//! current ship and the respawn timers. [`SessionStats`] accumulates the
//! counters reported at the end of a run.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::components::objectkind::ObjectKind;

#[derive(Resource, Debug, Clone, Default)]
pub struct SessionState {
    /// The live player ship, if any.
    pub ship: Option<Entity>,
    /// Seconds since the ship was destroyed.
    pub ship_spawn_timer: f32,
    /// Seconds since the last enemy was destroyed.
    pub enemy_spawn_timer: f32,
}

#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub frames: u64,
    pub collisions: u64,
    /// Collisions per `"<source>-><hit>"` kind pair.
    pub collisions_by_pair: FxHashMap<String, u64>,
    pub enemies_destroyed: u64,
    pub ships_lost: u64,
    pub ships_spawned: u64,
    pub shots_fired: u64,
    pub enemy_shots_fired: u64,
    pub waves_spawned: u64,
}

impl SessionStats {
    pub fn record_collision(&mut self, source: ObjectKind, hit: ObjectKind) {
        self.collisions += 1;
        let key = format!("{}->{}", source.label(), hit.label());
        *self.collisions_by_pair.entry(key).or_insert(0) += 1;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pair_count(&self, source: ObjectKind, hit: ObjectKind) -> u64 {
        let key = format!("{}->{}", source.label(), hit.label());
        self.collisions_by_pair.get(&key).copied().unwrap_or(0)
    }
}
