//! Respawning.
//!
//! A destroyed ship comes back after [`SimulationConfig::respawn_delay`]
//! seconds. Once every enemy is gone, a new wave of
//! [`SimulationConfig::enemies_per_wave`] enemies arrives after the same
//! delay.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::enemy::Enemy;
use crate::game::{spawn_enemies, spawn_ship};
use crate::resources::playarea::PlayArea;
use crate::resources::rng::GameRng;
use crate::resources::session::{SessionState, SessionStats};
use crate::resources::simulationconfig::SimulationConfig;
use crate::resources::worldtime::WorldTime;

pub fn respawn_system(
    time: Res<WorldTime>,
    config: Res<SimulationConfig>,
    area: Res<PlayArea>,
    mut session: ResMut<SessionState>,
    mut stats: ResMut<SessionStats>,
    mut rng: ResMut<GameRng>,
    enemies: Query<(), With<Enemy>>,
    mut commands: Commands,
) {
    if session.ship.is_none() {
        session.ship_spawn_timer += time.delta;
        if session.ship_spawn_timer >= config.respawn_delay {
            session.ship = Some(spawn_ship(&mut commands, &area));
            session.ship_spawn_timer = 0.0;
            stats.ships_spawned += 1;
            info!("Ship respawned");
        }
    }

    if enemies.is_empty() {
        session.enemy_spawn_timer += time.delta;
        if session.enemy_spawn_timer >= config.respawn_delay {
            spawn_enemies(&mut commands, &area, &mut rng, config.enemies_per_wave);
            session.enemy_spawn_timer = 0.0;
            stats.waves_spawned += 1;
            info!("Spawned a wave of {} enemies", config.enemies_per_wave);
        }
    }
}
