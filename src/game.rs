//! Session setup and main loop.
//!
//! [`build_world`] creates the ECS world with every resource and observer a
//! session needs, [`build_schedule`] wires the per-step systems in order, and
//! [`run_session`] steps the world at a fixed rate.
//!
//! # Step order
//!
//! 1. input (autopilot, toggles)
//! 2. ship and enemy controllers (movement, firing)
//! 3. projectile pause/resume, movement, off-screen cleanup
//! 4. collision detection through the grid, observers react
//! 5. respawning
//! 6. grid overlay diagnostics

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::{ENEMY_SIZE, Enemy};
use crate::components::mapposition::MapPosition;
use crate::components::objectkind::ObjectKind;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::components::ship::{SHIP_SIZE, Ship};
use crate::events::collision::{observe_collision_despawn, observe_collision_stats};
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::input::InputState;
use crate::resources::maskstore::MaskStore;
use crate::resources::playarea::PlayArea;
use crate::resources::rng::GameRng;
use crate::resources::session::{SessionState, SessionStats};
use crate::resources::simulationconfig::SimulationConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::collision_detector;
use crate::systems::enemy::enemy_controller;
use crate::systems::input::{apply_toggles, autopilot_input};
use crate::systems::movement::movement;
use crate::systems::overlay::grid_overlay_system;
use crate::systems::projectile::{despawn_offscreen_projectiles, freeze_enemy_bullets};
use crate::systems::ship::ship_controller;
use crate::systems::spawn::respawn_system;
use crate::systems::time::update_world_time;

/// Horizontal range enemies spawn in.
const ENEMY_SPAWN_X: (u32, u32) = (50, 975);
/// Vertical range enemies spawn in.
const ENEMY_SPAWN_Y: (u32, u32) = (200, 725);

/// Create the session world: resources, observers, the ship and the first
/// enemy wave.
pub fn build_world(config: SimulationConfig, masks: MaskStore) -> World {
    let mut world = World::new();
    let (width, height) = config.play_area();

    world.insert_resource(WorldTime::default());
    world.insert_resource(PlayArea::new(width, height));
    world.insert_resource(CollisionGrid::<Entity>::with_cell_size(
        width,
        height,
        config.cell_width,
        config.cell_height,
    ));
    world.insert_resource(masks);
    world.insert_resource(InputState::default());
    world.insert_resource(GameRng::new(config.seed));
    world.insert_resource(SessionState::default());
    world.insert_resource(SessionStats::default());

    {
        let grid = world.resource::<CollisionGrid>();
        info!(
            "Collision grid: {} columns x {} rows of {}x{} over {}x{}",
            grid.columns(),
            grid.rows(),
            grid.cell_width(),
            grid.cell_height(),
            width,
            height
        );
    }

    let enemies_per_wave = config.enemies_per_wave;
    world.insert_resource(config);

    world.add_observer(observe_collision_despawn);
    world.add_observer(observe_collision_stats);
    world.flush();

    let area = *world.resource::<PlayArea>();
    let ship = spawn_ship(&mut world.commands(), &area);
    world.flush();
    world.resource_mut::<SessionState>().ship = Some(ship);
    world.resource_mut::<SessionStats>().ships_spawned += 1;

    world.resource_scope(|world, mut rng: Mut<GameRng>| {
        spawn_enemies(&mut world.commands(), &area, &mut rng, enemies_per_wave);
    });
    world.flush();
    world.resource_mut::<SessionStats>().waves_spawned += 1;

    world
}

/// Per-step systems in execution order.
///
/// With `autopilot` off, [`InputState`] is left to the caller.
pub fn build_schedule(autopilot: bool) -> Schedule {
    let mut update = Schedule::default();
    if autopilot {
        update.add_systems(autopilot_input.before(apply_toggles));
    }
    update.add_systems(
        (
            apply_toggles,
            ship_controller,
            enemy_controller,
            freeze_enemy_bullets,
            movement,
            despawn_offscreen_projectiles,
            collision_detector,
            respawn_system,
            grid_overlay_system,
        )
            .chain(),
    );
    update
}

/// Advance the world by one step of `dt` seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Run `frames` fixed steps and return the session statistics.
pub fn run_session(world: &mut World, schedule: &mut Schedule, frames: u64) -> SessionStats {
    let dt = world.resource::<SimulationConfig>().step_seconds();
    info!("Running {} steps of {:.4}s", frames, dt);
    for _ in 0..frames {
        step(world, schedule, dt);
    }
    let frame_count = world.resource::<WorldTime>().frame_count;
    let mut stats = world.resource::<SessionStats>().clone();
    stats.frames = frame_count;
    stats
}

/// Spawn the player's ship at the bottom middle of the play area.
pub fn spawn_ship(commands: &mut Commands, area: &PlayArea) -> Entity {
    let collider = BoxCollider::centered(SHIP_SIZE.0, SHIP_SIZE.1);
    let pos = Vec2::new(area.w * 0.5, collider.half_extents().y);
    commands
        .spawn((
            Ship::default(),
            ObjectKind::Player,
            MapPosition { pos },
            collider,
        ))
        .id()
}

/// Spawn `count` enemies at random positions in the upper part of the play
/// area.
pub fn spawn_enemies(commands: &mut Commands, area: &PlayArea, rng: &mut GameRng, count: u32) {
    let collider = BoxCollider::centered(ENEMY_SIZE.0, ENEMY_SIZE.1);
    for _ in 0..count {
        let x = rng.0.u32(ENEMY_SPAWN_X.0..ENEMY_SPAWN_X.1) as f32;
        let y = rng.0.u32(ENEMY_SPAWN_Y.0..ENEMY_SPAWN_Y.1) as f32;
        let pos = area.clamp_center(Vec2::new(x, y), collider.half_extents());
        commands.spawn((
            Enemy::random(rng),
            ObjectKind::Enemy,
            MapPosition { pos },
            collider,
        ));
    }
}

/// Spawn a shot fired by `owner`.
pub fn spawn_projectile(
    commands: &mut Commands,
    owner: Entity,
    kind: ObjectKind,
    pos: Vec2,
    velocity: Vec2,
    size: (f32, f32),
) -> Entity {
    commands
        .spawn((
            Projectile { owner },
            kind,
            MapPosition { pos },
            BoxCollider::centered(size.0, size.1),
            RigidBody::with_velocity(velocity),
        ))
        .id()
}
