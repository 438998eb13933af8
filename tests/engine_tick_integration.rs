//! Tick integration tests for movement, projectiles, controllers, collision
//! and respawning.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;
use glam::Vec2;

use collisiongrid::components::boxcollider::BoxCollider;
use collisiongrid::components::enemy::{ENEMY_MAX_SHOTS, Enemy};
use collisiongrid::components::mapposition::MapPosition;
use collisiongrid::components::objectkind::ObjectKind;
use collisiongrid::components::projectile::Projectile;
use collisiongrid::components::rigidbody::RigidBody;
use collisiongrid::components::ship::{SHIP_MAX_SHOTS, Ship};
use collisiongrid::events::collision::{
    CollisionEvent, observe_collision_despawn, observe_collision_stats,
};
use collisiongrid::game::{build_schedule, build_world, run_session, spawn_projectile};
use collisiongrid::resources::collisiongrid::CollisionGrid;
use collisiongrid::resources::input::InputState;
use collisiongrid::resources::maskstore::MaskStore;
use collisiongrid::resources::playarea::PlayArea;
use collisiongrid::resources::rng::GameRng;
use collisiongrid::resources::session::{SessionState, SessionStats};
use collisiongrid::resources::simulationconfig::SimulationConfig;
use collisiongrid::resources::worldtime::WorldTime;
use collisiongrid::systems::collision::collision_detector;
use collisiongrid::systems::enemy::enemy_controller;
use collisiongrid::systems::input::apply_toggles;
use collisiongrid::systems::movement::movement;
use collisiongrid::systems::projectile::{despawn_offscreen_projectiles, freeze_enemy_bullets};
use collisiongrid::systems::ship::ship_controller;
use collisiongrid::systems::spawn::respawn_system;
use collisiongrid::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(PlayArea::new(1024, 768));
    world.insert_resource(CollisionGrid::<Entity>::new(1024, 768));
    world.insert_resource(MaskStore::new());
    world.insert_resource(SimulationConfig::new());
    world.insert_resource(InputState::default());
    world.insert_resource(GameRng::new(Some(1)));
    world.insert_resource(SessionState::default());
    world.insert_resource(SessionStats::default());
    world
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);
    schedule.run(world);
}

fn tick_collision_detector(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collision_detector);
    schedule.run(world);
}

fn tick_offscreen_cleanup(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(despawn_offscreen_projectiles);
    schedule.run(world);
}

fn tick_toggles_and_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((apply_toggles, freeze_enemy_bullets, movement).chain());
    schedule.run(world);
}

fn tick_ship(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(ship_controller);
    schedule.run(world);
}

fn tick_enemies(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(enemy_controller);
    schedule.run(world);
}

fn tick_respawn(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(respawn_system);
    schedule.run(world);
}

fn spawn_object(world: &mut World, kind: ObjectKind, x: f32, y: f32, w: f32, h: f32) -> Entity {
    world
        .spawn((kind, MapPosition::new(x, y), BoxCollider::centered(w, h)))
        .id()
}

/// Record every collision event as `(source, hit)`.
fn record_collisions(world: &mut World) -> Arc<Mutex<Vec<(Entity, Entity)>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    world.add_observer(move |trigger: On<CollisionEvent>| {
        let event = trigger.event();
        seen_clone.lock().unwrap().push((event.source, event.hit));
    });
    world.flush();
    seen
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn movement_integrates_velocity_into_position() {
    let mut world = make_world(0.5);
    let entity = world
        .spawn((
            MapPosition::new(10.0, 20.0),
            RigidBody::with_velocity(Vec2::new(4.0, -8.0)),
        ))
        .id();

    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 12.0));
    assert!(approx_eq(pos.pos.y, 16.0));
}

#[test]
fn movement_skips_frozen_bodies() {
    let mut world = make_world(1.0);
    let mut body = RigidBody::with_velocity(Vec2::new(100.0, 0.0));
    body.freeze();
    let entity = world.spawn((MapPosition::new(0.0, 0.0), body)).id();

    tick_movement(&mut world);

    assert!(approx_eq(world.get::<MapPosition>(entity).unwrap().pos.x, 0.0));
}

#[test]
fn time_scale_doubles_effective_movement() {
    let mut world = make_world(0.0);
    world.insert_resource(WorldTime::default().with_time_scale(2.0));
    let entity = world
        .spawn((
            MapPosition::new(0.0, 0.0),
            RigidBody::with_velocity(Vec2::new(10.0, 0.0)),
        ))
        .id();

    update_world_time(&mut world, 0.5);
    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 10.0));
    assert_eq!(world.resource::<WorldTime>().frame_count, 1);
}

// =============================================================================
// Projectiles
// =============================================================================

#[test]
fn offscreen_projectiles_are_despawned() {
    let mut world = make_world(0.0);
    let owner = world.spawn_empty().id();
    let mut commands = world.commands();
    let gone_up = spawn_projectile(
        &mut commands,
        owner,
        ObjectKind::PlayerProjectile,
        Vec2::new(100.0, 800.0),
        Vec2::new(0.0, 400.0),
        (4.0, 12.0),
    );
    let gone_down = spawn_projectile(
        &mut commands,
        owner,
        ObjectKind::EnemyProjectile,
        Vec2::new(100.0, -5.0),
        Vec2::new(0.0, -400.0),
        (6.0, 6.0),
    );
    let alive = spawn_projectile(
        &mut commands,
        owner,
        ObjectKind::EnemyProjectile,
        Vec2::new(100.0, 300.0),
        Vec2::new(0.0, -400.0),
        (6.0, 6.0),
    );
    world.flush();

    tick_offscreen_cleanup(&mut world);

    assert!(world.get_entity(gone_up).is_err());
    assert!(world.get_entity(gone_down).is_err());
    assert!(world.get_entity(alive).is_ok());
}

#[test]
fn enemy_bullets_pause_and_resume_with_the_toggle() {
    let mut world = make_world(1.0);
    let owner = world.spawn_empty().id();
    let mut commands = world.commands();
    let enemy_shot = spawn_projectile(
        &mut commands,
        owner,
        ObjectKind::EnemyProjectile,
        Vec2::new(100.0, 300.0),
        Vec2::new(0.0, -100.0),
        (6.0, 6.0),
    );
    let player_shot = spawn_projectile(
        &mut commands,
        owner,
        ObjectKind::PlayerProjectile,
        Vec2::new(200.0, 300.0),
        Vec2::new(0.0, 100.0),
        (4.0, 12.0),
    );
    world.flush();

    world.resource_mut::<InputState>().toggle_bullet_movement.set(true);
    tick_toggles_and_movement(&mut world);

    assert!(!world.resource::<SimulationConfig>().move_bullets);
    assert!(approx_eq(world.get::<MapPosition>(enemy_shot).unwrap().pos.y, 300.0));
    assert!(approx_eq(world.get::<MapPosition>(player_shot).unwrap().pos.y, 400.0));

    world.resource_mut::<InputState>().toggle_bullet_movement.set(false);
    world.resource_mut::<InputState>().toggle_bullet_movement.set(true);
    tick_toggles_and_movement(&mut world);

    assert!(world.resource::<SimulationConfig>().move_bullets);
    assert!(approx_eq(world.get::<MapPosition>(enemy_shot).unwrap().pos.y, 200.0));
}

// =============================================================================
// Ship and enemies
// =============================================================================

#[test]
fn ship_moves_and_stays_inside_the_play_area() {
    let mut world = make_world(1.0);
    let ship = world
        .spawn((
            Ship::default(),
            ObjectKind::Player,
            MapPosition::new(512.0, 12.0),
            BoxCollider::centered(24.0, 24.0),
        ))
        .id();

    world.resource_mut::<InputState>().move_left.set(true);
    tick_ship(&mut world);

    // 420 units left from 512 is 92.
    assert!(approx_eq(world.get::<MapPosition>(ship).unwrap().pos.x, 92.0));

    tick_ship(&mut world);
    assert!(approx_eq(world.get::<MapPosition>(ship).unwrap().pos.x, 12.0));
}

#[test]
fn ship_fire_is_limited_to_max_shots() {
    let mut world = make_world(0.0);
    world.spawn((
        Ship::default(),
        ObjectKind::Player,
        MapPosition::new(512.0, 12.0),
        BoxCollider::centered(24.0, 24.0),
    ));

    world.resource_mut::<InputState>().fire.set(true);
    for _ in 0..SHIP_MAX_SHOTS + 3 {
        tick_ship(&mut world);
    }

    let shots = world.query::<&Projectile>().iter(&world).count();
    assert_eq!(shots, SHIP_MAX_SHOTS);
    assert_eq!(world.resource::<SessionStats>().shots_fired, SHIP_MAX_SHOTS as u64);
    let kinds: Vec<ObjectKind> = world
        .query_filtered::<&ObjectKind, With<Projectile>>()
        .iter(&world)
        .copied()
        .collect();
    assert!(kinds.iter().all(|k| *k == ObjectKind::PlayerProjectile));
}

#[test]
fn enemy_bounces_off_the_right_edge() {
    let mut world = make_world(1.0);
    let enemy = world
        .spawn((
            Enemy {
                speed: 120.0,
                next_shot: 100.0,
                shot_timer: 0.0,
                max_shots: ENEMY_MAX_SHOTS,
            },
            ObjectKind::Enemy,
            MapPosition::new(1000.0, 500.0),
            BoxCollider::centered(24.0, 16.0),
        ))
        .id();

    tick_enemies(&mut world);

    let pos = world.get::<MapPosition>(enemy).unwrap().pos;
    assert!(approx_eq(pos.x, 1012.0));
    assert!(world.get::<Enemy>(enemy).unwrap().speed < 0.0);
}

#[test]
fn enemy_holds_still_when_movement_is_off() {
    let mut world = make_world(1.0);
    world.resource_mut::<SimulationConfig>().move_enemies = false;
    let enemy = world
        .spawn((
            Enemy {
                speed: 120.0,
                next_shot: 100.0,
                shot_timer: 0.0,
                max_shots: ENEMY_MAX_SHOTS,
            },
            ObjectKind::Enemy,
            MapPosition::new(500.0, 500.0),
            BoxCollider::centered(24.0, 16.0),
        ))
        .id();

    tick_enemies(&mut world);

    assert!(approx_eq(world.get::<MapPosition>(enemy).unwrap().pos.x, 500.0));
}

#[test]
fn enemy_fires_when_its_timer_runs_out() {
    let mut world = make_world(1.0);
    let enemy = world
        .spawn((
            Enemy {
                speed: 0.0,
                next_shot: 1.0,
                shot_timer: 0.0,
                max_shots: ENEMY_MAX_SHOTS,
            },
            ObjectKind::Enemy,
            MapPosition::new(500.0, 500.0),
            BoxCollider::centered(24.0, 16.0),
        ))
        .id();

    tick_enemies(&mut world);

    let shots: Vec<(Entity, ObjectKind)> = world
        .query::<(&Projectile, &ObjectKind)>()
        .iter(&world)
        .map(|(p, k)| (p.owner, *k))
        .collect();
    assert_eq!(shots, vec![(enemy, ObjectKind::EnemyProjectile)]);
    assert_eq!(world.resource::<SessionStats>().enemy_shots_fired, 1);

    let state = world.get::<Enemy>(enemy).unwrap();
    assert_eq!(state.shot_timer, 0.0);
    assert!((2.0..=4.0).contains(&state.next_shot));
}

#[test]
fn enemy_does_not_fire_while_bullets_are_paused() {
    let mut world = make_world(1.0);
    world.resource_mut::<SimulationConfig>().move_bullets = false;
    world.spawn((
        Enemy {
            speed: 0.0,
            next_shot: 1.0,
            shot_timer: 0.0,
            max_shots: ENEMY_MAX_SHOTS,
        },
        ObjectKind::Enemy,
        MapPosition::new(500.0, 500.0),
        BoxCollider::centered(24.0, 16.0),
    ));

    tick_enemies(&mut world);

    assert_eq!(world.query::<&Projectile>().iter(&world).count(), 0);
}

// =============================================================================
// Collision
// =============================================================================

#[test]
fn collision_pipeline_reports_player_and_enemy_shot() {
    let mut world = make_world(0.0);
    let player = spawn_object(&mut world, ObjectKind::Player, 512.0, 40.0, 16.0, 16.0);
    let shot = spawn_object(&mut world, ObjectKind::EnemyProjectile, 512.0, 45.0, 16.0, 16.0);
    let seen = record_collisions(&mut world);

    tick_collision_detector(&mut world);

    assert_eq!(*seen.lock().unwrap(), vec![(player, shot)]);
    let grid = world.resource::<CollisionGrid>();
    assert_eq!(grid.tracked_count(), 2);
    assert_eq!(grid.cells_of(player), grid.cells_of(shot));
}

#[test]
fn exempt_pairs_raise_no_event() {
    let mut world = make_world(0.0);
    spawn_object(&mut world, ObjectKind::Player, 300.0, 40.0, 24.0, 24.0);
    spawn_object(&mut world, ObjectKind::PlayerProjectile, 300.0, 45.0, 4.0, 12.0);
    spawn_object(&mut world, ObjectKind::Enemy, 600.0, 400.0, 24.0, 16.0);
    spawn_object(&mut world, ObjectKind::Enemy, 605.0, 402.0, 24.0, 16.0);
    spawn_object(&mut world, ObjectKind::EnemyProjectile, 600.0, 395.0, 6.0, 6.0);
    let seen = record_collisions(&mut world);

    tick_collision_detector(&mut world);

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn collision_observers_despawn_both_and_count() {
    let mut world = make_world(0.0);
    world.add_observer(observe_collision_despawn);
    world.add_observer(observe_collision_stats);
    world.flush();

    let shot = spawn_object(&mut world, ObjectKind::PlayerProjectile, 400.0, 300.0, 4.0, 12.0);
    let enemy = spawn_object(&mut world, ObjectKind::Enemy, 400.0, 305.0, 24.0, 16.0);
    let bystander = spawn_object(&mut world, ObjectKind::Enemy, 800.0, 600.0, 24.0, 16.0);

    tick_collision_detector(&mut world);

    assert!(world.get_entity(shot).is_err());
    assert!(world.get_entity(enemy).is_err());
    assert!(world.get_entity(bystander).is_ok());

    let stats = world.resource::<SessionStats>();
    assert_eq!(stats.collisions, 1);
    assert_eq!(stats.enemies_destroyed, 1);
    assert_eq!(
        stats.pair_count(ObjectKind::PlayerProjectile, ObjectKind::Enemy),
        1
    );
}

#[test]
fn two_shots_on_one_enemy_score_once() {
    let mut world = make_world(0.0);
    world.add_observer(observe_collision_despawn);
    world.add_observer(observe_collision_stats);
    world.flush();

    let first = spawn_object(&mut world, ObjectKind::PlayerProjectile, 400.0, 300.0, 4.0, 12.0);
    let second = spawn_object(&mut world, ObjectKind::PlayerProjectile, 402.0, 300.0, 4.0, 12.0);
    spawn_object(&mut world, ObjectKind::Enemy, 400.0, 305.0, 24.0, 16.0);

    tick_collision_detector(&mut world);

    assert_eq!(world.resource::<SessionStats>().collisions, 1);
    // Registration order decides which shot scores; the other one survives.
    assert_ne!(world.get_entity(first).is_ok(), world.get_entity(second).is_ok());
}

#[test]
fn losing_the_ship_clears_the_session() {
    let mut world = make_world(0.0);
    world.add_observer(observe_collision_despawn);
    world.add_observer(observe_collision_stats);
    world.flush();

    let ship = spawn_object(&mut world, ObjectKind::Player, 512.0, 40.0, 24.0, 24.0);
    world.resource_mut::<SessionState>().ship = Some(ship);
    spawn_object(&mut world, ObjectKind::EnemyProjectile, 512.0, 45.0, 6.0, 6.0);

    tick_collision_detector(&mut world);

    assert!(world.resource::<SessionState>().ship.is_none());
    assert_eq!(world.resource::<SessionStats>().ships_lost, 1);
}

#[test]
fn shots_of_a_dead_owner_are_not_tracked() {
    let mut world = make_world(0.0);
    let ship = spawn_object(&mut world, ObjectKind::Player, 512.0, 40.0, 24.0, 24.0);
    let dead_owner = world.spawn_empty().id();
    let live_owner = world
        .spawn(Enemy {
            speed: 0.0,
            next_shot: 100.0,
            shot_timer: 0.0,
            max_shots: ENEMY_MAX_SHOTS,
        })
        .id();
    let mut commands = world.commands();
    let orphan = spawn_projectile(
        &mut commands,
        dead_owner,
        ObjectKind::EnemyProjectile,
        Vec2::new(512.0, 45.0),
        Vec2::ZERO,
        (6.0, 6.0),
    );
    let stray = spawn_projectile(
        &mut commands,
        dead_owner,
        ObjectKind::PlayerProjectile,
        Vec2::new(300.0, 300.0),
        Vec2::ZERO,
        (4.0, 12.0),
    );
    world.flush();
    spawn_object(&mut world, ObjectKind::Enemy, 300.0, 305.0, 24.0, 16.0);
    world.despawn(dead_owner);
    let seen = record_collisions(&mut world);

    tick_collision_detector(&mut world);

    assert!(seen.lock().unwrap().is_empty());
    let grid = world.resource::<CollisionGrid>();
    assert!(grid.cells_of(orphan).is_none());
    assert!(grid.cells_of(stray).is_none());
    assert_eq!(grid.tracked_count(), 2);

    let mut commands = world.commands();
    let owned = spawn_projectile(
        &mut commands,
        live_owner,
        ObjectKind::EnemyProjectile,
        Vec2::new(512.0, 45.0),
        Vec2::ZERO,
        (6.0, 6.0),
    );
    world.flush();

    tick_collision_detector(&mut world);

    assert_eq!(*seen.lock().unwrap(), vec![(ship, owned)]);
}

// =============================================================================
// Respawning
// =============================================================================

#[test]
fn ship_respawns_after_the_delay() {
    let mut world = make_world(1.0);
    // Keep the enemy wave timer out of the way.
    world.spawn((
        Enemy {
            speed: 0.0,
            next_shot: 100.0,
            shot_timer: 0.0,
            max_shots: ENEMY_MAX_SHOTS,
        },
        ObjectKind::Enemy,
        MapPosition::new(500.0, 500.0),
        BoxCollider::centered(24.0, 16.0),
    ));

    tick_respawn(&mut world);
    tick_respawn(&mut world);
    assert!(world.resource::<SessionState>().ship.is_none());

    tick_respawn(&mut world);
    let ship = world.resource::<SessionState>().ship.expect("ship respawned");
    assert!(world.get::<Ship>(ship).is_some());
    assert_eq!(world.get::<ObjectKind>(ship), Some(&ObjectKind::Player));
    assert_eq!(world.resource::<SessionStats>().ships_spawned, 1);
}

#[test]
fn new_wave_arrives_once_every_enemy_is_gone() {
    let mut world = make_world(1.5);
    world.resource_mut::<SimulationConfig>().enemies_per_wave = 4;
    let ship = world.spawn_empty().id();
    world.resource_mut::<SessionState>().ship = Some(ship);

    tick_respawn(&mut world);
    assert_eq!(world.query::<&Enemy>().iter(&world).count(), 0);

    tick_respawn(&mut world);
    assert_eq!(world.query::<&Enemy>().iter(&world).count(), 4);
    assert_eq!(world.resource::<SessionStats>().waves_spawned, 1);
    assert_eq!(world.resource::<SessionState>().enemy_spawn_timer, 0.0);

    let area = *world.resource::<PlayArea>();
    for (position, collider) in world
        .query_filtered::<(&MapPosition, &BoxCollider), With<Enemy>>()
        .iter(&world)
    {
        assert!(area.bounds().contains_point(position.pos));
        let half = collider.half_extents();
        assert!(position.pos.x >= half.x && position.pos.x <= area.w - half.x);
    }
}

// =============================================================================
// Whole session
// =============================================================================

#[test]
fn built_world_starts_with_ship_and_wave() {
    let mut config = SimulationConfig::new();
    config.seed = Some(42);
    config.enemies_per_wave = 6;
    let mut world = build_world(config, MaskStore::builtin());

    assert!(world.resource::<SessionState>().ship.is_some());
    assert_eq!(world.query::<&Ship>().iter(&world).count(), 1);
    assert_eq!(world.query::<&Enemy>().iter(&world).count(), 6);
    let grid = world.resource::<CollisionGrid>();
    assert_eq!((grid.columns(), grid.rows()), (10, 7));
}

#[test]
fn seeded_sessions_are_reproducible() {
    let run = || {
        let mut config = SimulationConfig::new();
        config.seed = Some(7);
        config.show_grid = false;
        let mut world = build_world(config, MaskStore::builtin());
        let mut schedule = build_schedule(true);
        run_session(&mut world, &mut schedule, 600)
    };
    let a = run();
    let b = run();

    assert_eq!(a.frames, 600);
    assert_eq!(a.collisions, b.collisions);
    assert_eq!(a.shots_fired, b.shots_fired);
    assert_eq!(a.enemy_shots_fired, b.enemy_shots_fired);
    assert_eq!(a.enemies_destroyed, b.enemies_destroyed);
    assert!(a.shots_fired > 0);
}

#[test]
fn manual_schedule_leaves_input_to_the_caller() {
    let mut config = SimulationConfig::new();
    config.seed = Some(3);
    config.move_enemies = false;
    config.move_bullets = false;
    let mut world = build_world(config, MaskStore::new());
    let mut schedule = build_schedule(false);

    let stats = run_session(&mut world, &mut schedule, 120);

    assert_eq!(stats.frames, 120);
    assert_eq!(stats.shots_fired, 0);
    assert_eq!(stats.enemy_shots_fired, 0);
    assert_eq!(stats.ships_spawned, 1);
}
