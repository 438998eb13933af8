//! Enemy controller.
//!
//! While enemy movement is enabled, enemies slide sideways and reverse at the
//! play-area edges. Independently, each enemy counts down to its next shot;
//! when the timer fires a new shot is spawned, unless the enemy already has
//! [`Enemy::max_shots`] shots alive or enemy bullets are paused, and a new
//! random delay is drawn.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::{ENEMY_SHOT_SIZE, ENEMY_SHOT_SPEED, Enemy};
use crate::components::mapposition::MapPosition;
use crate::components::objectkind::ObjectKind;
use crate::components::projectile::Projectile;
use crate::game::spawn_projectile;
use crate::resources::playarea::PlayArea;
use crate::resources::rng::GameRng;
use crate::resources::session::SessionStats;
use crate::resources::simulationconfig::SimulationConfig;
use crate::resources::worldtime::WorldTime;

pub fn enemy_controller(
    time: Res<WorldTime>,
    config: Res<SimulationConfig>,
    area: Res<PlayArea>,
    mut rng: ResMut<GameRng>,
    mut stats: ResMut<SessionStats>,
    mut enemies: Query<(Entity, &mut Enemy, &mut MapPosition, &BoxCollider)>,
    projectiles: Query<&Projectile>,
    mut commands: Commands,
) {
    for (entity, mut enemy, mut position, collider) in enemies.iter_mut() {
        let half = collider.half_extents();

        if config.move_enemies {
            position.pos.x += enemy.speed * time.delta;
            if position.pos.x < half.x {
                position.pos.x = half.x;
                enemy.speed = -enemy.speed;
            } else if position.pos.x > area.w - half.x {
                position.pos.x = area.w - half.x;
                enemy.speed = -enemy.speed;
            }
        }

        enemy.shot_timer += time.delta;
        if enemy.shot_timer < enemy.next_shot {
            continue;
        }

        let live_shots = projectiles.iter().filter(|p| p.owner == entity).count();
        if live_shots < enemy.max_shots && config.move_bullets {
            spawn_projectile(
                &mut commands,
                entity,
                ObjectKind::EnemyProjectile,
                position.pos - Vec2::new(0.0, half.y),
                Vec2::new(0.0, -ENEMY_SHOT_SPEED),
                ENEMY_SHOT_SIZE,
            );
            stats.enemy_shots_fired += 1;
        }
        enemy.next_shot = Enemy::random_shot_delay(&mut rng);
        enemy.shot_timer = 0.0;
    }
}
