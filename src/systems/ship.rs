//! Player ship controller.
//!
//! Moves the ship from [`InputState`], keeps it inside the play area, and
//! fires a shot on each new press of the fire action while fewer than
//! [`Ship::max_shots`] of its shots are alive.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::objectkind::ObjectKind;
use crate::components::projectile::Projectile;
use crate::components::ship::{SHIP_SHOT_SIZE, SHIP_SHOT_SPEED, Ship};
use crate::game::spawn_projectile;
use crate::resources::input::InputState;
use crate::resources::playarea::PlayArea;
use crate::resources::session::SessionStats;
use crate::resources::worldtime::WorldTime;

pub fn ship_controller(
    time: Res<WorldTime>,
    input: Res<InputState>,
    area: Res<PlayArea>,
    mut stats: ResMut<SessionStats>,
    mut ships: Query<(Entity, &Ship, &mut MapPosition, &BoxCollider)>,
    projectiles: Query<&Projectile>,
    mut commands: Commands,
) {
    for (entity, ship, mut position, collider) in ships.iter_mut() {
        let mut direction = Vec2::ZERO;
        if input.move_right.active {
            direction.x += 1.0;
        }
        if input.move_left.active {
            direction.x -= 1.0;
        }
        if input.move_up.active {
            direction.y += 1.0;
        }
        if input.move_down.active {
            direction.y -= 1.0;
        }

        let half = collider.half_extents();
        position.pos = area.clamp_center(position.pos + direction * ship.speed * time.delta, half);

        if !input.fire.just_pressed {
            continue;
        }
        let live_shots = projectiles.iter().filter(|p| p.owner == entity).count();
        if live_shots >= ship.max_shots {
            continue;
        }
        spawn_projectile(
            &mut commands,
            entity,
            ObjectKind::PlayerProjectile,
            position.pos + Vec2::new(0.0, half.y),
            Vec2::new(0.0, SHIP_SHOT_SPEED),
            SHIP_SHOT_SIZE,
        );
        stats.shots_fired += 1;
    }
}
