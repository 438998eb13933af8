//! Projectile upkeep.
//!
//! - [`freeze_enemy_bullets`] pauses or resumes enemy shots following
//!   [`SimulationConfig::move_bullets`].
//! - [`despawn_offscreen_projectiles`] removes shots that left the play area
//!   through the edge they were flying towards.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::objectkind::ObjectKind;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::resources::playarea::PlayArea;
use crate::resources::simulationconfig::SimulationConfig;

pub fn freeze_enemy_bullets(
    config: Res<SimulationConfig>,
    mut query: Query<(&ObjectKind, &mut RigidBody), With<Projectile>>,
) {
    for (kind, mut body) in query.iter_mut() {
        if *kind != ObjectKind::EnemyProjectile || body.frozen != config.move_bullets {
            continue;
        }
        if config.move_bullets {
            body.unfreeze();
        } else {
            body.freeze();
        }
    }
}

pub fn despawn_offscreen_projectiles(
    area: Res<PlayArea>,
    query: Query<(Entity, &ObjectKind, &MapPosition), With<Projectile>>,
    mut commands: Commands,
) {
    for (entity, kind, position) in query.iter() {
        let gone = match kind {
            ObjectKind::PlayerProjectile => position.pos.y > area.h,
            ObjectKind::EnemyProjectile => position.pos.y < 0.0,
            _ => false,
        };
        if gone {
            commands.entity(entity).try_despawn();
        }
    }
}
