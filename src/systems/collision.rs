//! Collision step.
//!
//! Once per step [`collision_detector`]:
//!
//! 1. clears the [`CollisionGrid`],
//! 2. snapshots every entity with an [`ObjectKind`], [`MapPosition`] and
//!    [`BoxCollider`] into a [`TrackedObject`] (kind, box, shared mask),
//!    skipping shots whose owner is no longer alive,
//! 3. registers all of them, player side first, then enemies,
//! 4. checks the player and the player's shots only, since enemy-side pairs
//!    are either exempt or already covered from the player's side,
//! 5. triggers a [`CollisionEvent`] for each resolved pair.
//!
//! The snapshot is taken before any check runs and observers only run after
//! the system finishes, so nothing is removed while the grid is scanned.
use bevy_ecs::prelude::*;
use log::trace;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::collidable::TrackedObject;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::objectkind::ObjectKind;
use crate::components::projectile::Projectile;
use crate::components::ship::Ship;
use crate::events::collision::CollisionEvent;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::maskstore::MaskStore;
use crate::resources::simulationconfig::SimulationConfig;

pub fn collision_detector(
    mut grid: ResMut<CollisionGrid>,
    masks: Res<MaskStore>,
    config: Res<SimulationConfig>,
    query: Query<(
        Entity,
        &ObjectKind,
        &MapPosition,
        &BoxCollider,
        Option<&Projectile>,
    )>,
    owners: Query<(), Or<(With<Ship>, With<Enemy>)>>,
    mut commands: Commands,
) {
    grid.initialize();

    let mut order: Vec<(ObjectKind, Entity)> = Vec::new();
    let mut objects: FxHashMap<Entity, TrackedObject> = FxHashMap::default();
    for (entity, kind, position, collider, projectile) in query.iter() {
        // Shots of a dead shooter keep moving but are no longer tracked.
        if projectile.is_some_and(|p| !owners.contains(p.owner)) {
            continue;
        }
        let bounds = collider.aabb(position.pos);
        if config.show_bounding_boxes {
            trace!(
                "{:?} {:?} box ({:.1}, {:.1})-({:.1}, {:.1})",
                kind, entity, bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
            );
        }
        objects.insert(
            entity,
            TrackedObject::new(*kind, bounds).with_mask(masks.for_kind(*kind)),
        );
        order.push((*kind, entity));
    }
    order.sort_unstable_by_key(|(kind, entity)| (registration_rank(*kind), *entity));

    for (_, entity) in &order {
        grid.update_location(*entity, objects.get(entity));
    }

    let sources: Vec<Entity> = order
        .iter()
        .filter(|(kind, _)| matches!(kind, ObjectKind::Player | ObjectKind::PlayerProjectile))
        .map(|(_, entity)| *entity)
        .collect();

    for hit in grid.check_collisions(&sources, |entity| objects.get(&entity)) {
        let (Some(source), Some(target)) = (objects.get(&hit.source), objects.get(&hit.hit)) else {
            continue;
        };
        commands.trigger(CollisionEvent {
            source: hit.source,
            source_kind: source.kind,
            hit: hit.hit,
            hit_kind: target.kind,
            contact: hit.contact,
        });
    }
}

/// Player ship, player shots, enemies, enemy shots.
fn registration_rank(kind: ObjectKind) -> u8 {
    match kind {
        ObjectKind::Player => 0,
        ObjectKind::PlayerProjectile => 1,
        ObjectKind::Enemy => 2,
        ObjectKind::EnemyProjectile => 3,
    }
}
