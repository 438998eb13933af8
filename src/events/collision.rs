//! Collision event types and observers.
//!
//! The collision system triggers a [`CollisionEvent`] for every pair the grid
//! resolves in a step. Any number of observers can subscribe; the grid itself
//! never removes anything.
//!
//! Two observers ship with the crate:
//! - [`observe_collision_despawn`] removes both participants, like the
//!   arcade rules of the classic shooter.
//! - [`observe_collision_stats`] counts collisions for the run summary.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::objectkind::ObjectKind;
use crate::resources::session::{SessionState, SessionStats};

/// Event fired when the grid finds a collision.
///
/// `source` is the object that was checked (the player or one of its shots),
/// `hit` the object it ran into. Both kinds are carried so observers do not
/// depend on the entities still existing.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub source: Entity,
    pub source_kind: ObjectKind,
    pub hit: Entity,
    pub hit_kind: ObjectKind,
    /// First overlapping point found by the narrow phase.
    pub contact: Vec2,
}

impl CollisionEvent {
    /// Both participants with their kinds.
    pub fn participants(&self) -> [(Entity, ObjectKind); 2] {
        [(self.source, self.source_kind), (self.hit, self.hit_kind)]
    }
}

/// Global observer that despawns both collided entities.
///
/// If the player's ship is destroyed, the session forgets it so the spawn
/// system can bring a new one after the respawn delay.
pub fn observe_collision_despawn(
    trigger: On<CollisionEvent>,
    mut commands: Commands,
    mut session: ResMut<SessionState>,
) {
    let event = trigger.event();
    debug!(
        "Collision: {:?} {:?} hit {:?} {:?} at ({:.1}, {:.1})",
        event.source_kind,
        event.source,
        event.hit_kind,
        event.hit,
        event.contact.x,
        event.contact.y
    );

    for (entity, kind) in event.participants() {
        if kind == ObjectKind::Player && session.ship == Some(entity) {
            session.ship = None;
            session.ship_spawn_timer = 0.0;
        }
        commands.entity(entity).try_despawn();
    }
}

/// Global observer that records collisions in [`SessionStats`].
pub fn observe_collision_stats(trigger: On<CollisionEvent>, mut stats: ResMut<SessionStats>) {
    let event = trigger.event();
    stats.record_collision(event.source_kind, event.hit_kind);
    for (_, kind) in event.participants() {
        match kind {
            ObjectKind::Enemy => stats.enemies_destroyed += 1,
            ObjectKind::Player => stats.ships_lost += 1,
            _ => {}
        }
    }
}
