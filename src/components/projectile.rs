use bevy_ecs::prelude::{Component, Entity};

/// A shot in flight, tagged with the entity that fired it.
///
/// The owner may already be gone. The shot then keeps flying but is no
/// longer registered for collisions.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub owner: Entity,
}
