//! Player ship component.

use bevy_ecs::prelude::Component;

/// Collider size of the ship, matching its mask.
pub const SHIP_SIZE: (f32, f32) = (24.0, 24.0);
/// Ship speed, 7 units per frame at 60 steps per second.
pub const SHIP_SPEED: f32 = 7.0 * 60.0;
/// Live shots allowed at once.
pub const SHIP_MAX_SHOTS: usize = 4;
/// Shot speed, 100 units per quarter second.
pub const SHIP_SHOT_SPEED: f32 = 400.0;
pub const SHIP_SHOT_SIZE: (f32, f32) = (4.0, 12.0);

/// Marks the entity steered by [`InputState`](crate::resources::input::InputState).
#[derive(Component, Debug, Clone, Copy)]
pub struct Ship {
    /// Speed in units per second.
    pub speed: f32,
    pub max_shots: usize,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            speed: SHIP_SPEED,
            max_shots: SHIP_MAX_SHOTS,
        }
    }
}
