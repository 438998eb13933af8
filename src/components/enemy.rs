//! Enemy ship component.
//!
//! Enemies sweep sideways across the play area, bouncing off the edges, and
//! fire downward on a randomized timer.

use bevy_ecs::prelude::Component;

use crate::resources::rng::GameRng;

pub const ENEMY_SIZE: (f32, f32) = (24.0, 16.0);
pub const ENEMY_MAX_SHOTS: usize = 2;
/// Shot speed, 100 units per quarter second.
pub const ENEMY_SHOT_SPEED: f32 = 400.0;
pub const ENEMY_SHOT_SIZE: (f32, f32) = (6.0, 6.0);

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    /// Horizontal speed in units per second. The sign is the direction.
    pub speed: f32,
    /// Seconds to wait before the next shot.
    pub next_shot: f32,
    /// Seconds accumulated towards `next_shot`.
    pub shot_timer: f32,
    pub max_shots: usize,
}

impl Enemy {
    /// Random speed of 2..7 units per frame and a first shot in 2..5 seconds.
    pub fn random(rng: &mut GameRng) -> Self {
        Self {
            speed: rng.0.u32(2..7) as f32 * 60.0,
            next_shot: Self::random_shot_delay(rng),
            shot_timer: 0.0,
            max_shots: ENEMY_MAX_SHOTS,
        }
    }

    pub fn random_shot_delay(rng: &mut GameRng) -> f32 {
        rng.0.u32(2..5) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_enemy_stays_in_ranges() {
        let mut rng = GameRng::new(Some(3));
        for _ in 0..100 {
            let e = Enemy::random(&mut rng);
            assert!((120.0..=360.0).contains(&e.speed));
            assert!((2.0..=4.0).contains(&e.next_shot));
            assert_eq!(e.shot_timer, 0.0);
        }
    }
}
