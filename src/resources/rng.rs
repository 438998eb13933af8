//! Session random number generator.
//!
//! All randomness of a session (spawn positions, enemy speeds, fire timers,
//! autopilot input) comes from this one generator so a seeded run replays
//! exactly.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(fastrand::Rng::with_seed(seed)),
            None => Self(fastrand::Rng::new()),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(None)
    }
}
