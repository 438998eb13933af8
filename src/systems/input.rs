//! Input systems.
//!
//! [`autopilot_input`] stands in for a player at the keyboard so a headless
//! session exercises movement, firing and the toggles. [`apply_toggles`]
//! turns toggle presses into [`SimulationConfig`] changes.
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::input::InputState;
use crate::resources::rng::GameRng;
use crate::resources::simulationconfig::SimulationConfig;

/// Chance per step that the autopilot picks a new heading.
const HEADING_CHANGE_ODDS: u32 = 30;
/// Chance per step that a released fire button gets pressed.
const FIRE_ODDS: u32 = 6;
/// Chance per step that any given toggle gets pressed.
const TOGGLE_ODDS: u32 = 900;

/// Random-walk steering with bursts of fire.
///
/// The heading persists across steps in `heading` as (horizontal, vertical)
/// in -1..=1. The ship mostly holds its row near the bottom of the screen.
pub fn autopilot_input(
    mut input: ResMut<InputState>,
    mut rng: ResMut<GameRng>,
    mut heading: Local<(i32, i32)>,
) {
    if rng.0.u32(0..HEADING_CHANGE_ODDS) == 0 {
        heading.0 = rng.0.i32(-1..=1);
        heading.1 = if rng.0.u32(0..4) == 0 { rng.0.i32(-1..=1) } else { 0 };
    }
    input.move_left.set(heading.0 < 0);
    input.move_right.set(heading.0 > 0);
    input.move_down.set(heading.1 < 0);
    input.move_up.set(heading.1 > 0);

    // Fire must be released between shots to register a new press.
    let fire = !input.fire.active && rng.0.u32(0..FIRE_ODDS) == 0;
    input.fire.set(fire);

    let toggles = [
        rng.0.u32(0..TOGGLE_ODDS) == 0,
        rng.0.u32(0..TOGGLE_ODDS) == 0,
        rng.0.u32(0..TOGGLE_ODDS) == 0,
        rng.0.u32(0..TOGGLE_ODDS) == 0,
    ];
    input.toggle_bounding_boxes.set(toggles[0]);
    input.toggle_grid.set(toggles[1]);
    input.toggle_enemy_movement.set(toggles[2]);
    input.toggle_bullet_movement.set(toggles[3]);
}

/// Flip the configuration toggles whose action was just pressed.
pub fn apply_toggles(input: Res<InputState>, mut config: ResMut<SimulationConfig>) {
    if input.toggle_bounding_boxes.just_pressed {
        config.show_bounding_boxes = !config.show_bounding_boxes;
        info!(
            "Bounding boxes {} [{}]",
            on_off(config.show_bounding_boxes),
            input.toggle_bounding_boxes.key_binding
        );
    }
    if input.toggle_grid.just_pressed {
        config.show_grid = !config.show_grid;
        info!(
            "Collision grid overlay {} [{}]",
            on_off(config.show_grid),
            input.toggle_grid.key_binding
        );
    }
    if input.toggle_enemy_movement.just_pressed {
        config.move_enemies = !config.move_enemies;
        info!(
            "Enemy movement {} [{}]",
            on_off(config.move_enemies),
            input.toggle_enemy_movement.key_binding
        );
    }
    if input.toggle_bullet_movement.just_pressed {
        config.move_bullets = !config.move_bullets;
        info!(
            "Enemy bullet movement {} [{}]",
            on_off(config.move_bullets),
            input.toggle_bullet_movement.key_binding
        );
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
