//! Per-step input resource.
//!
//! Captures the actions the session reacts to: ship movement, firing, and the
//! four runtime toggles. The simulation is headless, so the state is written
//! by [`autopilot_input`](crate::systems::input::autopilot_input) or directly
//! by tests instead of a keyboard. The key each action stands for is kept for
//! log output.
use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean action state with the key it stands for.
pub struct BoolState {
    /// Whether the action is currently active this step.
    pub active: bool,
    /// Whether the action became active this step.
    pub just_pressed: bool,
    /// Whether the action stopped being active this step.
    #[cfg_attr(not(test), allow(dead_code))]
    pub just_released: bool,

    /// Name of the key bound to this action.
    pub key_binding: &'static str,
}

impl BoolState {
    pub fn bound_to(key_binding: &'static str) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    /// Record the new active state and derive the edge flags.
    pub fn set(&mut self, active: bool) {
        self.just_pressed = active && !self.active;
        self.just_released = !active && self.active;
        self.active = active;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to("")
    }
}

/// Resource holding the per-step state of every action.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_up: BoolState,
    pub move_down: BoolState,
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub fire: BoolState,
    // Toggles
    pub toggle_bounding_boxes: BoolState,
    pub toggle_grid: BoolState,
    pub toggle_enemy_movement: BoolState,
    pub toggle_bullet_movement: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_up: BoolState::bound_to("Up"),
            move_down: BoolState::bound_to("Down"),
            move_left: BoolState::bound_to("Left"),
            move_right: BoolState::bound_to("Right"),
            fire: BoolState::bound_to("LeftControl"),
            toggle_bounding_boxes: BoolState::bound_to("B"),
            toggle_grid: BoolState::bound_to("G"),
            toggle_enemy_movement: BoolState::bound_to("E"),
            toggle_bullet_movement: BoolState::bound_to("S"),
        }
    }
}
