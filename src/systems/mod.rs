//! Simulation systems.
//!
//! This module groups all ECS systems that advance the session each step.
//!
//! Submodules overview
//! - [`collision`] – rebuild the collision grid and trigger collision events
//! - [`enemy`] – enemy drifting and firing
//! - [`input`] – autopilot input and runtime toggles
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`overlay`] – grid occupancy diagnostics
//! - [`projectile`] – pause enemy bullets, clean up off-screen shots
//! - [`ship`] – player ship movement and firing
//! - [`spawn`] – ship and enemy wave respawning
//! - [`time`] – update simulation time and delta

pub mod collision;
pub mod enemy;
pub mod input;
pub mod movement;
pub mod overlay;
pub mod projectile;
pub mod ship;
pub mod spawn;
pub mod time;
