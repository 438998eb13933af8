//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the collision grid, configuration,
//! input state, timing, and session bookkeeping. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `collisiongrid` – uniform spatial grid for broad-phase collision lookup
//! - `input` – per-step state of the actions the session reacts to
//! - `maskstore` – collision masks keyed by name
//! - `playarea` – bounds of the play area in world units
//! - `rng` – seeded random number generator for the session
//! - `session` – current ship, respawn timers and run statistics
//! - `simulationconfig` – settings loaded from `config.ini` plus runtime toggles
//! - `worldtime` – simulation time and delta
pub mod collisiongrid;
pub mod input;
pub mod maskstore;
pub mod playarea;
pub mod rng;
pub mod session;
pub mod simulationconfig;
pub mod worldtime;
