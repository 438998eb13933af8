//! Event types and observers used by the simulation.
//!
//! Events let the collision grid report hits without knowing what reacts to
//! them.
//!
//! Submodules:
//! - [`collision`] – collision notifications emitted by the collision system
pub mod collision;
