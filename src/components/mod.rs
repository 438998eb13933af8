//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulation. Components define data such as position, collision shape,
//! velocity, and the per-kind behaviour of ships, enemies and shots.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box type and the rectangular collider component
//! - [`collidable`] – the capability the grid needs from an object, plus the narrow phase
//! - [`collisionmask`] – per-pixel solidity masks for precise collision
//! - [`enemy`] – enemy saucer state (speed, shot timer)
//! - [`mapposition`] – world-space position (center) for an entity
//! - [`objectkind`] – player / enemy / projectile classification and exemptions
//! - [`projectile`] – shot marker with its owner
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`ship`] – player ship tuning

pub mod boxcollider;
pub mod collidable;
pub mod collisionmask;
pub mod enemy;
pub mod mapposition;
pub mod objectkind;
pub mod projectile;
pub mod rigidbody;
pub mod ship;
