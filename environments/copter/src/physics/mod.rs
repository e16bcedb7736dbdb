//! Physics simulation for the quadrotor.
//!
//! Contains the acceleration model and the fixed-step integrator.

pub mod dynamics;

pub use dynamics::*;
