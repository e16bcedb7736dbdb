//! Quadrotor Attitude-Stabilisation RL Environment
//!
//! A rigid-body quadrotor simulation for reinforcement learning, implementing
//! the operant [`Env`](operant_core::Env) contract for single instances and the
//! [`Environment`](operant_core::Environment) batch contract through
//! [`CopterPool`].
//!
//! # Features
//!
//! - **Euler-Angle Dynamics**: thrust/torque commands back-solved into rotor
//!   speeds, with inertial cross-coupling and rotor gyroscopics
//! - **Explicit Episode State Machine**: stepping before `reset` or after the
//!   end of an episode is an error, never a silent no-op
//! - **Configurable Rewards**: tuple-composed reward components
//! - **Reproducible Seeding**: one xoshiro256** generator per instance
//!
//! # Example
//!
//! ```rust,ignore
//! use copter_env::{CopterConfig, ObsMode};
//! use operant_core::Env;
//!
//! let mut env = CopterConfig::new()
//!     .with_seed(42)
//!     .with_observation(ObsMode::Attitude)
//!     .build()?;
//!
//! let mut obs = env.reset();
//! loop {
//!     let t = env.step(&[0.0, 0.0, 0.0, 0.0])?;
//!     obs = t.observation;
//!     if t.done() {
//!         break;
//!     }
//! }
//! ```
//!
//! # Action Space
//!
//! `[thrust, roll, pitch, yaw]`, each in `[-1, 1]`, multiplied by the action
//! scale (0.05 by default) before entering the dynamics.
//!
//! # Observation Space
//!
//! - [`ObsMode::Attitude`] (6): `[roll, pitch, yaw, droll, dpitch, dyaw]`
//! - [`ObsMode::Full`] (12): the above followed by position and velocity

pub mod adapter;
pub mod config;
pub mod constants;
pub mod env;
pub mod observation;
pub mod params;
pub mod physics;
pub mod reward;
pub mod state;
pub mod termination;

#[cfg(test)]
pub mod tests;

pub use adapter::CopterPool;
pub use config::{CopterConfig, InitConfig};
pub use env::{Copter, CopterLog, EpisodePhase};
pub use observation::ObsMode;
pub use params::CopterParams;
pub use reward::{presets, RewardComponent};
pub use state::CopterState;
pub use termination::{TerminationConfig, TerminationResult};
