//! Operant Core - environment contracts for reinforcement learning.
//!
//! This crate provides the abstractions concrete environments implement:
//!
//! - [`Env`] - reset/step/seed/render contract of a single instance
//! - [`Environment`] - batch contract for vectorized instances
//! - [`BoxSpace`] - action and observation space declarations
//! - [`StepResult`] - borrowed batch step result
//! - [`ResetMask`] - packed bitmask for selective environment reset
//! - [`LogData`] - trait for environment metrics tracking

pub mod env;
pub mod error;
pub mod space;

pub use env::{Env, EnvMetadata, Environment, Info, LogData, ResetMask, StepResult, Transition};
pub use error::{OperantError, Result};
pub use space::BoxSpace;
