//! Behavioural tests for the copter environment.
//!
//! ## Organization
//!
//! - `physics_tests`: acceleration model and integrator
//! - `state_tests`: state helpers
//! - `environment_tests`: `Env` contract, phases, seeding, pool adapter
//! - `termination_tests`: failure and time-limit conditions
//! - `reward_tests`: reward components and presets
//! - `edge_case_tests`: invalid input and numeric failure handling
//! - `integration_tests`: full episodes and property checks

pub mod reward_tests;
pub mod edge_case_tests;
pub mod integration_tests;

use crate::config::{CopterConfig, InitConfig};
use crate::env::Copter;

/// Reference environment that starts every episode motionless.
pub(crate) fn fixed_start_env() -> Copter {
    CopterConfig::new()
        .with_seed(7)
        .with_init(InitConfig::fixed_start())
        .build()
        .unwrap()
}
