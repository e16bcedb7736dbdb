//! Edge case tests for invalid input and numeric failures.
//!
//! Every rejected call must leave the episode exactly as it was, and a
//! subsequent `reset` must always produce a valid fresh episode.

use operant_core::{Env, OperantError};

use super::fixed_start_env;
use crate::config::CopterConfig;
use crate::env::{Copter, EpisodePhase};
use crate::params::CopterParams;
use crate::state::CopterState;

fn ready_env() -> Copter {
    let mut env = CopterConfig::new().with_seed(11).build().unwrap();
    env.reset();
    env.step(&[0.1, 0.2, -0.3, 0.4]).unwrap();
    env
}

fn assert_untouched(env: &Copter, state: &CopterState, steps: u32) {
    assert_eq!(env.state(), state);
    assert_eq!(env.step_count(), steps);
    assert_eq!(env.phase(), EpisodePhase::Ready);
}

// ============================================================================
// Action Validation
// ============================================================================

#[test]
fn should_reject_out_of_bounds_action_without_mutation() {
    let mut env = ready_env();
    let before = *env.state();

    let err = env.step(&[2.0, 0.0, 0.0, 0.0]).unwrap_err();
    assert_eq!(
        err,
        OperantError::InvalidAction {
            index: 0,
            value: 2.0,
            low: -1.0,
            high: 1.0
        }
    );
    assert!(err.is_action_error());
    assert_untouched(&env, &before, 1);

    let obs = env.reset();
    assert_eq!(obs.len(), 6);
    assert_eq!(env.step_count(), 0);
    assert!(env.step(&[0.0; 4]).is_ok());
}

#[test]
fn should_accept_bounds_inclusive() {
    let mut env = ready_env();
    assert!(env.step(&[1.0, -1.0, 1.0, -1.0]).is_ok());
}

#[test]
fn should_reject_nan_and_infinite_actions() {
    let mut env = ready_env();
    let before = *env.state();

    assert!(matches!(
        env.step(&[0.0, f64::NAN, 0.0, 0.0]),
        Err(OperantError::InvalidAction { index: 1, .. })
    ));
    assert!(matches!(
        env.step(&[0.0, 0.0, 0.0, f64::NEG_INFINITY]),
        Err(OperantError::InvalidAction { index: 3, .. })
    ));
    assert_untouched(&env, &before, 1);
}

#[test]
fn should_reject_wrong_action_length() {
    let mut env = ready_env();
    let before = *env.state();

    assert_eq!(
        env.step(&[0.0; 3]),
        Err(OperantError::ActionDimensionMismatch { expected: 4, actual: 3 })
    );
    assert_eq!(
        env.step(&[0.0; 5]),
        Err(OperantError::ActionDimensionMismatch { expected: 4, actual: 5 })
    );
    assert_untouched(&env, &before, 1);
}

#[test]
fn should_check_phase_before_action() {
    let mut env = Copter::new();
    assert_eq!(env.step(&[5.0]), Err(OperantError::NotReset));
}

// ============================================================================
// Numeric Domain
// ============================================================================

#[test]
fn should_fail_explicitly_on_zero_thrust_coefficient() {
    let params = CopterParams {
        thrust_coeff: 0.0,
        ..Default::default()
    };

    // Validation catches it at build time
    let err = CopterConfig::new().with_params(params).build().unwrap_err();
    assert!(matches!(err, OperantError::InvalidConfig { .. }));

    // Bypassing validation, the dynamics still refuse to produce NaN
    let mut env = Copter::from_config(CopterConfig::new().with_seed(1).with_params(params));
    env.reset();
    let before = *env.state();
    let err = env.step(&[0.0; 4]).unwrap_err();
    assert!(matches!(err, OperantError::NumericDomain { .. }));
    assert_untouched(&env, &before, 0);
}

#[test]
fn should_fail_explicitly_on_overflowing_rates() {
    let mut env = fixed_start_env();
    env.reset();
    let extreme = CopterState::with_angular_velocity([1e200, 1e200, 1e200]);
    env.set_state(extreme).unwrap();

    let err = env.step(&[0.0; 4]).unwrap_err();
    assert!(matches!(err, OperantError::NumericDomain { quantity: "angular acceleration", .. }));
    assert_untouched(&env, &extreme, 0);

    let obs = env.reset();
    assert!(obs.iter().all(|v| v.is_finite()));
}

#[test]
fn should_fail_explicitly_when_integration_overflows() {
    let mut env = fixed_start_env();
    env.reset();
    let state = CopterState {
        position: [f64::MAX, 0.0, 0.0],
        velocity: [f64::MAX, 0.0, 0.0],
        ..Default::default()
    };
    env.set_state(state).unwrap();

    let err = env.step(&[0.0; 4]).unwrap_err();
    assert!(matches!(err, OperantError::NumericDomain { quantity: "integrated state", .. }));
    assert_untouched(&env, &state, 0);
}

#[test]
fn should_refuse_non_finite_injected_state() {
    let mut env = fixed_start_env();
    env.reset();
    let bad = CopterState::with_angular_velocity([0.0, f64::NAN, 0.0]);
    assert!(matches!(
        env.set_state(bad),
        Err(OperantError::NumericDomain { .. })
    ));
    assert_eq!(env.state(), &CopterState::at_rest());
}

#[test]
fn should_refuse_state_injection_outside_ready() {
    let mut env = Copter::new();
    assert_eq!(env.set_state(CopterState::at_rest()), Err(OperantError::NotReset));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn should_reject_non_physical_parameters() {
    for params in [
        CopterParams {
            mass: -1.0,
            ..Default::default()
        },
        CopterParams {
            inertia: [0.0, 1.0, 1.0],
            ..Default::default()
        },
        CopterParams {
            drag_coeff: f64::INFINITY,
            ..Default::default()
        },
        CopterParams {
            arm_length: -0.1,
            ..Default::default()
        },
    ] {
        assert!(CopterConfig::new().with_params(params).build().is_err());
    }
}
