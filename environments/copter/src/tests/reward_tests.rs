//! Reward computation tests.
//!
//! These tests define:
//! - The hover preset: 0.2 per step plus a level bonus inside 5 degrees
//! - Linear decay of the level bonus
//! - The failure override

use approx::assert_relative_eq;

use crate::constants::*;
use crate::reward::{compute_reward, presets, RewardComponent};
use crate::state::CopterState;
use crate::termination::TerminationResult;

fn with_attitude(attitude: [f64; 3]) -> CopterState {
    CopterState {
        attitude,
        ..Default::default()
    }
}

const RUNNING: TerminationResult = TerminationResult {
    terminal: false,
    truncated: false,
};

const FAILED: TerminationResult = TerminationResult {
    terminal: true,
    truncated: false,
};

#[test]
fn should_pay_full_bonus_when_level() {
    let reward = presets::hover().compute(&CopterState::at_rest());
    assert_relative_eq!(reward, 1.2, epsilon = 1e-12);
}

#[test]
fn should_pay_half_bonus_at_half_threshold() {
    let state = with_attitude([0.0, ATTITUDE_THRESHOLD / 2.0, 0.0]);
    let reward = presets::hover().compute(&state);
    assert_relative_eq!(reward, 0.7, epsilon = 1e-12);
}

#[test]
fn should_pay_only_alive_reward_outside_threshold() {
    let hover = presets::hover();
    assert_relative_eq!(hover.compute(&with_attitude([ATTITUDE_THRESHOLD, 0.0, 0.0])), 0.2);
    assert_relative_eq!(hover.compute(&with_attitude([0.0, 0.0, 10f64.to_radians()])), 0.2);
}

#[test]
fn should_use_worst_axis_for_bonus() {
    let small = ATTITUDE_THRESHOLD / 10.0;
    let worst = ATTITUDE_THRESHOLD * 0.75;
    let state = with_attitude([small, -worst, small]);
    assert_relative_eq!(presets::hover().compute(&state), 0.2 + 0.25, epsilon = 1e-12);
}

#[test]
fn should_override_with_failure_reward() {
    let state = with_attitude([0.5, 0.0, 0.0]);
    let reward = compute_reward(&presets::hover(), &state, FAILED, FAILURE_REWARD);
    assert_eq!(reward, -10.0);
}

#[test]
fn should_pass_through_when_running() {
    let state = CopterState::at_rest();
    let reward = compute_reward(&presets::hover(), &state, RUNNING, FAILURE_REWARD);
    assert_relative_eq!(reward, 1.2, epsilon = 1e-12);
}

#[test]
fn should_pay_constant_survival_reward() {
    let survival = presets::survival();
    assert_eq!(survival.compute(&CopterState::at_rest()), ALIVE_REWARD);
    assert_eq!(survival.compute(&with_attitude([0.2, 0.0, 0.0])), ALIVE_REWARD);
}
