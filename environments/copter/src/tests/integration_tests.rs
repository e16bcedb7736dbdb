//! Integration tests defining complete episode behaviour.
//!
//! These tests verify:
//! - A full level episode running into the time limit
//! - Failure episodes and their reward
//! - Reproducibility of seeded rollouts
//! - Reward and termination invariants over random action sequences

use approx::assert_relative_eq;
use operant_core::{Env, Transition};
use proptest::prelude::*;

use super::fixed_start_env;
use crate::config::CopterConfig;
use crate::constants::*;
use crate::env::{Copter, EpisodePhase};
use crate::reward::{LevelBonus, RewardComponent};
use crate::state::CopterState;

// ============================================================================
// Complete Episode Rollouts
// ============================================================================

#[test]
fn should_pay_level_reward_for_full_episode_then_truncate() {
    let mut env = fixed_start_env();
    env.reset();

    for step in 1..=300 {
        let t = env.step(&[0.0; 4]).unwrap();
        assert_relative_eq!(t.reward, 1.2, epsilon = 1e-12);
        assert!(!t.done(), "episode ended early at step {step}");
        assert_eq!(&t.observation[..], &[0.0; 6]);
    }

    let t = env.step(&[0.0; 4]).unwrap();
    assert!(t.truncated);
    assert!(!t.terminated);
    assert_relative_eq!(t.reward, 1.2, epsilon = 1e-12);
    assert_eq!(env.phase(), EpisodePhase::Terminated);
    assert_eq!(env.step_count(), 301);
    assert_relative_eq!(env.episode_reward(), 301.0 * 1.2, epsilon = 1e-9);

    // Position and velocity keep integrating under gravity
    assert!(env.state().position[2] < -4000.0);
    assert_relative_eq!(env.state().velocity[2], -G * 30.1, max_relative = 1e-9);
}

#[test]
fn should_fail_with_fixed_reward_once_tilted_past_threshold() {
    let mut env = fixed_start_env();
    env.reset();
    // Rolling at 0.5 rad/s crosses 20 degrees on the seventh step
    env.set_state(CopterState::with_angular_velocity([0.5, 0.0, 0.0]))
        .unwrap();

    let mut last = None;
    for _ in 0..20 {
        let t = env.step(&[0.0; 4]).unwrap();
        let done = t.done();
        last = Some(t);
        if done {
            break;
        }
    }

    let t: Transition = last.unwrap();
    assert!(t.terminated);
    assert!(!t.truncated);
    assert_eq!(t.reward, FAILURE_REWARD);
    assert!(t.observation[0] > FAIL_THRESHOLD);
    assert_eq!(env.step_count(), 7);
    assert_eq!(env.log().failures, 1);
}

#[test]
fn should_reproduce_seeded_rollout() {
    let actions: Vec<[f64; 4]> = (0..40)
        .map(|i| {
            let x = (i as f64 * 0.37).sin();
            [x, -x * 0.5, x * 0.25, (i as f64 * 0.11).cos()]
        })
        .collect();

    let run = |seed: u64| {
        let mut env = Copter::new();
        env.seed(Some(seed));
        env.reset();
        actions
            .iter()
            .map_while(|a| env.step(a).ok())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(2024), run(2024));
    assert_ne!(run(2024), run(2025));
}

// ============================================================================
// Property-Based Tests with Proptest
// ============================================================================

fn unit_action() -> impl Strategy<Value = [f64; 4]> {
    prop::array::uniform4(-1.0f64..=1.0)
}

proptest! {
    /// Property: every transition satisfies the reward/termination contract
    #[test]
    fn test_transition_contract(
        seed in any::<u64>(),
        actions in prop::collection::vec(unit_action(), 1..80),
    ) {
        let mut env = CopterConfig::new().with_seed(seed).build().unwrap();
        let obs = env.reset();
        prop_assert!(obs.iter().all(|v| v.is_finite()));

        for action in &actions {
            let t = env.step(action).unwrap();
            prop_assert!(t.observation.iter().all(|v| v.is_finite()));

            if t.done() {
                prop_assert!(t.terminated != t.truncated);
            }
            if t.terminated {
                prop_assert_eq!(t.reward, FAILURE_REWARD);
                prop_assert!(env.state().attitude_error() > FAIL_THRESHOLD);
                break;
            }
            prop_assert!(t.reward >= ALIVE_REWARD - 1e-12);
            prop_assert!(t.reward <= ALIVE_REWARD + LEVEL_BONUS + 1e-12);
            if t.truncated {
                break;
            }
        }
    }

    /// Property: the level bonus never grows with attitude error
    #[test]
    fn test_level_bonus_monotonic(
        a in 0.0f64..0.2,
        b in 0.0f64..0.2,
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let bonus = LevelBonus { threshold: ATTITUDE_THRESHOLD, scale: LEVEL_BONUS };
        let at = |err: f64| bonus.compute(&CopterState {
            attitude: [0.0, err, 0.0],
            ..Default::default()
        });

        prop_assert!(at(small) >= at(large));
        prop_assert!(at(small) <= LEVEL_BONUS);
        prop_assert!(at(large) >= 0.0);
    }

    /// Property: reset always yields a level, motionless start within range
    #[test]
    fn test_reset_within_bounds(seed in any::<u64>()) {
        let mut env = Copter::new();
        prop_assert_eq!(env.seed(Some(seed)), seed);
        let obs = env.reset();

        prop_assert_eq!(&obs[0..3], &[0.0; 3]);
        for &w in &obs[3..6] {
            prop_assert!((-INIT_ANGULAR_VEL_RANGE..INIT_ANGULAR_VEL_RANGE).contains(&w));
        }
        prop_assert_eq!(env.step_count(), 0);
    }

    /// Property: out-of-bounds actions never change the episode
    #[test]
    fn test_invalid_action_is_side_effect_free(
        seed in any::<u64>(),
        index in 0usize..4,
        excess in 1e-6f64..10.0,
        negative in any::<bool>(),
    ) {
        let mut env = CopterConfig::new().with_seed(seed).build().unwrap();
        env.reset();
        let before = *env.state();

        let mut action = [0.0; 4];
        action[index] = if negative { -1.0 - excess } else { 1.0 + excess };
        prop_assert!(env.step(&action).is_err());
        prop_assert_eq!(env.state(), &before);
        prop_assert_eq!(env.step_count(), 0);
        prop_assert!(env.step(&[0.0; 4]).is_ok());
    }
}
