//! Single copter environment implementing the operant [`Env`] contract.
//!
//! Wraps the dynamics with an episode state machine:
//!
//! ```text
//! Uninitialized --reset--> Ready --step--> Ready | Terminated
//!                            ^                        |
//!                            +--------- reset --------+
//! ```
//!
//! Every failing call returns before touching the episode.

use log::{debug, trace, warn};
use operant_core::{BoxSpace, Env, EnvMetadata, Info, LogData, OperantError, Result, Transition};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::CopterConfig;
use crate::constants::{ACTION_DIM, FRAMES_PER_SECOND};
use crate::observation::observation;
use crate::physics::dynamics::{accelerations, integrate};
use crate::reward::{compute_reward, presets, RewardComponent};
use crate::state::CopterState;
use crate::termination::{check_termination, TerminationResult};

// ============================================================================
// Episode Log
// ============================================================================

/// Statistics over completed episodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CopterLog {
    /// Total reward accumulated across completed episodes.
    pub total_reward: f64,
    /// Number of completed episodes.
    pub episode_count: u32,
    /// Total steps across completed episodes.
    pub total_steps: u64,
    /// Episodes ended by the attitude failure condition.
    pub failures: u32,
    /// Episodes ended by the step budget.
    pub time_limits: u32,
}

impl CopterLog {
    /// Mean return per completed episode, 0 when none completed.
    pub fn mean_reward(&self) -> f64 {
        if self.episode_count == 0 {
            0.0
        } else {
            self.total_reward / self.episode_count as f64
        }
    }

    fn record(&mut self, episode_reward: f64, steps: u32, termination: TerminationResult) {
        self.total_reward += episode_reward;
        self.episode_count += 1;
        self.total_steps += u64::from(steps);
        if termination.terminal {
            self.failures += 1;
        } else {
            self.time_limits += 1;
        }
    }
}

impl LogData for CopterLog {
    fn merge(&mut self, other: &Self) {
        self.total_reward += other.total_reward;
        self.episode_count += other.episode_count;
        self.total_steps += other.total_steps;
        self.failures += other.failures;
        self.time_limits += other.time_limits;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn episode_count(&self) -> f64 {
        self.episode_count as f64
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Lifecycle phase of the current episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodePhase {
    /// No episode has been started yet
    Uninitialized,
    /// An episode is running and accepts steps
    Ready,
    /// The episode ended; only `reset` is accepted
    Terminated,
}

/// Quadrotor attitude-stabilisation environment.
///
/// Generic over reward type `R` for compile-time reward composition.
/// Defaults to [`presets::HoverReward`].
#[derive(Debug)]
pub struct Copter<R: RewardComponent = presets::HoverReward> {
    config: CopterConfig<R>,
    state: CopterState,
    phase: EpisodePhase,
    step_count: u32,
    episode_reward: f64,

    rng: Xoshiro256StarStar,
    seed: u64,

    action_space: BoxSpace,
    observation_space: BoxSpace,

    log: CopterLog,
}

impl Copter<presets::HoverReward> {
    /// Environment with the reference configuration.
    pub fn new() -> Self {
        Self::from_config(CopterConfig::new())
    }
}

impl Default for Copter<presets::HoverReward> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RewardComponent> Copter<R> {
    /// Create an environment from a configuration.
    ///
    /// Prefer [`CopterConfig::build`], which validates first.
    pub fn from_config(config: CopterConfig<R>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let observation_space = BoxSpace::unbounded(config.observation_size());

        Self {
            state: CopterState::at_rest(),
            phase: EpisodePhase::Uninitialized,
            step_count: 0,
            episode_reward: 0.0,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            seed,
            action_space: BoxSpace::uniform(ACTION_DIM, -1.0, 1.0),
            observation_space,
            log: CopterLog::default(),
            config,
        }
    }

    pub fn config(&self) -> &CopterConfig<R> {
        &self.config
    }

    pub fn state(&self) -> &CopterState {
        &self.state
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Steps taken in the current episode.
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Reward accumulated in the current episode.
    pub fn episode_reward(&self) -> f64 {
        self.episode_reward
    }

    /// Seed of the instance generator.
    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    pub fn log(&self) -> &CopterLog {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Replace the state of the running episode.
    ///
    /// Used to start scenarios from a chosen state. The step counter is kept.
    pub fn set_state(&mut self, state: CopterState) -> Result<()> {
        match self.phase {
            EpisodePhase::Uninitialized => return Err(OperantError::NotReset),
            EpisodePhase::Terminated => return Err(OperantError::EpisodeTerminated),
            EpisodePhase::Ready => {}
        }
        if let Some(value) = state.first_non_finite() {
            return Err(OperantError::NumericDomain {
                quantity: "injected state",
                value,
            });
        }
        self.state = state;
        Ok(())
    }

    /// Integrate one control interval from the current state without
    /// touching the episode.
    pub(crate) fn advance(&self, action: &[f64; ACTION_DIM]) -> Result<CopterState> {
        let acc = accelerations(
            &self.state,
            *action,
            &self.config.params,
            self.config.action_scale,
        )
        .inspect_err(|e| warn!("copter step rejected by dynamics: {e}"))?;

        let next = integrate(&self.state, &acc, self.config.dt);
        if let Some(value) = next.first_non_finite() {
            warn!("copter state diverged at step {}", self.step_count + 1);
            return Err(OperantError::NumericDomain {
                quantity: "integrated state",
                value,
            });
        }
        Ok(next)
    }

    /// Commit a state produced by [`Copter::advance`] and score it.
    pub(crate) fn commit(&mut self, next: CopterState) -> Transition {
        self.state = next;
        self.step_count += 1;

        let err = self.state.attitude_error();
        let termination = check_termination(self.step_count, err, &self.config.termination);
        let reward = compute_reward(
            &self.config.reward,
            &self.state,
            termination,
            self.config.failure_reward,
        );
        self.episode_reward += reward;

        trace!(
            "copter step {}: attitude error {err:.5} rad, reward {reward:.4}",
            self.step_count
        );

        if termination.done() {
            self.phase = EpisodePhase::Terminated;
            self.log
                .record(self.episode_reward, self.step_count, termination);
            debug!(
                "copter episode ended after {} steps ({}), return {:.3}",
                self.step_count,
                if termination.terminal { "failure" } else { "time limit" },
                self.episode_reward
            );
        }

        Transition {
            observation: observation(&self.state, self.config.obs),
            reward,
            terminated: termination.terminal,
            truncated: termination.truncated,
            info: Info::new(),
        }
    }

    fn sample_start(&mut self) -> CopterState {
        let range = self.config.init.angular_vel_range;
        let mut angular_velocity = [0.0; 3];
        for w in &mut angular_velocity {
            *w = random_uniform(&mut self.rng, -range, range);
        }
        CopterState::with_angular_velocity(angular_velocity)
    }
}

/// Uniform sample in `[low, high)`.
#[inline]
fn random_uniform(rng: &mut Xoshiro256StarStar, low: f64, high: f64) -> f64 {
    rng.gen::<f64>() * (high - low) + low
}

impl<R: RewardComponent> Env for Copter<R> {
    fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    fn metadata(&self) -> EnvMetadata {
        EnvMetadata {
            render_modes: &[],
            frames_per_second: FRAMES_PER_SECOND,
        }
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(rand::random);
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
        self.seed = seed;
        debug!("copter reseeded with {seed}");
        seed
    }

    fn reset(&mut self) -> Vec<f64> {
        self.state = self.sample_start();
        self.step_count = 0;
        self.episode_reward = 0.0;
        self.phase = EpisodePhase::Ready;
        debug!(
            "copter reset: angular velocity {:?}",
            self.state.angular_velocity
        );
        observation(&self.state, self.config.obs)
    }

    fn step(&mut self, action: &[f64]) -> Result<Transition> {
        match self.phase {
            EpisodePhase::Uninitialized => return Err(OperantError::NotReset),
            EpisodePhase::Terminated => return Err(OperantError::EpisodeTerminated),
            EpisodePhase::Ready => {}
        }
        self.action_space.check(action)?;
        let action: [f64; ACTION_DIM] =
            action
                .try_into()
                .map_err(|_| OperantError::ActionDimensionMismatch {
                    expected: ACTION_DIM,
                    actual: action.len(),
                })?;

        let next = self.advance(&action)?;
        Ok(self.commit(next))
    }
}
