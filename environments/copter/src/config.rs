//! Configuration types for the copter environment.
//!
//! Uses the builder pattern for ergonomic configuration:
//!
//! ```ignore
//! let env = CopterConfig::new()
//!     .with_seed(7)
//!     .with_observation(ObsMode::Full)
//!     .with_termination(TerminationConfig::default().with_max_steps(500))
//!     .build()?;
//! ```

use operant_core::{OperantError, Result};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::env::Copter;
use crate::observation::ObsMode;
use crate::params::CopterParams;
use crate::reward::{presets, RewardComponent};
use crate::termination::TerminationConfig;

// ============================================================================
// Initialization Configuration
// ============================================================================

/// Episode start distribution.
///
/// Every episode starts at the origin, level and motionless, except for an
/// angular velocity drawn uniformly from `[-angular_vel_range, angular_vel_range]`
/// on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitConfig {
    /// Half-width of the initial angular velocity range (rad/s)
    pub angular_vel_range: f64,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            angular_vel_range: INIT_ANGULAR_VEL_RANGE,
        }
    }
}

impl InitConfig {
    pub fn with_angular_vel_range(mut self, range: f64) -> Self {
        self.angular_vel_range = range;
        self
    }

    /// Deterministic start: no initial rotation.
    pub fn fixed_start() -> Self {
        Self {
            angular_vel_range: 0.0,
        }
    }
}

// ============================================================================
// Main Configuration
// ============================================================================

/// Complete configuration of one copter environment.
///
/// The reward is a type parameter so composed rewards stay monomorphic.
#[derive(Clone, Debug)]
pub struct CopterConfig<R: RewardComponent = presets::HoverReward> {
    /// Airframe constants
    pub params: CopterParams,
    /// Integration timestep (s)
    pub dt: f64,
    /// Multiplier applied to normalized actions
    pub action_scale: f64,
    /// Observation layout
    pub obs: ObsMode,
    /// Termination thresholds
    pub termination: TerminationConfig,
    /// Start distribution
    pub init: InitConfig,
    /// Per-step reward terms
    pub reward: R,
    /// Reward reported on failure termination
    pub failure_reward: f64,
    /// Initial generator seed (`None` draws from entropy)
    pub seed: Option<u64>,
}

impl Default for CopterConfig<presets::HoverReward> {
    fn default() -> Self {
        Self {
            params: CopterParams::default(),
            dt: DT,
            action_scale: ACTION_SCALE,
            obs: ObsMode::default(),
            termination: TerminationConfig::default(),
            init: InitConfig::default(),
            reward: presets::hover(),
            failure_reward: FAILURE_REWARD,
            seed: None,
        }
    }
}

impl CopterConfig<presets::HoverReward> {
    /// Reference configuration with the hover reward.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RewardComponent> CopterConfig<R> {
    /// Swap the reward, keeping every other setting.
    pub fn with_reward_fn<R2: RewardComponent>(self, reward: R2) -> CopterConfig<R2> {
        CopterConfig {
            params: self.params,
            dt: self.dt,
            action_scale: self.action_scale,
            obs: self.obs,
            termination: self.termination,
            init: self.init,
            reward,
            failure_reward: self.failure_reward,
            seed: self.seed,
        }
    }

    pub fn with_params(mut self, params: CopterParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_action_scale(mut self, scale: f64) -> Self {
        self.action_scale = scale;
        self
    }

    pub fn with_observation(mut self, obs: ObsMode) -> Self {
        self.obs = obs;
        self
    }

    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_init(mut self, init: InitConfig) -> Self {
        self.init = init;
        self
    }

    pub fn with_failure_reward(mut self, reward: f64) -> Self {
        self.failure_reward = reward;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Get observation size.
    pub fn observation_size(&self) -> usize {
        self.obs.observation_size()
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;

        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(OperantError::config("dt", format!("must be finite and positive, got {}", self.dt)));
        }
        if !(self.action_scale.is_finite() && self.action_scale > 0.0) {
            return Err(OperantError::config(
                "action_scale",
                format!("must be finite and positive, got {}", self.action_scale),
            ));
        }
        if self.termination.max_steps == 0 {
            return Err(OperantError::config("max_steps", "must be at least 1"));
        }
        if !(self.termination.fail_threshold > 0.0) {
            return Err(OperantError::config(
                "fail_threshold",
                format!("must be positive, got {}", self.termination.fail_threshold),
            ));
        }
        if !(self.init.angular_vel_range.is_finite() && self.init.angular_vel_range >= 0.0) {
            return Err(OperantError::config(
                "angular_vel_range",
                format!("must be finite and non-negative, got {}", self.init.angular_vel_range),
            ));
        }
        if !self.failure_reward.is_finite() {
            return Err(OperantError::config("failure_reward", "must be finite"));
        }

        Ok(())
    }

    /// Build the environment.
    pub fn build(self) -> Result<Copter<R>> {
        self.validate()?;
        Ok(Copter::from_config(self))
    }
}
