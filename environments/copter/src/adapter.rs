//! Vectorized pool of independent copter environments.
//!
//! [`CopterPool`] owns N [`Copter`] instances and exposes them through the
//! operant [`Environment`] batch contract with flat AoS buffers. Instance `i`
//! is always seeded with `seed + i`, so a pool reset with a given seed is
//! reproducible regardless of pool size.
//!
//! A batch step either advances every instance or none: the whole batch is
//! validated and integrated before any instance commits its new state.
//!
//! With the `parallel` feature the instances are integrated on the rayon pool.

use log::debug;
use operant_core::{
    BoxSpace, Env, Environment, LogData, OperantError, ResetMask, Result, StepResult, Transition,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::CopterConfig;
use crate::constants::ACTION_DIM;
use crate::env::{Copter, CopterLog, EpisodePhase};
use crate::reward::{presets, RewardComponent};
use crate::state::CopterState;

/// Batch of copter environments stepped in lockstep.
pub struct CopterPool<R: RewardComponent = presets::HoverReward> {
    envs: Vec<Copter<R>>,
    action_space: BoxSpace,
    obs_size: usize,

    // Internal buffers for StepResult
    obs_buffer: Vec<f64>,
    reward_buffer: Vec<f64>,
    terminal_buffer: Vec<u8>,
    truncation_buffer: Vec<u8>,
}

impl<R: RewardComponent> CopterPool<R> {
    /// Create `num_envs` instances from one configuration and reset them.
    ///
    /// The configured seed (or a fresh one) is the base seed of the pool.
    pub fn new(config: CopterConfig<R>, num_envs: usize) -> Result<Self> {
        if num_envs == 0 {
            return Err(OperantError::config("num_envs", "must be at least 1"));
        }
        config.validate()?;

        let base_seed = config.seed.unwrap_or_else(rand::random);
        let obs_size = config.observation_size();
        let envs: Vec<Copter<R>> = (0..num_envs)
            .map(|_| Copter::from_config(config.clone()))
            .collect();
        let action_space = envs[0].action_space().clone();

        let mut pool = Self {
            envs,
            action_space,
            obs_size,
            obs_buffer: vec![0.0; num_envs * obs_size],
            reward_buffer: vec![0.0; num_envs],
            terminal_buffer: vec![0; num_envs],
            truncation_buffer: vec![0; num_envs],
        };
        Environment::reset(&mut pool, base_seed);
        Ok(pool)
    }

    /// Instance `idx`.
    pub fn env(&self, idx: usize) -> &Copter<R> {
        &self.envs[idx]
    }

    /// Mutable instance `idx`, e.g. to inject a scenario state.
    pub fn env_mut(&mut self, idx: usize) -> &mut Copter<R> {
        &mut self.envs[idx]
    }

    /// Aggregated statistics of every instance.
    pub fn log(&self) -> CopterLog {
        let mut log = CopterLog::default();
        for env in &self.envs {
            log.merge(env.log());
        }
        log
    }

    pub fn clear_log(&mut self) {
        for env in &mut self.envs {
            env.clear_log();
        }
    }

    /// Reject the whole batch before any instance is stepped.
    ///
    /// Every instance must be mid-episode and every action in bounds.
    fn validate_batch(&self, actions: &[f64]) -> Result<()> {
        for (idx, env) in self.envs.iter().enumerate() {
            let err = match env.phase() {
                EpisodePhase::Ready => continue,
                EpisodePhase::Uninitialized => OperantError::NotReset,
                EpisodePhase::Terminated => OperantError::EpisodeTerminated,
            };
            debug!("copter pool batch rejected: instance {idx} is {:?}", env.phase());
            return Err(err);
        }

        let expected = self.envs.len() * ACTION_DIM;
        if actions.len() != expected {
            return Err(OperantError::ActionDimensionMismatch {
                expected,
                actual: actions.len(),
            });
        }
        for chunk in actions.chunks_exact(ACTION_DIM) {
            self.action_space.check(chunk)?;
        }
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn advance_instances(&self, actions: &[f64]) -> Result<Vec<CopterState>> {
        self.envs
            .iter()
            .zip(actions.chunks_exact(ACTION_DIM))
            .map(|(env, action)| env.advance(as_action(action)?))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn advance_instances(&self, actions: &[f64]) -> Result<Vec<CopterState>> {
        self.envs
            .par_iter()
            .zip(actions.par_chunks_exact(ACTION_DIM))
            .map(|(env, action)| env.advance(as_action(action)?))
            .collect()
    }

    /// Step every instance, or none of them when any integration fails.
    fn step_instances(&mut self, actions: &[f64]) -> Result<Vec<Transition>> {
        let next = self.advance_instances(actions)?;
        Ok(self
            .envs
            .iter_mut()
            .zip(next)
            .map(|(env, state)| env.commit(state))
            .collect())
    }

    fn write_obs(&mut self, idx: usize, obs: &[f64]) {
        let start = idx * self.obs_size;
        self.obs_buffer[start..start + self.obs_size].copy_from_slice(obs);
    }

    fn step_batch(&mut self, actions: &[f64], auto_reset: bool) -> Result<()> {
        self.validate_batch(actions)?;
        let transitions = self.step_instances(actions)?;

        for (idx, t) in transitions.into_iter().enumerate() {
            self.reward_buffer[idx] = t.reward;
            self.terminal_buffer[idx] = t.terminated as u8;
            self.truncation_buffer[idx] = t.truncated as u8;

            if auto_reset && t.done() {
                let obs = self.envs[idx].reset();
                self.write_obs(idx, &obs);
            } else {
                self.write_obs(idx, &t.observation);
            }
        }
        Ok(())
    }

    fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(OperantError::BufferSizeMismatch { expected, actual })
        }
    }
}

fn as_action(chunk: &[f64]) -> Result<&[f64; ACTION_DIM]> {
    chunk
        .try_into()
        .map_err(|_| OperantError::ActionDimensionMismatch {
            expected: ACTION_DIM,
            actual: chunk.len(),
        })
}

impl<R: RewardComponent> Environment for CopterPool<R> {
    fn num_envs(&self) -> usize {
        self.envs.len()
    }

    fn observation_size(&self) -> usize {
        self.obs_size
    }

    fn action_size(&self) -> usize {
        ACTION_DIM
    }

    fn reset(&mut self, seed: u64) {
        let mask = ResetMask::from_indices(
            self.envs.len(),
            &(0..self.envs.len()).collect::<Vec<_>>(),
        );
        self.reset_envs(&mask, seed);
        self.reward_buffer.fill(0.0);
        debug!("copter pool of {} reset with seed {seed}", self.envs.len());
    }

    fn step(&mut self, actions: &[f64]) -> Result<()> {
        self.step_batch(actions, true)
    }

    fn step_no_reset(&mut self, actions: &[f64]) -> Result<StepResult<'_>> {
        self.step_batch(actions, false)?;
        Ok(StepResult {
            observations: &self.obs_buffer,
            rewards: &self.reward_buffer,
            terminals: &self.terminal_buffer,
            truncations: &self.truncation_buffer,
            num_envs: self.envs.len(),
            obs_size: self.obs_size,
        })
    }

    fn reset_envs(&mut self, mask: &ResetMask, seed: u64) {
        debug_assert_eq!(mask.num_envs(), self.envs.len(), "reset mask sized for another pool");
        for idx in mask.iter_set() {
            let env = &mut self.envs[idx];
            env.seed(Some(seed.wrapping_add(idx as u64)));
            let obs = env.reset();
            self.write_obs(idx, &obs);
            self.terminal_buffer[idx] = 0;
            self.truncation_buffer[idx] = 0;
        }
    }

    fn write_observations(&self, buffer: &mut [f64]) -> Result<()> {
        Self::check_len(self.obs_buffer.len(), buffer.len())?;
        buffer.copy_from_slice(&self.obs_buffer);
        Ok(())
    }

    fn write_rewards(&self, buffer: &mut [f64]) -> Result<()> {
        Self::check_len(self.reward_buffer.len(), buffer.len())?;
        buffer.copy_from_slice(&self.reward_buffer);
        Ok(())
    }

    fn write_terminals(&self, buffer: &mut [u8]) -> Result<()> {
        Self::check_len(self.terminal_buffer.len(), buffer.len())?;
        buffer.copy_from_slice(&self.terminal_buffer);
        Ok(())
    }

    fn write_truncations(&self, buffer: &mut [u8]) -> Result<()> {
        Self::check_len(self.truncation_buffer.len(), buffer.len())?;
        buffer.copy_from_slice(&self.truncation_buffer);
        Ok(())
    }
}
