//! Environment traits for single-instance and vectorized RL.
//!
//! This module provides:
//! - [`Env`] trait, the reset/step/seed/render contract of one environment instance
//! - [`Environment`] trait for batches of independent instances
//! - [`StepResult`] for borrowed access to a batch step
//! - [`ResetMask`] for selective environment reset with O(k) iteration

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::Result;
use crate::space::BoxSpace;

// ============================================================================
// Single-instance contract
// ============================================================================

/// Auxiliary per-step diagnostics. Ordered so that output is reproducible.
pub type Info = BTreeMap<String, f64>;

/// Outcome of one [`Env::step`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Observation after the step
    pub observation: Vec<f64>,
    /// Scalar reward for the step
    pub reward: f64,
    /// Episode ended because of a failure condition
    pub terminated: bool,
    /// Episode ended because the step budget ran out
    pub truncated: bool,
    /// Auxiliary diagnostics
    pub info: Info,
}

impl Transition {
    /// Episode ended for any reason.
    #[inline]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Static rendering metadata of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvMetadata {
    /// Supported render modes (empty when rendering is not implemented)
    pub render_modes: &'static [&'static str],
    /// Nominal playback rate for recorded episodes
    pub frames_per_second: u32,
}

impl Default for EnvMetadata {
    fn default() -> Self {
        Self {
            render_modes: &[],
            frames_per_second: 30,
        }
    }
}

/// Contract satisfied by a single environment instance.
///
/// # Example
///
/// ```rust,ignore
/// let used = env.seed(Some(7));
/// let mut obs = env.reset();
/// loop {
///     let t = env.step(&policy(&obs))?;
///     obs = t.observation;
///     if t.done() {
///         break;
///     }
/// }
/// ```
pub trait Env {
    /// Declared action space.
    fn action_space(&self) -> &BoxSpace;

    /// Declared observation space. Its width always equals the length of
    /// the observations returned by [`reset`](Env::reset) and [`step`](Env::step).
    fn observation_space(&self) -> &BoxSpace;

    /// Rendering metadata.
    fn metadata(&self) -> EnvMetadata {
        EnvMetadata::default()
    }

    /// Reseed the instance generator. `None` draws a fresh seed.
    ///
    /// Returns the seed actually used.
    fn seed(&mut self, seed: Option<u64>) -> u64;

    /// Start a new episode and return its first observation.
    fn reset(&mut self) -> Vec<f64>;

    /// Advance the episode by one step.
    fn step(&mut self, action: &[f64]) -> Result<Transition>;

    /// Render the current state. No-op unless overridden.
    fn render(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// StepResult - borrowed batch step result
// ============================================================================

/// Result of a batch step, borrowing the environment's internal buffers.
#[derive(Debug)]
pub struct StepResult<'a> {
    /// Flat observation buffer (AoS layout: [obs0, obs1, ...])
    pub observations: &'a [f64],
    /// Reward for each environment
    pub rewards: &'a [f64],
    /// Terminal flags (1 = terminated, 0 = not)
    pub terminals: &'a [u8],
    /// Truncation flags (1 = truncated, 0 = not)
    pub truncations: &'a [u8],
    /// Number of parallel environments
    pub num_envs: usize,
    /// Observation size per environment
    pub obs_size: usize,
}

impl<'a> StepResult<'a> {
    /// Observation of one environment.
    #[inline]
    pub fn obs(&self, env_idx: usize) -> &[f64] {
        debug_assert!(env_idx < self.num_envs, "env_idx out of bounds");
        let start = env_idx * self.obs_size;
        &self.observations[start..start + self.obs_size]
    }

    #[inline]
    pub fn is_terminal(&self, env_idx: usize) -> bool {
        self.terminals[env_idx] != 0
    }

    #[inline]
    pub fn is_truncated(&self, env_idx: usize) -> bool {
        self.truncations[env_idx] != 0
    }

    /// Episode ended (terminal or truncated).
    #[inline]
    pub fn is_done(&self, env_idx: usize) -> bool {
        self.is_terminal(env_idx) || self.is_truncated(env_idx)
    }

    /// Mask of every environment whose episode ended.
    pub fn to_reset_mask(&self) -> ResetMask {
        ResetMask::from_done_flags(self.terminals, self.truncations)
    }
}

// ============================================================================
// ResetMask - bitmask for selective reset
// ============================================================================

/// Bitmask for selective environment reset, 64 environments per chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetMask {
    chunks: Vec<u64>,
    num_envs: usize,
}

impl ResetMask {
    /// Empty mask (no environment selected).
    pub fn new(num_envs: usize) -> Self {
        Self {
            chunks: vec![0u64; num_envs.div_ceil(64)],
            num_envs,
        }
    }

    /// Select every environment that is terminal or truncated.
    pub fn from_done_flags(terminals: &[u8], truncations: &[u8]) -> Self {
        debug_assert_eq!(terminals.len(), truncations.len());
        let mut mask = Self::new(terminals.len());
        for (i, (&t, &tr)) in terminals.iter().zip(truncations).enumerate() {
            if t != 0 || tr != 0 {
                mask.set(i);
            }
        }
        mask
    }

    /// Select the given indices.
    pub fn from_indices(num_envs: usize, indices: &[usize]) -> Self {
        let mut mask = Self::new(num_envs);
        for &idx in indices {
            mask.set(idx);
        }
        mask
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.chunks.iter().any(|&c| c != 0)
    }

    pub fn count(&self) -> usize {
        self.chunks.iter().map(|c| c.count_ones() as usize).sum()
    }

    #[inline]
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    #[inline]
    pub fn set(&mut self, env_idx: usize) {
        assert!(env_idx < self.num_envs, "env_idx {env_idx} out of range");
        self.chunks[env_idx / 64] |= 1u64 << (env_idx % 64);
    }

    #[inline]
    pub fn clear(&mut self, env_idx: usize) {
        assert!(env_idx < self.num_envs, "env_idx {env_idx} out of range");
        self.chunks[env_idx / 64] &= !(1u64 << (env_idx % 64));
    }

    #[inline]
    pub fn is_set(&self, env_idx: usize) -> bool {
        env_idx < self.num_envs && (self.chunks[env_idx / 64] >> (env_idx % 64)) & 1 != 0
    }

    /// Iterate over selected indices in O(k), k = number of set bits.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks
            .iter()
            .enumerate()
            .flat_map(|(chunk_idx, &chunk)| SetBits(chunk).map(move |bit| chunk_idx * 64 + bit))
    }
}

/// Iterator over set bits using `trailing_zeros()`.
struct SetBits(u64);

impl Iterator for SetBits {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1; // clear lowest set bit
        Some(bit)
    }
}

// ============================================================================
// LogData trait
// ============================================================================

/// Episode statistics that environments accumulate for monitoring.
pub trait LogData: Clone + Debug + Default {
    /// Merge another log into this one (for aggregation across instances).
    fn merge(&mut self, other: &Self);

    /// Reset all counters.
    fn clear(&mut self);

    /// Number of completed episodes recorded.
    fn episode_count(&self) -> f64;
}

// ============================================================================
// Vectorized contract
// ============================================================================

/// Batch of independent environment instances sharing flat AoS buffers.
///
/// Actions are laid out as `[env0_a0, env0_a1, ..., env1_a0, ...]`.
pub trait Environment {
    /// Number of parallel environments.
    fn num_envs(&self) -> usize;

    /// Observation size per environment.
    fn observation_size(&self) -> usize;

    /// Action size per environment.
    fn action_size(&self) -> usize;

    /// Reset all environments with deterministic seeding.
    fn reset(&mut self, seed: u64);

    /// Step all environments, auto-resetting any whose episode ended.
    ///
    /// The reported observations of auto-reset environments are the first
    /// observations of their new episodes.
    fn step(&mut self, actions: &[f64]) -> Result<()>;

    /// Step all environments WITHOUT auto-reset.
    ///
    /// Terminal observations stay readable; the caller must
    /// [`reset_envs`](Environment::reset_envs) finished environments before
    /// stepping them again.
    fn step_no_reset(&mut self, actions: &[f64]) -> Result<StepResult<'_>>;

    /// Reset the environments selected by `mask`.
    fn reset_envs(&mut self, mask: &ResetMask, seed: u64);

    fn write_observations(&self, buffer: &mut [f64]) -> Result<()>;

    fn write_rewards(&self, buffer: &mut [f64]) -> Result<()>;

    fn write_terminals(&self, buffer: &mut [u8]) -> Result<()>;

    fn write_truncations(&self, buffer: &mut [u8]) -> Result<()>;
}
