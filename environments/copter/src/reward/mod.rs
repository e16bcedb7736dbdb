//! Composable reward terms.
//!
//! Individual terms implement [`RewardComponent`] and are combined through
//! tuples, so the composed reward is a concrete type with no dynamic dispatch:
//!
//! ```ignore
//! use copter_env::reward::*;
//!
//! let reward = (
//!     AliveBonus { bonus: 0.2 },
//!     LevelBonus { threshold: 0.05, scale: 2.0 },
//! );
//! ```
//!
//! Failure termination is not a component: [`compute_reward`] replaces the
//! composed value with a fixed failure reward.

pub mod components;
pub mod presets;

pub use components::*;
pub use presets::*;

use crate::state::CopterState;
use crate::termination::TerminationResult;

/// A reward term evaluated on the post-step state.
pub trait RewardComponent: Clone + Send + Sync {
    /// Human-readable name for logging.
    const NAME: &'static str;

    fn compute(&self, state: &CopterState) -> f64;
}

// ============================================================================
// Tuple Implementations
// ============================================================================

impl RewardComponent for () {
    const NAME: &'static str = "Empty";

    #[inline(always)]
    fn compute(&self, _state: &CopterState) -> f64 {
        0.0
    }
}

impl<A: RewardComponent, B: RewardComponent> RewardComponent for (A, B) {
    const NAME: &'static str = "Composed2";

    #[inline(always)]
    fn compute(&self, state: &CopterState) -> f64 {
        self.0.compute(state) + self.1.compute(state)
    }
}

impl<A: RewardComponent, B: RewardComponent, C: RewardComponent> RewardComponent for (A, B, C) {
    const NAME: &'static str = "Composed3";

    #[inline(always)]
    fn compute(&self, state: &CopterState) -> f64 {
        self.0.compute(state) + self.1.compute(state) + self.2.compute(state)
    }
}

// ============================================================================
// Reward Computation
// ============================================================================

/// Reward for one step.
///
/// A failure termination overrides the composed terms with `failure_reward`.
/// Time-limit truncation does not.
#[inline]
pub fn compute_reward<R: RewardComponent>(
    reward_fn: &R,
    state: &CopterState,
    termination: TerminationResult,
    failure_reward: f64,
) -> f64 {
    if termination.terminal {
        failure_reward
    } else {
        reward_fn.compute(state)
    }
}
