//! Episode termination and truncation checking.
//!
//! Two conditions end an episode:
//! - Attitude error above the failure threshold (terminal)
//! - Step budget exhausted (truncated)

use serde::{Deserialize, Serialize};

use crate::constants::{FAIL_THRESHOLD, MAX_STEPS};

/// Termination thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Episode is truncated once the step counter exceeds this
    pub max_steps: u32,
    /// Attitude error (rad) above which the episode fails
    pub fail_threshold: f64,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            max_steps: MAX_STEPS,
            fail_threshold: FAIL_THRESHOLD,
        }
    }
}

impl TerminationConfig {
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_fail_threshold(mut self, radians: f64) -> Self {
        self.fail_threshold = radians;
        self
    }
}

// ============================================================================
// Termination Result
// ============================================================================

/// Result of a termination check. At most one flag is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerminationResult {
    /// Episode ended due to failure (attitude error too large)
    pub terminal: bool,
    /// Episode ended due to the step budget
    pub truncated: bool,
}

impl TerminationResult {
    /// Episode is done (either terminal or truncated).
    #[inline]
    pub fn done(&self) -> bool {
        self.terminal || self.truncated
    }
}

/// Check both conditions. Failure takes precedence over the time limit.
///
/// `step_count` is the number of steps taken including the current one.
#[inline]
pub fn check_termination(
    step_count: u32,
    attitude_error: f64,
    config: &TerminationConfig,
) -> TerminationResult {
    if attitude_error > config.fail_threshold {
        TerminationResult {
            terminal: true,
            truncated: false,
        }
    } else {
        TerminationResult {
            terminal: false,
            truncated: step_count > config.max_steps,
        }
    }
}
