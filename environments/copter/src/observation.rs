//! Observation vectors built from the rigid-body state.

use operant_core::{OperantError, Result};
use serde::{Deserialize, Serialize};

use crate::state::CopterState;

/// Which state components an observation carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObsMode {
    /// `[roll, pitch, yaw, droll, dpitch, dyaw]`
    #[default]
    Attitude,
    /// Attitude mode followed by `[x, y, z, vx, vy, vz]`
    Full,
}

impl ObsMode {
    /// Number of values per observation.
    pub const fn observation_size(self) -> usize {
        match self {
            ObsMode::Attitude => 6,
            ObsMode::Full => 12,
        }
    }
}

/// Write an observation into the front of `output`.
///
/// Fails with `BufferSizeMismatch` when `output` is shorter than
/// `mode.observation_size()`.
///
/// # Returns
/// Number of elements written
#[inline]
pub fn write_observation(state: &CopterState, mode: ObsMode, output: &mut [f64]) -> Result<usize> {
    let size = mode.observation_size();
    let actual = output.len();
    let output = output
        .get_mut(..size)
        .ok_or(OperantError::BufferSizeMismatch {
            expected: size,
            actual,
        })?;
    fill(state, mode, output);
    Ok(size)
}

/// Allocate and fill an observation.
pub fn observation(state: &CopterState, mode: ObsMode) -> Vec<f64> {
    let mut obs = vec![0.0; mode.observation_size()];
    fill(state, mode, &mut obs);
    obs
}

fn fill(state: &CopterState, mode: ObsMode, output: &mut [f64]) {
    output[0..3].copy_from_slice(&state.attitude);
    output[3..6].copy_from_slice(&state.angular_velocity);

    if mode == ObsMode::Full {
        output[6..9].copy_from_slice(&state.position);
        output[9..12].copy_from_slice(&state.velocity);
    }
}
