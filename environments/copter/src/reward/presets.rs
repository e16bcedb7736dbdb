//! Preset reward configurations.

use super::components::*;
use crate::constants::{ALIVE_REWARD, ATTITUDE_THRESHOLD, LEVEL_BONUS};

/// Type alias for the hover reward composition.
pub type HoverReward = (AliveBonus, LevelBonus);

/// Stay-level reward: 0.2 per step plus up to 1.0 for a level attitude.
///
/// # Components
/// - Alive bonus: 0.2
/// - Level bonus: 1.0 at zero error, decaying to 0 at 5 degrees
pub fn hover() -> HoverReward {
    (
        AliveBonus {
            bonus: ALIVE_REWARD,
        },
        LevelBonus {
            threshold: ATTITUDE_THRESHOLD,
            scale: LEVEL_BONUS,
        },
    )
}

/// Survival-only reward, no shaping for attitude.
pub fn survival() -> AliveBonus {
    AliveBonus {
        bonus: ALIVE_REWARD,
    }
}
