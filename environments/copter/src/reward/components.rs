//! Built-in reward components.

use serde::{Deserialize, Serialize};

use super::RewardComponent;
use crate::state::CopterState;

// ============================================================================
// Alive Bonus Component
// ============================================================================

/// Constant reward for every step survived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AliveBonus {
    pub bonus: f64,
}

impl RewardComponent for AliveBonus {
    const NAME: &'static str = "AliveBonus";

    #[inline(always)]
    fn compute(&self, _state: &CopterState) -> f64 {
        self.bonus
    }
}

// ============================================================================
// Level Bonus Component
// ============================================================================

/// Rewards flying level.
///
/// `scale * (1 - err / threshold)` while `err < threshold`, else 0, where
/// `err` is [`CopterState::attitude_error`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelBonus {
    /// Attitude error (rad) at which the bonus reaches zero
    pub threshold: f64,
    /// Bonus when perfectly level
    pub scale: f64,
}

impl RewardComponent for LevelBonus {
    const NAME: &'static str = "LevelBonus";

    #[inline]
    fn compute(&self, state: &CopterState) -> f64 {
        let err = state.attitude_error();
        if err < self.threshold {
            self.scale * (1.0 - err / self.threshold)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tilted(roll: f64) -> CopterState {
        CopterState {
            attitude: [roll, 0.0, 0.0],
            ..Default::default()
        }
    }

    #[test]
    fn test_alive_bonus_ignores_state() {
        let component = AliveBonus { bonus: 0.5 };
        assert_eq!(component.compute(&CopterState::at_rest()), 0.5);
        assert_eq!(component.compute(&tilted(1.0)), 0.5);
    }

    #[test]
    fn test_level_bonus_decays_linearly() {
        let component = LevelBonus {
            threshold: 0.1,
            scale: 1.0,
        };
        assert_relative_eq!(component.compute(&tilted(0.0)), 1.0);
        assert_relative_eq!(component.compute(&tilted(0.05)), 0.5, epsilon = 1e-12);
        assert_relative_eq!(component.compute(&tilted(-0.075)), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_level_bonus_zero_at_and_past_threshold() {
        let component = LevelBonus {
            threshold: 0.1,
            scale: 1.0,
        };
        assert_eq!(component.compute(&tilted(0.1)), 0.0);
        assert_eq!(component.compute(&tilted(0.3)), 0.0);
    }
}
