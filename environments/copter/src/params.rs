//! Physical parameter set of the airframe.

use operant_core::{OperantError, Result};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Immutable airframe constants consumed by the dynamics.
///
/// Inertia is the diagonal `[Ixx, Iyy, Izz]` of the body inertia tensor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CopterParams {
    /// Arm length `l` (m)
    pub arm_length: f64,
    /// Thrust coefficient `b`
    pub thrust_coeff: f64,
    /// Drag coefficient `d`
    pub drag_coeff: f64,
    /// Mass `m` (kg)
    pub mass: f64,
    /// Diagonal inertia `[Ixx, Iyy, Izz]` (kg*m^2)
    pub inertia: [f64; 3],
    /// Rotor inertia `J` (kg*m^2)
    pub rotor_inertia: f64,
}

impl Default for CopterParams {
    fn default() -> Self {
        Self {
            arm_length: ARM_LENGTH,
            thrust_coeff: THRUST_COEFF,
            drag_coeff: DRAG_COEFF,
            mass: MASS,
            inertia: [IXX, IYY, IZZ],
            rotor_inertia: ROTOR_INERTIA,
        }
    }
}

impl CopterParams {
    #[inline(always)]
    pub fn ixx(&self) -> f64 {
        self.inertia[0]
    }

    #[inline(always)]
    pub fn iyy(&self) -> f64 {
        self.inertia[1]
    }

    #[inline(always)]
    pub fn izz(&self) -> f64 {
        self.inertia[2]
    }

    /// Reject parameters the dynamics would divide by or that are not finite.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("thrust_coeff", self.thrust_coeff),
            ("drag_coeff", self.drag_coeff),
            ("mass", self.mass),
            ("inertia[0]", self.inertia[0]),
            ("inertia[1]", self.inertia[1]),
            ("inertia[2]", self.inertia[2]),
        ];
        for (param, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(OperantError::config(
                    param,
                    format!("must be finite and positive, got {value}"),
                ));
            }
        }

        let non_negative = [
            ("arm_length", self.arm_length),
            ("rotor_inertia", self.rotor_inertia),
        ];
        for (param, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(OperantError::config(
                    param,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }

        Ok(())
    }
}
