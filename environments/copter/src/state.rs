//! Rigid-body state of a single airframe.
//!
//! Attitude is a triple of Euler angles `[roll, pitch, yaw]` in radians and
//! angular velocity holds their time derivatives. Position and velocity are
//! world-frame with `z` up.

/// Kinematic state advanced by the dynamics integrator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CopterState {
    /// Position `[x, y, z]` (m)
    pub position: [f64; 3],
    /// Velocity `[vx, vy, vz]` (m/s)
    pub velocity: [f64; 3],
    /// Euler angles `[roll, pitch, yaw]` (rad)
    pub attitude: [f64; 3],
    /// Euler angle rates `[droll, dpitch, dyaw]` (rad/s)
    pub angular_velocity: [f64; 3],
}

impl CopterState {
    /// Origin, level, motionless.
    pub fn at_rest() -> Self {
        Self::default()
    }

    /// At rest apart from the given angular velocity.
    pub fn with_angular_velocity(angular_velocity: [f64; 3]) -> Self {
        Self {
            angular_velocity,
            ..Self::default()
        }
    }

    /// Largest absolute Euler angle.
    ///
    /// Yaw counts too, so a pure heading change is scored as an attitude error.
    #[inline]
    pub fn attitude_error(&self) -> f64 {
        self.attitude.iter().fold(0.0_f64, |acc, a| acc.max(a.abs()))
    }

    /// First NaN or infinite component, in field order.
    pub fn first_non_finite(&self) -> Option<f64> {
        self.position
            .iter()
            .chain(&self.velocity)
            .chain(&self.attitude)
            .chain(&self.angular_velocity)
            .copied()
            .find(|v| !v.is_finite())
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }
}
