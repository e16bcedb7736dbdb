//! Reference airframe constants and episode settings.
//!
//! Values describe a 0.723 kg plus-configuration quadrotor with a 0.31 m arm.

use std::f64::consts::PI;

// ============================================================================
// Physical Properties
// ============================================================================

/// Arm length - distance from center to rotor (m)
pub const ARM_LENGTH: f64 = 0.31;

/// Thrust coefficient (N*s^2)
pub const THRUST_COEFF: f64 = 5.324e-5;

/// Drag coefficient (N*m*s^2)
pub const DRAG_COEFF: f64 = 8.721e-7;

/// Mass of the airframe (kg)
pub const MASS: f64 = 0.723;

/// Moment of inertia around X axis (kg*m^2)
pub const IXX: f64 = 8.678e-3;

/// Moment of inertia around Y axis (kg*m^2)
pub const IYY: f64 = 8.678e-3;

/// Moment of inertia around Z axis (kg*m^2)
pub const IZZ: f64 = 3.217e-2;

/// Rotor moment of inertia (kg*m^2), drives the gyroscopic coupling
pub const ROTOR_INERTIA: f64 = 7.321e-5;

/// Gravitational acceleration (m/s^2)
pub const G: f64 = 9.81;

// ============================================================================
// Control and Integration
// ============================================================================

/// Number of control channels: [thrust, roll, pitch, yaw]
pub const ACTION_DIM: usize = 4;

/// Normalized actions in [-1, 1] are multiplied by this before use
pub const ACTION_SCALE: f64 = 0.05;

/// Fixed integration timestep (s)
pub const DT: f64 = 0.1;

// ============================================================================
// Episode Settings
// ============================================================================

/// Step budget before time-limit termination
pub const MAX_STEPS: u32 = 300;

/// Attitude error below which the level bonus is paid (5 degrees)
pub const ATTITUDE_THRESHOLD: f64 = 5.0 * PI / 180.0;

/// Attitude error above which the episode fails (20 degrees)
pub const FAIL_THRESHOLD: f64 = 20.0 * PI / 180.0;

/// Reward paid on every step
pub const ALIVE_REWARD: f64 = 0.2;

/// Bonus paid when perfectly level, decaying linearly to 0 at the threshold
pub const LEVEL_BONUS: f64 = 1.0;

/// Reward replacing everything else on failure termination
pub const FAILURE_REWARD: f64 = -10.0;

/// Initial angular velocity is drawn from [-range, range] per axis (rad/s)
pub const INIT_ANGULAR_VEL_RANGE: f64 = 0.1;

/// Nominal playback rate advertised in the environment metadata
pub const FRAMES_PER_SECOND: u32 = 50;
