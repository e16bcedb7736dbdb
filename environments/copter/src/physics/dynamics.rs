//! Rigid body dynamics for a plus-configuration quadrotor.
//!
//! Implements the Euler-angle model:
//! - Rotor speeds back-solved from the thrust/torque command
//! - World-frame linear acceleration from collective thrust and attitude
//! - Angular acceleration with inertial cross-coupling and rotor gyroscopics
//! - Constant-acceleration integration over one timestep
//!
//! Every function here is pure. Parameters are assumed validated by the
//! caller, but non-finite intermediate results are still reported as
//! [`OperantError::NumericDomain`] instead of being propagated.

use operant_core::{OperantError, Result};

use crate::constants::G;
use crate::params::CopterParams;
use crate::state::CopterState;

// ============================================================================
// Control
// ============================================================================

/// Scale a normalized `[thrust, roll, pitch, yaw]` action into a control command.
#[inline(always)]
pub fn scale_action(action: [f64; 4], scale: f64) -> [f64; 4] {
    action.map(|a| a * scale)
}

/// Per-rotor angular speeds implied by a control command.
///
/// Plus layout (top view), rotors 1/3 on the pitch axis, 2/4 on the roll axis:
/// ```text
///        1
///        |
///    4 --+-- 2
///        |
///        3
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotorSpeeds {
    pub o1: f64,
    pub o2: f64,
    pub o3: f64,
    pub o4: f64,
}

impl RotorSpeeds {
    /// Net rotor speed `-O1 + O2 - O3 + O4` driving the gyroscopic term.
    #[inline(always)]
    pub fn reactive(&self) -> f64 {
        -self.o1 + self.o2 - self.o3 + self.o4
    }
}

#[inline(always)]
fn finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OperantError::NumericDomain { quantity, value })
    }
}

/// Back-solve rotor speeds from a control command.
///
/// Squared-speed combinations that come out negative are folded with `abs`
/// before the square root. Infeasible commands therefore map to a real speed
/// rather than an error; only non-finite combinations are rejected.
pub fn rotor_speeds(control: [f64; 4], params: &CopterParams) -> Result<RotorSpeeds> {
    let u1s = finite("collective thrust term", control[0] / params.thrust_coeff)?;
    let u2s = finite("roll torque term", control[1] / params.thrust_coeff)?;
    let u3s = finite("pitch torque term", control[2] / params.thrust_coeff)?;
    let u4s = finite("yaw torque term", control[3] / params.drag_coeff)?;

    let u13 = (u1s + u4s) / 2.0;
    let u24 = (u1s - u4s) / 2.0;

    Ok(RotorSpeeds {
        o1: (finite("rotor 1 squared speed", u13 + u3s)?.abs() / 2.0).sqrt(),
        o2: (finite("rotor 2 squared speed", u24 - u2s)?.abs() / 2.0).sqrt(),
        o3: (finite("rotor 3 squared speed", u13 - u3s)?.abs() / 2.0).sqrt(),
        o4: (finite("rotor 4 squared speed", u24 + u2s)?.abs() / 2.0).sqrt(),
    })
}

// ============================================================================
// Accelerations
// ============================================================================

/// World-frame linear acceleration.
///
/// ```text
/// a_x = T (cos r sin p cos y + sin r sin y) / m
/// a_y = T (cos r sin p sin y + sin r cos y) / m
/// a_z = T (cos r cos p) / m - g
/// ```
#[inline]
pub fn linear_acceleration(attitude: [f64; 3], thrust: f64, params: &CopterParams) -> [f64; 3] {
    let (sr, cr) = attitude[0].sin_cos();
    let (sp, cp) = attitude[1].sin_cos();
    let (sy, cy) = attitude[2].sin_cos();
    let m = params.mass;

    [
        thrust * (cr * sp * cy + sr * sy) / m,
        thrust * (cr * sp * sy + sr * cy) / m,
        thrust * (cr * cp) / m - G,
    ]
}

/// Euler-rate accelerations `[roll, pitch, yaw]`.
///
/// ```text
/// a_roll  = (dp dy (Iyy - Izz) + dp Or J + c1 l) / Ixx
/// a_pitch = (dr dy (Izz - Ixx) + dr Or J + c2 l) / Iyy
/// a_yaw   = (dr dy (Ixx - Iyy)           + c3 l) / Izz
/// ```
///
/// The yaw cross-term pairs the roll and yaw rates. It vanishes whenever
/// `Ixx == Iyy`, which holds for the reference airframe.
#[inline]
pub fn angular_acceleration(
    angular_velocity: [f64; 3],
    control: [f64; 4],
    reactive: f64,
    params: &CopterParams,
) -> [f64; 3] {
    let [droll, dpitch, dyaw] = angular_velocity;
    let (ixx, iyy, izz) = (params.ixx(), params.iyy(), params.izz());
    let j = params.rotor_inertia;
    let l = params.arm_length;

    [
        (dpitch * dyaw * (iyy - izz) + dpitch * reactive * j + control[1] * l) / ixx,
        (droll * dyaw * (izz - ixx) + droll * reactive * j + control[2] * l) / iyy,
        (droll * dyaw * (ixx - iyy) + control[3] * l) / izz,
    ]
}

/// Linear and angular acceleration pair for one step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accelerations {
    /// World-frame linear acceleration (m/s^2)
    pub linear: [f64; 3],
    /// Euler-rate acceleration (rad/s^2)
    pub angular: [f64; 3],
}

/// Accelerations produced by a normalized action in the given state.
///
/// The action is not bounds-checked here; the episode layer does that.
pub fn accelerations(
    state: &CopterState,
    action: [f64; 4],
    params: &CopterParams,
    action_scale: f64,
) -> Result<Accelerations> {
    let control = scale_action(action, action_scale);
    let rotors = rotor_speeds(control, params)?;

    let linear = linear_acceleration(state.attitude, control[0], params);
    let angular = angular_acceleration(state.angular_velocity, control, rotors.reactive(), params);

    for value in linear {
        finite("linear acceleration", value)?;
    }
    for value in angular {
        finite("angular acceleration", value)?;
    }

    Ok(Accelerations { linear, angular })
}

// ============================================================================
// Integration
// ============================================================================

#[inline(always)]
fn advance(x: [f64; 3], v: [f64; 3], a: [f64; 3], dt: f64) -> ([f64; 3], [f64; 3]) {
    let half_dt2 = 0.5 * dt * dt;
    (
        [
            x[0] + v[0] * dt + a[0] * half_dt2,
            x[1] + v[1] * dt + a[1] * half_dt2,
            x[2] + v[2] * dt + a[2] * half_dt2,
        ],
        [v[0] + a[0] * dt, v[1] + a[1] * dt, v[2] + a[2] * dt],
    )
}

/// Advance a state by `dt` under constant acceleration.
///
/// `x += v dt + a dt^2 / 2`, then `v += a dt`, for both the translational
/// and the rotational pair.
pub fn integrate(state: &CopterState, acc: &Accelerations, dt: f64) -> CopterState {
    let (position, velocity) = advance(state.position, state.velocity, acc.linear, dt);
    let (attitude, angular_velocity) =
        advance(state.attitude, state.angular_velocity, acc.angular, dt);

    CopterState {
        position,
        velocity,
        attitude,
        angular_velocity,
    }
}
