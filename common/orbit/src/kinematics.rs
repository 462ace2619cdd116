//! Orbital kinematics.
//!
//! Everything here is a pure function of its inputs. The convention is right-handed with +Y up and +Z forward, so
//! tilting the point at angle 0 by 90 degrees of inclination moves it from +X onto +Y.

use crate::params::{FacingMode, OrbitParameters};
use crate::state::OrbitState;
use bevy_math::{Dir3, Mat4, Quat, Vec3};
use std::f32::consts::TAU;

/// What should happen to a body's orientation this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Facing {
    /// Leave the orientation as it is.
    Hold,
    /// Point the body's forward (+Z) axis in this direction.
    Look(Dir3),
    /// Compose this incremental rotation onto the body's orientation, in its local space.
    Spin(Quat),
}

/// World-side inputs needed by the facing modes that aren't a pure function of the angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FacingContext {
    /// World position of the body.
    pub body: Vec3,
    /// World position of the orbit center.
    pub center: Vec3,
    /// Seconds since the last step.
    pub dt: f32,
}

/// Rotation taking the flat X-Z ellipse into its final plane.
///
/// Inclination about +Z is applied first, then the rotation about +Y. Swapping these gives a different plane.
#[inline]
pub fn plane_rotation(params: &OrbitParameters) -> Quat {
    Quat::from_rotation_y(params.rotation_angle.to_radians())
        * Quat::from_rotation_z(params.inclination.to_radians())
}

/// Offset from the orbit center at the given angle, in radians.
pub fn position_at(params: &OrbitParameters, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    let flat = Vec3::new(params.semi_major_axis * c, 0.0, params.semi_minor_axis * s);
    plane_rotation(params) * flat
}

/// Derivative of [`position_at`] with respect to the angle. Not normalized.
pub fn tangent_at(params: &OrbitParameters, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    let flat = Vec3::new(-params.semi_major_axis * s, 0.0, params.semi_minor_axis * c);
    plane_rotation(params) * flat
}

/// Advance the state by `dt` seconds.
///
/// Inactive states are returned unchanged. The angle is never wrapped.
pub fn advance(params: &OrbitParameters, state: OrbitState, dt: f32) -> OrbitState {
    debug_assert!(dt >= 0.0, "negative time step {dt}");
    if !state.active {
        return state;
    }
    OrbitState {
        current_angle: state
            .current_speed
            .mul_add(params.orbit_speed_coefficient * dt, state.current_angle),
        ..state
    }
}

/// The starting angle in radians, and the offset at that angle.
pub fn reset_to_start(params: &OrbitParameters) -> (f32, Vec3) {
    let angle = params.starting_angle_rad();
    (angle, position_at(params, angle))
}

/// Seconds per lap at the given speed, or `None` if the body isn't moving.
pub fn period(params: &OrbitParameters, speed: f32) -> Option<f32> {
    let rate = (speed * params.orbit_speed_coefficient).abs();
    (rate > 0.0 && rate.is_finite()).then(|| TAU / rate)
}

/// Forward direction along the path, matching the actual direction of travel.
///
/// This is only `None` for a collapsed ellipse, since the tangent of a real one never vanishes.
pub fn motion_facing(params: &OrbitParameters, angle: f32, current_speed: f32) -> Option<Dir3> {
    let tangent = tangent_at(params, angle);
    Dir3::new(if current_speed < 0.0 { -tangent } else { tangent }).ok()
}

/// Direction from the body to the center, if they aren't on top of each other.
pub fn center_facing(body: Vec3, center: Vec3) -> Option<Dir3> {
    Dir3::new(center - body).ok()
}

/// Incremental self-rotation for a step of `dt` seconds.
pub fn spin_delta(params: &OrbitParameters, dt: f32) -> Option<Quat> {
    if params.self_rotation_speed <= 0.0 {
        return None;
    }
    let axis = params.self_rotation_axis.try_normalize()?;
    Some(Quat::from_axis_angle(
        axis,
        (params.self_rotation_speed * dt).to_radians(),
    ))
}

/// Decide how the body's orientation changes this step, according to [`OrbitParameters::facing`].
pub fn facing_at(
    params: &OrbitParameters,
    angle: f32,
    current_speed: f32,
    ctx: FacingContext,
) -> Facing {
    let facing = match params.facing {
        FacingMode::SelfSpin => spin_delta(params, ctx.dt).map(Facing::Spin),
        FacingMode::FaceCenter => center_facing(ctx.body, ctx.center).map(Facing::Look),
        FacingMode::FaceMotion => motion_facing(params, angle, current_speed).map(Facing::Look),
    };
    facing.unwrap_or(Facing::Hold)
}

/// Orientation whose +Z axis points along `forward`, keeping +Y as close to `up` as possible.
///
/// If `forward` is parallel to `up`, an arbitrary perpendicular up is used instead.
pub fn look_rotation(forward: Dir3, up: Vec3) -> Quat {
    let up = match up.try_normalize() {
        Some(up) if up.cross(*forward).length_squared() > 1e-8 => up,
        _ => forward.any_orthonormal_vector(),
    };
    // a left-handed view looks down +Z; the body's rotation is its inverse
    Quat::from_mat4(&Mat4::look_to_lh(Vec3::ZERO, *forward, up)).inverse()
}

impl Facing {
    /// Apply this facing to an orientation.
    pub fn apply(self, rotation: Quat) -> Quat {
        match self {
            Self::Hold => rotation,
            Self::Look(dir) => look_rotation(dir, Vec3::Y),
            Self::Spin(delta) => (rotation * delta).normalize(),
        }
    }
}
