use crate::params::OrbitParameters;
use std::f32::consts::TAU;

/// Per-body mutable orbit state.
///
/// The angle is tracked explicitly rather than derived from a clock, since the speed can change at any time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Current angle in radians. This is never wrapped, so it keeps counting laps.
    pub current_angle: f32,
    /// Signed rate currently in effect. Zero means paused.
    pub current_speed: f32,
    /// Whether the angle advances at all.
    pub active: bool,
}
impl OrbitState {
    /// Fresh state for a body: at the starting angle, moving at the nominal speed.
    pub fn init(params: &OrbitParameters) -> Self {
        Self {
            current_angle: params.starting_angle_rad(),
            current_speed: params.orbit_speed,
            active: true,
        }
    }
    /// The current angle wrapped into `[0, TAU)`.
    pub fn wrapped_angle(&self) -> f32 {
        let wrapped = self.current_angle.rem_euclid(TAU);
        if wrapped >= TAU { 0.0 } else { wrapped }
    }
    /// Number of whole laps travelled away from zero, signed by direction.
    pub fn laps(&self) -> i64 {
        (self.current_angle / TAU).trunc() as i64
    }
    /// Whether the body is currently moving.
    #[inline(always)]
    pub fn is_moving(&self) -> bool {
        self.active && self.current_speed != 0.0
    }
}
