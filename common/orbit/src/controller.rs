//! Control surface for a single orbiting body.

use crate::kinematics::{self, Facing, FacingContext};
use crate::params::{OrbitConfigError, OrbitParameters, wrap_degrees};
use crate::state::OrbitState;
use bevy_math::Vec3;

/// Result of a single [`Orbiter::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// Offset from the orbit center.
    pub offset: Vec3,
    pub facing: Facing,
}

/// An orbit's parameters together with the state of the body following it.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbiter {
    params: OrbitParameters,
    state: OrbitState,
}
impl Orbiter {
    /// Validate the parameters and place the body at its starting angle.
    pub fn new(params: OrbitParameters) -> Result<Self, OrbitConfigError> {
        params.validate()?;
        Ok(Self {
            state: OrbitState::init(&params),
            params,
        })
    }
    #[inline(always)]
    pub const fn params(&self) -> &OrbitParameters {
        &self.params
    }
    #[inline(always)]
    pub const fn state(&self) -> &OrbitState {
        &self.state
    }
    /// Replace the parameters.
    ///
    /// If the starting angle changed while active, the body is moved back to the start.
    pub fn set_params(&mut self, params: OrbitParameters) -> Result<(), OrbitConfigError> {
        params.validate()?;
        let restart = self.state.active && params.starting_angle != self.params.starting_angle;
        self.params = params;
        if restart {
            self.move_to_start();
        }
        Ok(())
    }

    /// Move back to the starting angle and start advancing.
    pub fn activate(&mut self) {
        self.move_to_start();
        self.state.active = true;
    }
    /// Freeze the angle where it is.
    pub fn deactivate(&mut self) {
        self.state.active = false;
    }
    #[inline(always)]
    pub const fn is_active(&self) -> bool {
        self.state.active
    }
    /// Set the signed speed. Zero pauses the body without deactivating it.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), OrbitConfigError> {
        if !speed.is_finite() {
            return Err(OrbitConfigError::NonFinite("speed"));
        }
        self.state.current_speed = speed;
        Ok(())
    }
    #[inline(always)]
    pub const fn speed(&self) -> f32 {
        self.state.current_speed
    }
    /// Resume at the nominal speed, but only if currently paused.
    pub fn start_speed(&mut self) {
        if self.state.current_speed == 0.0 {
            self.state.current_speed = self.params.orbit_speed;
        }
    }
    /// Snap to the starting angle without touching the active flag. Returns the new offset.
    pub fn move_to_start(&mut self) -> Vec3 {
        let (angle, offset) = kinematics::reset_to_start(&self.params);
        self.state.current_angle = angle;
        offset
    }
    /// Set the current angle, in degrees.
    pub fn set_current_angle(&mut self, degrees: f32) -> Result<(), OrbitConfigError> {
        if !degrees.is_finite() {
            return Err(OrbitConfigError::NonFinite("current angle"));
        }
        self.state.current_angle = degrees.to_radians();
        Ok(())
    }
    /// The current angle in degrees. Like the state itself, this isn't wrapped.
    pub fn current_angle(&self) -> f32 {
        self.state.current_angle.to_degrees()
    }
    /// Change the starting angle, re-homing immediately if active.
    pub fn set_starting_angle(&mut self, degrees: f32) -> Result<(), OrbitConfigError> {
        if !degrees.is_finite() {
            return Err(OrbitConfigError::NonFinite("starting angle"));
        }
        self.params.starting_angle = wrap_degrees(degrees);
        if self.state.active {
            self.move_to_start();
        }
        Ok(())
    }
    /// Current offset from the orbit center.
    pub fn offset(&self) -> Vec3 {
        kinematics::position_at(&self.params, self.state.current_angle)
    }
    /// Seconds per lap at the current speed.
    pub fn period(&self) -> Option<f32> {
        kinematics::period(&self.params, self.state.current_speed)
    }

    /// Advance by `dt` seconds and work out the new offset and facing.
    ///
    /// `center` is the world position of the orbit center, and the body is assumed to end up at `center + offset`.
    /// When inactive, nothing moves and the facing is held.
    pub fn step(&mut self, dt: f32, center: Vec3) -> StepOutput {
        self.state = kinematics::advance(&self.params, self.state, dt);
        let offset = self.offset();
        let facing = if self.state.active {
            kinematics::facing_at(
                &self.params,
                self.state.current_angle,
                self.state.current_speed,
                FacingContext {
                    body: center + offset,
                    center,
                    dt,
                },
            )
        } else {
            Facing::Hold
        };
        StepOutput { offset, facing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FacingMode;
    use approx::assert_abs_diff_eq;
    use rand::Rng;

    fn orbiter() -> Orbiter {
        Orbiter::new(
            OrbitParameters::new(1000.0, 800.0)
                .unwrap()
                .with_starting_angle(30.0),
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_params() {
        let mut params = OrbitParameters::default();
        params.semi_minor_axis = 0.0;
        assert_eq!(
            Orbiter::new(params),
            Err(OrbitConfigError::SemiMinorAxis(0.0))
        );
        let mut good = orbiter();
        assert!(good.set_params(params).is_err());
        assert_eq!(good.params().semi_minor_axis, 800.0);
    }

    #[test]
    fn activate_rehomes() {
        let mut orbiter = orbiter();
        orbiter.set_current_angle(200.0).unwrap();
        orbiter.deactivate();
        orbiter.activate();
        assert!(orbiter.is_active());
        assert_abs_diff_eq!(orbiter.current_angle(), 30.0, epsilon = 1e-4);
    }

    #[test]
    fn deactivate_freezes() {
        let mut orbiter = orbiter();
        orbiter.set_speed(1.0).unwrap();
        orbiter.step(0.5, Vec3::ZERO);
        orbiter.deactivate();
        let frozen = *orbiter.state();
        for _ in 0..50 {
            let out = orbiter.step(0.1, Vec3::ZERO);
            assert_eq!(out.facing, Facing::Hold);
        }
        assert_eq!(*orbiter.state(), frozen);
    }

    #[test]
    fn move_to_start_is_idempotent() {
        let mut orbiter = orbiter();
        orbiter.set_current_angle(123.0).unwrap();
        orbiter.deactivate();
        let first = orbiter.move_to_start();
        let first_angle = orbiter.current_angle();
        let second = orbiter.move_to_start();
        assert_eq!(first, second);
        assert_eq!(first_angle, orbiter.current_angle());
        assert!(!orbiter.is_active());
    }

    #[test]
    fn angle_roundtrip() {
        let rng = &mut rand::thread_rng();
        let mut orbiter = orbiter();
        for _ in 0..1000 {
            let degrees = rng.gen_range(0.0..360.0);
            orbiter.set_current_angle(degrees).unwrap();
            assert_abs_diff_eq!(orbiter.current_angle(), degrees, epsilon = 1e-3);
        }
    }

    #[test]
    fn start_speed_only_from_rest() {
        let mut orbiter = orbiter();
        orbiter.set_speed(0.0).unwrap();
        orbiter.start_speed();
        assert_eq!(orbiter.speed(), orbiter.params().orbit_speed);
        orbiter.set_speed(-0.7).unwrap();
        orbiter.start_speed();
        assert_eq!(orbiter.speed(), -0.7);
    }

    #[test]
    fn starting_angle_rehomes_only_when_active() {
        let mut orbiter = orbiter();
        orbiter.set_current_angle(10.0).unwrap();
        orbiter.set_starting_angle(90.0).unwrap();
        assert_abs_diff_eq!(orbiter.current_angle(), 90.0, epsilon = 1e-4);

        orbiter.deactivate();
        orbiter.set_current_angle(10.0).unwrap();
        orbiter.set_starting_angle(180.0).unwrap();
        assert_abs_diff_eq!(orbiter.current_angle(), 10.0, epsilon = 1e-4);
        assert_eq!(orbiter.params().starting_angle, 180.0);
    }

    #[test]
    fn setters_reject_non_finite() {
        let mut orbiter = orbiter();
        orbiter.set_speed(1.0).unwrap();
        let before = orbiter.clone();
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(
                orbiter.set_speed(bad),
                Err(OrbitConfigError::NonFinite("speed"))
            );
            assert_eq!(
                orbiter.set_current_angle(bad),
                Err(OrbitConfigError::NonFinite("current angle"))
            );
            assert_eq!(
                orbiter.set_starting_angle(bad),
                Err(OrbitConfigError::NonFinite("starting angle"))
            );
        }
        assert_eq!(orbiter, before);
        let out = orbiter.step(0.1, Vec3::ZERO);
        assert!(out.offset.is_finite());
        assert!(orbiter.current_angle().is_finite());
    }

    #[test]
    fn set_params_rehomes_on_new_start() {
        let mut orbiter = orbiter();
        orbiter.set_current_angle(5.0).unwrap();
        let same_start = orbiter.params().with_inclination(10.0);
        orbiter.set_params(same_start).unwrap();
        assert_abs_diff_eq!(orbiter.current_angle(), 5.0, epsilon = 1e-4);
        let new_start = same_start.with_starting_angle(60.0);
        orbiter.set_params(new_start).unwrap();
        assert_abs_diff_eq!(orbiter.current_angle(), 60.0, epsilon = 1e-4);
    }

    #[test]
    fn step_moves_along_the_ellipse() {
        let mut orbiter = orbiter();
        orbiter.set_speed(1.0).unwrap();
        let before = orbiter.state().current_angle;
        let center = Vec3::new(5.0, 6.0, 7.0);
        let out = orbiter.step(0.25, center);
        assert_abs_diff_eq!(orbiter.state().current_angle, before + 0.25, epsilon = 1e-5);
        assert_eq!(out.offset, orbiter.offset());
        assert!(matches!(out.facing, Facing::Spin(_)));
    }

    #[test]
    fn step_faces_the_center() {
        let params = OrbitParameters::default().with_facing(FacingMode::FaceCenter);
        let mut orbiter = Orbiter::new(params).unwrap();
        let out = orbiter.step(0.0, Vec3::ZERO);
        let Facing::Look(dir) = out.facing else {
            panic!("expected to look at the center, got {:?}", out.facing);
        };
        assert!((*dir).abs_diff_eq(-out.offset.normalize(), 1e-4));
    }
}
