//! Orbit configuration.
//!
//! All angles here are in degrees, since that's what people type into an inspector. They're converted to radians at
//! the point of use.

use bevy_math::Vec3;

/// How a body's orientation is derived each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FacingMode {
    /// Spin continuously about [`OrbitParameters::self_rotation_axis`].
    #[default]
    SelfSpin,
    /// Point the body's forward axis at the orbit center.
    FaceCenter,
    /// Point the body's forward axis along its direction of travel.
    FaceMotion,
}

/// Error returned when orbit parameters would produce degenerate geometry.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum OrbitConfigError {
    #[error("semi-major axis must be positive, got {0}")]
    SemiMajorAxis(f32),
    #[error("semi-minor axis must be positive, got {0}")]
    SemiMinorAxis(f32),
    #[error("orbit speed must be in [0, 1], got {0}")]
    OrbitSpeed(f32),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("self-rotation axis must be non-zero when spinning")]
    SelfRotationAxis,
}

/// Parameters of an elliptical orbit.
///
/// The ellipse lies in the local X-Z plane, with [`Self::semi_major_axis`] along X and [`Self::semi_minor_axis`]
/// along Z. It's then tilted by [`Self::inclination`] about the forward (+Z) axis, and the tilted plane is swung by
/// [`Self::rotation_angle`] about the up (+Y) axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrbitParameters {
    pub semi_major_axis: f32,
    pub semi_minor_axis: f32,
    /// Nominal speed, in `[0, 1]`.
    pub orbit_speed: f32,
    /// Scale applied to the current speed to get radians per second.
    pub orbit_speed_coefficient: f32,
    pub inclination: f32,
    pub rotation_angle: f32,
    pub facing: FacingMode,
    pub self_rotation_axis: Vec3,
    /// Degrees per second.
    pub self_rotation_speed: f32,
    pub starting_angle: f32,
}
impl Default for OrbitParameters {
    fn default() -> Self {
        Self {
            semi_major_axis: 1000.0,
            semi_minor_axis: 800.0,
            orbit_speed: 0.1,
            orbit_speed_coefficient: 1.0,
            inclination: 0.0,
            rotation_angle: 0.0,
            facing: FacingMode::SelfSpin,
            self_rotation_axis: Vec3::Y,
            self_rotation_speed: 10.0,
            starting_angle: 0.0,
        }
    }
}
impl OrbitParameters {
    /// Create validated parameters with the given axes and defaults for everything else.
    pub fn new(semi_major_axis: f32, semi_minor_axis: f32) -> Result<Self, OrbitConfigError> {
        let this = Self {
            semi_major_axis,
            semi_minor_axis,
            ..Self::default()
        };
        this.validate()?;
        Ok(this)
    }
    pub const fn with_speed(mut self, orbit_speed: f32, coefficient: f32) -> Self {
        self.orbit_speed = orbit_speed;
        self.orbit_speed_coefficient = coefficient;
        self
    }
    /// Set the inclination, wrapped into `[0, 360)`.
    pub fn with_inclination(mut self, degrees: f32) -> Self {
        self.inclination = wrap_degrees(degrees);
        self
    }
    /// Set the in-plane rotation, wrapped into `[0, 360)`.
    pub fn with_rotation_angle(mut self, degrees: f32) -> Self {
        self.rotation_angle = wrap_degrees(degrees);
        self
    }
    /// Set the starting angle, wrapped into `[0, 360)`.
    pub fn with_starting_angle(mut self, degrees: f32) -> Self {
        self.starting_angle = wrap_degrees(degrees);
        self
    }
    pub const fn with_facing(mut self, facing: FacingMode) -> Self {
        self.facing = facing;
        self
    }
    pub const fn with_self_rotation(mut self, axis: Vec3, degrees_per_sec: f32) -> Self {
        self.self_rotation_axis = axis;
        self.self_rotation_speed = degrees_per_sec;
        self
    }

    /// Check that these parameters describe a real ellipse.
    pub fn validate(&self) -> Result<(), OrbitConfigError> {
        for (name, value) in [
            ("orbit speed coefficient", self.orbit_speed_coefficient),
            ("inclination", self.inclination),
            ("rotation angle", self.rotation_angle),
            ("self-rotation speed", self.self_rotation_speed),
            ("starting angle", self.starting_angle),
        ] {
            if !value.is_finite() {
                return Err(OrbitConfigError::NonFinite(name));
            }
        }
        // written this way so NaN fails too
        if !(self.semi_major_axis > 0.0 && self.semi_major_axis.is_finite()) {
            return Err(OrbitConfigError::SemiMajorAxis(self.semi_major_axis));
        }
        if !(self.semi_minor_axis > 0.0 && self.semi_minor_axis.is_finite()) {
            return Err(OrbitConfigError::SemiMinorAxis(self.semi_minor_axis));
        }
        if !(0.0..=1.0).contains(&self.orbit_speed) {
            return Err(OrbitConfigError::OrbitSpeed(self.orbit_speed));
        }
        if self.facing == FacingMode::SelfSpin
            && self.self_rotation_speed > 0.0
            && self.self_rotation_axis.try_normalize().is_none()
        {
            return Err(OrbitConfigError::SelfRotationAxis);
        }
        Ok(())
    }

    /// Starting angle in radians.
    #[inline(always)]
    pub fn starting_angle_rad(&self) -> f32 {
        self.starting_angle.to_radians()
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
