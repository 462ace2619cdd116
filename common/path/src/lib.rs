//! Path visualization for orbits.
//!
//! Nothing here has any special access to the orbit: paths are built entirely from [`position_at`] samples.

#[cfg(feature = "gizmos")]
pub mod gizmos;

use bevy_color::Color;
use bevy_math::Vec3;
use orbiter_orbit::kinematics::position_at;
use orbiter_orbit::{OrbitParameters, OrbitState};
use std::f32::consts::TAU;
use std::num::NonZero;

/// Error returned when a path style can't be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("an orbit path needs at least one segment")]
    NoSegments,
}

const DEFAULT_SEGMENTS: NonZero<u32> = NonZero::new(64).unwrap();

/// How an orbit's path should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    segments: NonZero<u32>,
    pub color: Color,
    pub visible: bool,
}
impl Default for PathStyle {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            color: Color::WHITE,
            visible: true,
        }
    }
}
impl PathStyle {
    pub fn new(segments: u32, color: Color) -> Result<Self, PathError> {
        let segments = NonZero::new(segments).ok_or(PathError::NoSegments)?;
        Ok(Self {
            segments,
            color,
            visible: true,
        })
    }
    #[inline(always)]
    pub const fn segments(&self) -> NonZero<u32> {
        self.segments
    }
    pub fn set_segments(&mut self, segments: u32) -> Result<(), PathError> {
        self.segments = NonZero::new(segments).ok_or(PathError::NoSegments)?;
        Ok(())
    }
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Append `segments + 1` offsets evenly spaced over `[0, TAU]`, so the last one closes the loop.
pub fn append_path(params: &OrbitParameters, segments: NonZero<u32>, points: &mut Vec<Vec3>) {
    let n = segments.get();
    let step = TAU / n as f32;
    points.reserve(n as usize + 1);
    points.extend((0..=n).map(|i| position_at(params, i as f32 * step)));
}

/// Sample the path as offsets from the center. See [`append_path`].
pub fn sample_path(params: &OrbitParameters, segments: NonZero<u32>) -> Vec<Vec3> {
    let mut points = Vec::new();
    append_path(params, segments, &mut points);
    points
}

/// World positions worth marking alongside the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathMarkers {
    pub center: Vec3,
    pub current: Vec3,
    pub start: Vec3,
}
impl PathMarkers {
    pub fn new(params: &OrbitParameters, state: &OrbitState, center: Vec3) -> Self {
        Self {
            center,
            current: center + position_at(params, state.current_angle),
            start: center + position_at(params, params.starting_angle_rad()),
        }
    }
    /// A marker size that stays visible relative to the ellipse.
    pub fn radius(params: &OrbitParameters) -> f32 {
        params.semi_major_axis.max(params.semi_minor_axis) * 0.02
    }
}

/// A fully resolved path, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    pub points: Vec<Vec3>,
    pub markers: PathMarkers,
    pub color: Color,
}
impl OrbitPath {
    /// Build the path for an orbit around `center`, or `None` if the style is hidden.
    pub fn trace(
        params: &OrbitParameters,
        state: &OrbitState,
        center: Vec3,
        style: &PathStyle,
    ) -> Option<Self> {
        if !style.visible {
            return None;
        }
        let mut points = sample_path(params, style.segments);
        for p in &mut points {
            *p += center;
        }
        Some(Self {
            points,
            markers: PathMarkers::new(params, state, center),
            color: style.color,
        })
    }
}
