//! Kinematics for bodies following fixed elliptical paths around a center.
//!
//! This isn't a gravity simulation: the ellipse is given directly, and traversed at whatever angular rate the caller
//! asks for. [`kinematics`] has the pure geometry, [`Orbiter`] wraps it up with per-body state and the usual control
//! operations, and the `ecs` feature drives it from a Bevy world.

pub mod controller;
#[cfg(feature = "ecs")]
pub mod ecs;
pub mod kinematics;
pub mod params;
pub mod state;

pub use controller::{Orbiter, StepOutput};
pub use kinematics::{Facing, FacingContext, position_at, reset_to_start};
pub use params::{FacingMode, OrbitConfigError, OrbitParameters};
pub use state::OrbitState;
