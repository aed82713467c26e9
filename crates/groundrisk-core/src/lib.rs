//! Core ground-risk utilities
//!
//! Includes:
//! - Physical constants and unit conversions (metric/imperial)
//! - `Param`, the scalar-or-vector input type, and its broadcast helper
//! - Typed domain errors
//! - The warning side channel (advisory, never part of return values)
//! - `AircraftDescription`, the validated aircraft value object

pub mod aircraft;
pub mod constants;
pub mod error;
pub mod param;
pub mod units;
pub mod warnings;

pub use aircraft::{AircraftDescription, AircraftType, FuelType, Parachute};
pub use error::{GroundRiskError, Result};
pub use param::{broadcast_len, Param};
pub use warnings::Warning;
