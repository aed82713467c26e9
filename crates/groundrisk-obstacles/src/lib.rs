//! groundrisk-obstacles
//!
//! Obstacles on the ground (buildings, walls, trees) stop a sliding aircraft
//! early and so shorten its critical area. Two views of the same question:
//! - analytical: CDF of the reduced length from the Minkowski-sum area of a
//!   critical area and a randomly sized, randomly oriented obstacle;
//! - simulation: random obstacle fields, critical areas clipped against them
//!   with a spatial index, coverage and a missed-intersection audit.
//!
//! Randomness always comes from a caller-provided `rand::Rng`.

pub mod analytic;
pub mod coverage;
pub mod distribution;
pub mod error;
pub mod field;
pub mod footprint;
pub mod reduction;

pub use analytic::{analytical_cdf, length_grid, minkowski_area, CdfDiagnostics, CdfResult, CdfSettings};
pub use coverage::{empirical_cdf, Coverage};
pub use distribution::{OrientationDistribution, SizeDistribution};
pub use error::{ObstacleError, Result};
pub use field::{catmull_rom, ObstacleField, ObstacleFieldConfig, RoadLayout};
pub use footprint::{CaFootprint, OrientedRect};
pub use reduction::{reduce, Obstacle, Reduction, REDUCTION_EPSILON};
