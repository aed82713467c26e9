//! Analytical distribution of the reduced critical-area length.
//!
//! Obstacles form a Boolean model with density λ [1/m²]. A critical area of
//! width w and length x meets no obstacle with probability
//!
//!   P(X > x) = exp(−λ · E[M(w, x, a, b, Δθ)])
//!
//! where M is the area of the Minkowski sum of the critical area and an
//! obstacle of width a and length b at relative orientation Δθ:
//!
//!   M = w·x + a·b + w·(a·|sin Δθ| + b·|cos Δθ|) + x·(a·|cos Δθ| + b·|sin Δθ|)
//!
//! M is linear in x, so the quadrature only needs the two expectations
//! E[a·b + w·(a·|sin Δθ| + b·|cos Δθ|)] and E[a·|cos Δθ| + b·|sin Δθ|].

use serde::{Deserialize, Serialize};

use groundrisk_core::constants::MIN_DIVISION_THRESHOLD;
use groundrisk_core::warnings::{self, Warning};

use crate::distribution::{full_turn_nodes, std_normal_pdf, OrientationDistribution, SizeDistribution};

/// Largest accepted deviation of the quadrature mass from one.
pub const MASS_TOLERANCE: f64 = 0.05;

/// Minkowski-sum area [m²] of a w × x critical area and an a × b obstacle.
pub fn minkowski_area(w: f64, x: f64, a: f64, b: f64, dtheta: f64) -> f64 {
    let (s, c) = dtheta.sin_cos();
    let (s, c) = (s.abs(), c.abs());
    w * x + a * b + w * (a * s + b * c) + x * (a * c + b * s)
}

/// Quadrature resolution per axis and the density threshold below which a
/// (width, length) node pair is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CdfSettings {
    pub width_resolution: usize,
    pub length_resolution: usize,
    pub ca_orientation_resolution: usize,
    pub obstacle_orientation_resolution: usize,
    pub threshold: f64,
}

impl Default for CdfSettings {
    fn default() -> Self {
        Self {
            width_resolution: 10,
            length_resolution: 10,
            ca_orientation_resolution: 10,
            obstacle_orientation_resolution: 10,
            threshold: std_normal_pdf(3.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CdfDiagnostics {
    /// Obstacle density used [1/m²]
    pub lambda: f64,
    /// Sum of the joint probabilities of the retained nodes
    pub probability_mass: f64,
    pub evaluated_nodes: usize,
    pub skipped_nodes: usize,
    /// E[a·b + w·(a·|sin Δθ| + b·|cos Δθ|)]
    pub expected_intercept: f64,
    /// E[a·|cos Δθ| + b·|sin Δθ|]
    pub expected_slope: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CdfResult {
    pub x: Vec<f64>,
    /// P(X ≤ x) on the grid
    pub cdf: Vec<f64>,
    /// P(X > x) on the grid
    pub survival: Vec<f64>,
    /// E[X] as a left Riemann sum of the survival function over the grid
    pub expected_length: f64,
    /// Probability that a point lies inside some obstacle
    pub beta: f64,
    pub diagnostics: CdfDiagnostics,
}

/// CDF of the reduced length of a critical area of width `ca_width` on the
/// grid `x_grid` (typically 0..=CA length).
pub fn analytical_cdf(
    ca_width: f64,
    x_grid: &[f64],
    lambda: f64,
    size: &SizeDistribution,
    orientation: &OrientationDistribution,
    settings: &CdfSettings,
) -> CdfResult {
    let widths = size.width_nodes(settings.width_resolution);
    let lengths = size.length_nodes(settings.length_resolution);
    let ca_angles = full_turn_nodes(settings.ca_orientation_resolution);
    let obstacle_angles = orientation.nodes(settings.obstacle_orientation_resolution);

    let mut mass = 0.0;
    let (mut intercept, mut slope, mut area) = (0.0, 0.0, 0.0);
    let (mut evaluated, mut skipped) = (0usize, 0usize);

    for a in &widths {
        for b in &lengths {
            let angle_pairs = ca_angles.len() * obstacle_angles.len();
            if a.density * b.density < settings.threshold {
                skipped += angle_pairs;
                continue;
            }
            evaluated += angle_pairs;
            let wab = a.weight * b.weight;
            for t1 in &ca_angles {
                for t2 in &obstacle_angles {
                    let p = wab * t1.weight * t2.weight;
                    let (s, c) = (t1.value - t2.value).sin_cos();
                    let (s, c) = (s.abs(), c.abs());
                    mass += p;
                    intercept += p * (a.value * b.value + ca_width * (a.value * s + b.value * c));
                    slope += p * (a.value * c + b.value * s);
                    area += p * a.value * b.value;
                }
            }
        }
    }

    if (mass - 1.0).abs() > MASS_TOLERANCE {
        warnings::emit(Warning::Inconsistency(format!(
            "obstacle quadrature holds probability mass {mass:.4}, outside 1 ± {MASS_TOLERANCE}"
        )));
    }
    if mass > MIN_DIVISION_THRESHOLD {
        intercept /= mass;
        slope /= mass;
        area /= mass;
    }

    let lambda = lambda.max(0.0);
    let survival: Vec<f64> = x_grid
        .iter()
        .map(|&x| (-lambda * (ca_width * x + intercept + slope * x)).exp())
        .collect();
    let cdf = survival.iter().map(|s| 1.0 - s).collect();
    let expected_length = x_grid.windows(2).zip(&survival).map(|(xs, s)| s * (xs[1] - xs[0])).sum();

    CdfResult {
        x: x_grid.to_vec(),
        cdf,
        survival,
        expected_length,
        beta: 1.0 - (-lambda * area).exp(),
        diagnostics: CdfDiagnostics {
            lambda,
            probability_mass: mass,
            evaluated_nodes: evaluated,
            skipped_nodes: skipped,
            expected_intercept: intercept,
            expected_slope: slope,
        },
    }
}

/// `n` evenly spaced points from 0 to `length` inclusive.
pub fn length_grid(length: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![length],
        _ => (0..n).map(|k| length * k as f64 / (n - 1) as f64).collect(),
    }
}
