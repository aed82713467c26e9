//! Size and orientation distributions of obstacles, with sampling for the
//! simulation and rectangular-rule nodes for the analytical quadrature.
//!
//! Public angles are degrees; nodes and samples are radians.

use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

use groundrisk_core::GroundRiskError;

use crate::error::{ObstacleError, Result};

/// Normal samples are clipped to mean ± this many standard deviations.
pub const CLIP_SIGMA: f64 = 3.0;

/// Standard normal density.
pub fn std_normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / TAU.sqrt()
}

/// One quadrature node: abscissa, probability weight and the standard normal
/// density at its z-score (φ(0) for degenerate axes).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub value: f64,
    pub weight: f64,
    pub density: f64,
}

/// `res` midpoint nodes over mean ± 3σ, weighted φ(z)·Δz. σ = 0 gives one node.
pub fn normal_nodes(mean: f64, std: f64, res: usize) -> Vec<Node> {
    if std <= 0.0 || res == 0 {
        return vec![Node { value: mean, weight: 1.0, density: std_normal_pdf(0.0) }];
    }
    let dz = 2.0 * CLIP_SIGMA / res as f64;
    (0..res)
        .map(|k| {
            let z = -CLIP_SIGMA + dz * (k as f64 + 0.5);
            let density = std_normal_pdf(z);
            Node { value: mean + z * std, weight: density * dz, density }
        })
        .collect()
}

/// Independent normal obstacle width and length [m].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeDistribution {
    pub width_mean: f64,
    pub width_std: f64,
    pub length_mean: f64,
    pub length_std: f64,
}

impl SizeDistribution {
    pub fn new(width_mean: f64, width_std: f64, length_mean: f64, length_std: f64) -> Result<Self> {
        let dist = Self { width_mean, width_std, length_mean, length_std };
        dist.validate()?;
        Ok(dist)
    }

    /// Every obstacle has the same size.
    pub fn fixed(width: f64, length: f64) -> Self {
        Self { width_mean: width, width_std: 0.0, length_mean: length, length_std: 0.0 }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width_mean > 0.0 && self.length_mean > 0.0) {
            return Err(ObstacleError::InvalidSize(format!(
                "mean obstacle size must be positive, got {} x {}",
                self.width_mean, self.length_mean
            )));
        }
        if self.width_std < 0.0 || self.length_std < 0.0 {
            return Err(ObstacleError::InvalidSize("standard deviations must be non-negative".into()));
        }
        Ok(())
    }

    /// Mean obstacle area E[a·b] for independent width and length.
    pub fn mean_area(&self) -> f64 {
        self.width_mean * self.length_mean
    }

    /// Draw (width, length), each clipped to ±3σ and kept positive.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(f64, f64)> {
        let width = clipped_normal(self.width_mean, self.width_std, rng)?;
        let length = clipped_normal(self.length_mean, self.length_std, rng)?;
        Ok((width, length))
    }

    pub fn width_nodes(&self, res: usize) -> Vec<Node> {
        normal_nodes(self.width_mean, self.width_std, res)
    }

    pub fn length_nodes(&self, res: usize) -> Vec<Node> {
        normal_nodes(self.length_mean, self.length_std, res)
    }
}

fn clipped_normal<R: Rng + ?Sized>(mean: f64, std: f64, rng: &mut R) -> Result<f64> {
    if std <= 0.0 {
        return Ok(mean);
    }
    let normal = Normal::new(mean, std).map_err(|e| GroundRiskError::InvalidDistribution(e.to_string()))?;
    let x = normal.sample(rng).clamp(mean - CLIP_SIGMA * std, mean + CLIP_SIGMA * std);
    // Wide distributions can reach zero at −3σ.
    Ok(x.max(1e-3 * mean))
}

/// Obstacle orientation [deg].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrientationDistribution {
    Fixed { angle: f64 },
    /// Uniform on [loc, loc + scale).
    Uniform { loc: f64, scale: f64 },
    Normal { mean: f64, std: f64 },
}

impl Default for OrientationDistribution {
    fn default() -> Self {
        OrientationDistribution::Fixed { angle: 0.0 }
    }
}

impl OrientationDistribution {
    /// Uniform over a full turn.
    pub fn full_turn() -> Self {
        OrientationDistribution::Uniform { loc: 0.0, scale: 360.0 }
    }

    /// Draw an orientation in radians.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let deg = match *self {
            OrientationDistribution::Fixed { angle } => angle,
            OrientationDistribution::Uniform { loc, scale } => {
                if scale <= 0.0 {
                    loc
                } else {
                    loc + Uniform::new(0.0, scale).sample(rng)
                }
            }
            OrientationDistribution::Normal { mean, std } => clipped_angle(mean, std, rng)?,
        };
        Ok(deg.to_radians())
    }

    /// Quadrature nodes in radians. `Fixed` always yields a single node.
    pub fn nodes(&self, res: usize) -> Vec<Node> {
        let res = res.max(1);
        match *self {
            OrientationDistribution::Fixed { angle } => {
                vec![Node { value: angle.to_radians(), weight: 1.0, density: std_normal_pdf(0.0) }]
            }
            OrientationDistribution::Uniform { loc, scale } => (0..res)
                .map(|k| Node {
                    value: (loc + scale * (k as f64 + 0.5) / res as f64).to_radians(),
                    weight: 1.0 / res as f64,
                    density: std_normal_pdf(0.0),
                })
                .collect(),
            OrientationDistribution::Normal { mean, std } => normal_nodes(mean, std, res)
                .into_iter()
                .map(|n| Node { value: n.value.to_radians(), ..n })
                .collect(),
        }
    }
}

fn clipped_angle<R: Rng + ?Sized>(mean: f64, std: f64, rng: &mut R) -> Result<f64> {
    if std <= 0.0 {
        return Ok(mean);
    }
    let normal = Normal::new(mean, std).map_err(|e| GroundRiskError::InvalidDistribution(e.to_string()))?;
    Ok(normal.sample(rng).clamp(mean - CLIP_SIGMA * std, mean + CLIP_SIGMA * std))
}

/// `res` equally weighted midpoint angles over a full turn [rad].
pub fn full_turn_nodes(res: usize) -> Vec<Node> {
    let res = res.max(1);
    (0..res)
        .map(|k| Node {
            value: TAU * (k as f64 + 0.5) / res as f64,
            weight: 1.0 / res as f64,
            density: std_normal_pdf(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn normal_nodes_cover_most_mass() {
        let nodes = normal_nodes(10.0, 2.0, 10);
        assert_eq!(nodes.len(), 10);
        let mass: f64 = nodes.iter().map(|n| n.weight).sum();
        assert_relative_eq!(mass, 0.9977, epsilon = 1e-3);
        assert_relative_eq!(nodes[0].value, 10.0 - 2.7 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_axis_is_one_node() {
        let nodes = normal_nodes(5.0, 0.0, 10);
        assert_eq!(nodes, vec![Node { value: 5.0, weight: 1.0, density: std_normal_pdf(0.0) }]);
    }

    #[test]
    fn fixed_orientation_is_sparse() {
        let nodes = OrientationDistribution::Fixed { angle: 90.0 }.nodes(25);
        assert_eq!(nodes.len(), 1);
        assert_relative_eq!(nodes[0].value, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn uniform_nodes_sum_to_one() {
        let nodes = OrientationDistribution::full_turn().nodes(12);
        assert_eq!(nodes.len(), 12);
        assert_relative_eq!(nodes.iter().map(|n| n.weight).sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(nodes.iter().all(|n| (0.0..TAU).contains(&n.value)));
    }

    #[test]
    fn samples_stay_within_three_sigma() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = SizeDistribution::new(10.0, 3.0, 20.0, 1.0).unwrap();
        for _ in 0..1000 {
            let (w, l) = size.sample(&mut rng).unwrap();
            assert!((1.0..=19.0).contains(&w));
            assert!((17.0..=23.0).contains(&l));
        }
    }

    #[test]
    fn invalid_sizes_rejected() {
        assert!(matches!(SizeDistribution::new(0.0, 1.0, 1.0, 1.0), Err(ObstacleError::InvalidSize(_))));
        assert!(matches!(SizeDistribution::new(1.0, -1.0, 1.0, 1.0), Err(ObstacleError::InvalidSize(_))));
    }

    #[test]
    fn orientation_json_is_tagged() {
        let o: OrientationDistribution = serde_json::from_str(r#"{"kind":"normal","mean":45.0,"std":5.0}"#).unwrap();
        assert_eq!(o, OrientationDistribution::Normal { mean: 45.0, std: 5.0 });
    }
}
