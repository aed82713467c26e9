//! Simulation companions of the analytical model: obstacle coverage,
//! the missed-intersection audit and the empirical CDF.

use geo::{Area, BooleanOps, Intersects};
use rstar::RTree;
use serde::{Deserialize, Serialize};

use crate::footprint::CaFootprint;
use crate::reduction::{IndexedRect, Obstacle};

/// Overlap areas below this are treated as numerical noise [m²].
pub const AREA_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Σ area(oᵢ) [m²]
    pub total_obstacle_area: f64,
    /// Σᵢ<ⱼ area(oᵢ ∩ oⱼ) [m²]
    pub pairwise_overlap: f64,
    /// First-order inclusion–exclusion estimate of the covered area [m²]
    pub covered_area: f64,
}

/// Coverage of a set of obstacles, pairs found through the spatial index.
pub fn coverage(obstacles: &[Obstacle], index: &RTree<IndexedRect>) -> Coverage {
    let total: f64 = obstacles.iter().map(Obstacle::area).sum();
    let mut overlap = 0.0;
    for (i, o) in obstacles.iter().enumerate() {
        for entry in index.locate_in_envelope_intersecting(&o.shape.envelope()) {
            let j = entry.data;
            if j <= i {
                continue;
            }
            let other = obstacles[j].polygon();
            if o.polygon().intersects(other) {
                overlap += o.polygon().intersection(other).unsigned_area();
            }
        }
    }
    Coverage { total_obstacle_area: total, pairwise_overlap: overlap, covered_area: total - overlap }
}

/// Area by which reduced critical areas still overlap obstacles [m²].
pub fn missed_intersection_area(
    reduced: &[Option<CaFootprint>],
    obstacles: &[Obstacle],
    index: &RTree<IndexedRect>,
) -> f64 {
    let mut missed = 0.0;
    for fp in reduced.iter().flatten() {
        let polygon = fp.polygon();
        for entry in index.locate_in_envelope_intersecting(&fp.envelope()) {
            let obstacle = obstacles[entry.data].polygon();
            if polygon.intersects(obstacle) {
                let area = polygon.intersection(obstacle).unsigned_area();
                if area > AREA_TOLERANCE {
                    missed += area;
                }
            }
        }
    }
    missed
}

/// Fraction of `lengths` at or below each grid point.
pub fn empirical_cdf(lengths: &[f64], x_grid: &[f64]) -> Vec<f64> {
    if lengths.is_empty() {
        return vec![0.0; x_grid.len()];
    }
    let mut sorted = lengths.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    x_grid
        .iter()
        .map(|&x| sorted.partition_point(|&l| l <= x) as f64 / n)
        .collect()
}
