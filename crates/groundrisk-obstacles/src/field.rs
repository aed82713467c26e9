//! Obstacle field: a square trial area holding obstacles and critical areas.
//!
//! Workflow:
//!   1. place obstacles (`generate_uniform`, `generate_along_curve` or `set_obstacles`);
//!   2. place critical areas (`generate_cas` or `set_cas`);
//!   3. `compute_reduction`, then read lengths, counters, coverage and the audit;
//!   4. compare `empirical_cdf` with `analytical_cdf`.

use nalgebra::{Point2, Vector2};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use rstar::RTree;
use serde::{Deserialize, Serialize};

use groundrisk_core::warnings::{self, Warning};

use crate::analytic::{self, CdfResult, CdfSettings};
use crate::coverage::{self, Coverage};
use crate::distribution::{OrientationDistribution, SizeDistribution};
use crate::error::{ObstacleError, Result};
use crate::footprint::{CaFootprint, OrientedRect};
use crate::reduction::{build_index, reduce, IndexedRect, Obstacle};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleFieldConfig {
    /// Nominal critical area [m]
    pub ca_width: f64,
    pub ca_length: f64,
    /// Side of the square trial area [m]
    pub side_length: f64,
    #[serde(default)]
    pub num_obstacles: usize,
    pub size: SizeDistribution,
    #[serde(default)]
    pub orientation: OrientationDistribution,
    #[serde(default)]
    pub trials: usize,
}

impl ObstacleFieldConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.ca_width > 0.0 && self.ca_length > 0.0) {
            return Err(ObstacleError::InvalidSize(format!(
                "critical area must have positive size, got {} x {}",
                self.ca_width, self.ca_length
            )));
        }
        if !(self.side_length > self.ca_width.max(self.ca_length)) {
            return Err(ObstacleError::InvalidSize(format!(
                "trial area side {} does not fit the critical area",
                self.side_length
            )));
        }
        self.size.validate()
    }
}

/// Road described by a Catmull-Rom spline through `control_points`, lined
/// with houses in pairs, one on each side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadLayout {
    pub control_points: Vec<[f64; 2]>,
    /// Arc length between consecutive house pairs [m]
    pub spacing: f64,
    /// Distance from the road centreline to the house centres [m]
    pub offset: f64,
}

#[derive(Clone, Debug)]
pub struct ObstacleField {
    config: ObstacleFieldConfig,
    obstacles: Vec<Obstacle>,
    index: RTree<IndexedRect>,
    cas: Vec<CaFootprint>,
    reduced: Vec<Option<CaFootprint>>,
    reduced_lengths: Vec<f64>,
    num_empty: usize,
    num_reduced: usize,
}

impl ObstacleField {
    pub fn new(config: ObstacleFieldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            obstacles: Vec::new(),
            index: RTree::new(),
            cas: Vec::new(),
            reduced: Vec::new(),
            reduced_lengths: Vec::new(),
            num_empty: 0,
            num_reduced: 0,
        })
    }

    pub fn config(&self) -> &ObstacleFieldConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn cas(&self) -> &[CaFootprint] {
        &self.cas
    }

    /// Obstacles per unit area [1/m²].
    pub fn density(&self) -> f64 {
        self.obstacles.len() as f64 / (self.config.side_length * self.config.side_length)
    }

    /* ------------------------------ obstacles ------------------------------ */

    /// Place `num` obstacles with centres uniform over the trial area.
    pub fn generate_uniform<R: Rng + ?Sized>(
        &mut self,
        num: usize,
        size: SizeDistribution,
        orientation: OrientationDistribution,
        rng: &mut R,
    ) -> Result<()> {
        size.validate()?;
        let side = Uniform::new_inclusive(0.0, self.config.side_length);
        let mut rects = Vec::with_capacity(num);
        for _ in 0..num {
            let center = [side.sample(rng), side.sample(rng)];
            let (width, length) = size.sample(rng)?;
            rects.push(OrientedRect::new(center, width, length, orientation.sample(rng)?));
        }
        self.config.num_obstacles = num;
        self.config.size = size;
        self.config.orientation = orientation;
        self.set_obstacles(rects);
        tracing::debug!(target: "groundrisk", count = num, "generated uniform obstacles");
        Ok(())
    }

    /// Place houses in pairs along a road, oriented with the road tangent.
    pub fn generate_along_curve<R: Rng + ?Sized>(&mut self, road: &RoadLayout, rng: &mut R) -> Result<()> {
        if road.control_points.len() < 2 {
            return Err(ObstacleError::InvalidSize("a road needs at least two control points".into()));
        }
        if road.spacing <= 0.0 {
            return Err(ObstacleError::InvalidSize(format!("house spacing must be positive, got {}", road.spacing)));
        }

        let polyline = catmull_rom(&road.control_points, 32);
        let mut rects = Vec::new();
        let mut next = 0.0;
        let mut travelled = 0.0;
        for seg in polyline.windows(2) {
            let (p, q) = (seg[0], seg[1]);
            let step = (q - p).norm();
            if step <= 0.0 {
                continue;
            }
            let tangent = (q - p) / step;
            let normal = Vector2::new(-tangent.y, tangent.x);
            let angle = tangent.y.atan2(tangent.x);
            while next <= travelled + step {
                let at = p + tangent * (next - travelled);
                for side in [1.0, -1.0] {
                    let c = at + normal * (side * road.offset);
                    let (width, length) = self.config.size.sample(rng)?;
                    rects.push(OrientedRect::new([c.x, c.y], width, length, angle));
                }
                next += road.spacing;
            }
            travelled += step;
        }

        self.config.num_obstacles = rects.len();
        tracing::debug!(target: "groundrisk", count = rects.len(), "generated houses along road");
        self.set_obstacles(rects);
        Ok(())
    }

    /// Replace the obstacles and rebuild the spatial index.
    pub fn set_obstacles(&mut self, rects: Vec<OrientedRect>) {
        self.obstacles = rects.into_iter().map(Obstacle::new).collect();
        self.index = build_index(&self.obstacles);
        self.config.num_obstacles = self.obstacles.len();
        self.clear_reduction();
    }

    /* ---------------------------- critical areas ---------------------------- */

    /// Place `trials` critical areas of the nominal size, uniformly within a
    /// margin of half their larger side, headings uniform over a full turn.
    pub fn generate_cas<R: Rng + ?Sized>(&mut self, trials: usize, rng: &mut R) {
        let (w, l, side) = (self.config.ca_width, self.config.ca_length, self.config.side_length);
        let margin = 0.5 * w.max(l);
        let position = Uniform::new_inclusive(margin, side - margin);
        let heading = Uniform::new(0.0, std::f64::consts::TAU);
        self.cas = (0..trials)
            .map(|_| {
                let center = [position.sample(rng), position.sample(rng)];
                CaFootprint::from_center(center, heading.sample(rng), w, l)
            })
            .collect();
        self.config.trials = trials;
        self.clear_reduction();
    }

    pub fn set_cas(&mut self, cas: Vec<CaFootprint>) {
        self.config.trials = cas.len();
        self.cas = cas;
        self.clear_reduction();
    }

    fn clear_reduction(&mut self) {
        self.reduced.clear();
        self.reduced_lengths.clear();
        self.num_empty = 0;
        self.num_reduced = 0;
    }

    /* ------------------------------ reduction ------------------------------ */

    /// Clip every critical area against the obstacles.
    pub fn compute_reduction(&mut self) -> Result<()> {
        if self.cas.is_empty() {
            return Err(ObstacleError::EmptyField("critical areas"));
        }
        self.clear_reduction();
        for ca in &self.cas {
            let r = reduce(ca, &self.obstacles, &self.index);
            if r.reduced {
                self.num_reduced += 1;
            }
            if r.footprint.is_none() {
                self.num_empty += 1;
            }
            self.reduced.push(r.footprint);
            self.reduced_lengths.push(r.length);
        }

        self.check_counters();
        tracing::debug!(
            target: "groundrisk",
            trials = self.cas.len(),
            reduced = self.num_reduced,
            empty = self.num_empty,
            "reduction done"
        );
        Ok(())
    }

    // Cross-check the pass counters against the resulting lengths.
    fn check_counters(&self) {
        let zero = self.reduced_lengths.iter().filter(|&&l| l <= 0.0).count();
        let shortened = self
            .cas
            .iter()
            .zip(&self.reduced_lengths)
            .filter(|&(ca, &l)| l < ca.length)
            .count();
        if zero != self.num_empty || shortened > self.num_reduced {
            warnings::emit(Warning::Inconsistency(format!(
                "{zero} zero-length and {shortened} shortened critical areas, but the reduction counted {} empty of {} reduced",
                self.num_empty, self.num_reduced
            )));
        }
    }

    pub fn reduced(&self) -> &[Option<CaFootprint>] {
        &self.reduced
    }

    pub fn reduced_lengths(&self) -> &[f64] {
        &self.reduced_lengths
    }

    pub fn num_empty(&self) -> usize {
        self.num_empty
    }

    pub fn num_reduced(&self) -> usize {
        self.num_reduced
    }

    /* ------------------------------ statistics ------------------------------ */

    pub fn coverage(&self) -> Coverage {
        coverage::coverage(&self.obstacles, &self.index)
    }

    /// Covered fraction of the trial area, the simulated counterpart of β.
    pub fn simulated_beta(&self) -> f64 {
        let side = self.config.side_length;
        self.coverage().covered_area / (side * side)
    }

    /// Residual overlap of reduced critical areas with obstacles [m²]; warns
    /// when non-zero.
    pub fn missed_intersections(&self) -> f64 {
        let missed = coverage::missed_intersection_area(&self.reduced, &self.obstacles, &self.index);
        if missed > 0.0 {
            warnings::emit(Warning::Inconsistency(format!(
                "reduced critical areas still overlap obstacles by {missed:.4} m^2"
            )));
        }
        missed
    }

    /// Fraction of reduced lengths at or below each grid point.
    pub fn empirical_cdf(&self, x_grid: &[f64]) -> Vec<f64> {
        coverage::empirical_cdf(&self.reduced_lengths, x_grid)
    }

    /// Analytical CDF for this field's critical area, density and distributions.
    pub fn analytical_cdf(&self, x_grid: &[f64], settings: &CdfSettings) -> CdfResult {
        analytic::analytical_cdf(
            self.config.ca_width,
            x_grid,
            self.density(),
            &self.config.size,
            &self.config.orientation,
            settings,
        )
    }
}

/// Uniform Catmull-Rom spline through `points`, sampled
/// with `per_segment` steps per span. End points are duplicated as phantoms.
pub fn catmull_rom(points: &[[f64; 2]], per_segment: usize) -> Vec<Point2<f64>> {
    let pts: Vec<Point2<f64>> = points.iter().map(|&p| Point2::from(p)).collect();
    if pts.len() < 2 {
        return pts;
    }
    let per_segment = per_segment.max(1);
    let at = |i: isize| pts[i.clamp(0, pts.len() as isize - 1) as usize];

    let mut out = Vec::with_capacity((pts.len() - 1) * per_segment + 1);
    for i in 0..pts.len() as isize - 1 {
        let (p0, p1, p2, p3) = (at(i - 1), at(i), at(i + 1), at(i + 2));
        for k in 0..per_segment {
            let t = k as f64 / per_segment as f64;
            let (t2, t3) = (t * t, t * t * t);
            let v = (p1.coords * 2.0
                + (p2 - p0) * t
                + (p0.coords * 2.0 - p1.coords * 5.0 + p2.coords * 4.0 - p3.coords) * t2
                + (p1.coords * 3.0 - p0.coords - p2.coords * 3.0 + p3.coords) * t3)
                * 0.5;
            out.push(Point2::from(v));
        }
    }
    out.push(pts[pts.len() - 1]);
    out
}
