//! Reduction of a critical area by clipping against obstacles.
//!
//! Each obstacle meeting the footprint cuts it back: the piece of
//! footprint − obstacle that holds the leading edge is re-rectangularised at
//! the corner nearest to a leading-edge endpoint, with the same width and a
//! length shrunk by [`REDUCTION_EPSILON`]. An obstacle covering the leading
//! edge empties the footprint.

use geo::{BooleanOps, Intersects, Polygon};
use nalgebra::Point2;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;

use crate::footprint::{CaFootprint, OrientedRect};

/// Shrink applied to a reduced length so the new footprint stops short of
/// the obstacle it was cut against [m].
pub const REDUCTION_EPSILON: f64 = 1e-3;

/// Tolerance for a corner lying on the leading-edge line [m].
const ON_EDGE_TOLERANCE: f64 = 1e-6;

pub type IndexedRect = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// An obstacle with its polygon precomputed.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub shape: OrientedRect,
    polygon: Polygon<f64>,
}

impl Obstacle {
    pub fn new(shape: OrientedRect) -> Self {
        Self { polygon: shape.polygon(), shape }
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }
}

/// R-tree over the obstacles' bounding rectangles; data is the obstacle index.
pub fn build_index(obstacles: &[Obstacle]) -> RTree<IndexedRect> {
    let entries = obstacles
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let env = o.shape.envelope();
            GeomWithData::new(Rectangle::from_corners(env.lower(), env.upper()), i)
        })
        .collect();
    RTree::bulk_load(entries)
}

/// Outcome of reducing one critical area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reduction {
    /// None when an obstacle covers the leading edge.
    pub footprint: Option<CaFootprint>,
    pub length: f64,
    /// Whether at least one obstacle met the footprint.
    pub reduced: bool,
}

/// Reduce `ca` against the obstacles in `index`.
pub fn reduce(ca: &CaFootprint, obstacles: &[Obstacle], index: &RTree<IndexedRect>) -> Reduction {
    let mut candidates: Vec<usize> =
        index.locate_in_envelope_intersecting(&ca.envelope()).map(|entry| entry.data).collect();
    candidates.sort_unstable();

    let mut current = *ca;
    let mut reduced = false;

    for i in candidates {
        let obstacle = obstacles[i].polygon();
        let polygon = current.polygon();
        if !polygon.intersects(obstacle) {
            continue;
        }
        reduced = true;

        let leading_edge = current.leading_edge();
        if leading_edge.intersects(obstacle) {
            return Reduction { footprint: None, length: 0.0, reduced };
        }

        let difference = polygon.difference(obstacle);
        let Some(piece) = difference.0.iter().find(|p| p.intersects(&leading_edge)) else {
            return Reduction { footprint: None, length: 0.0, reduced };
        };

        let Some(d) = nearest_corner_depth(&current, piece) else {
            continue;
        };
        let length = (d - REDUCTION_EPSILON).min(current.length);
        if length <= 0.0 {
            return Reduction { footprint: None, length: 0.0, reduced };
        }
        current = current.with_length(length);
    }

    Reduction { footprint: Some(current), length: current.length, reduced }
}

/// Depth below the leading edge of the corner of `piece`, off the leading
/// edge, that lies nearest to either leading-edge endpoint.
fn nearest_corner_depth(ca: &CaFootprint, piece: &Polygon<f64>) -> Option<f64> {
    let (a, b) = ca.leading_edge_endpoints();
    let rings = std::iter::once(piece.exterior()).chain(piece.interiors());
    rings
        .flat_map(|ring| ring.coords())
        .map(|c| Point2::new(c.x, c.y))
        .map(|p| (p, ca.distance_from_leading_edge(p)))
        .filter(|&(_, depth)| depth > ON_EDGE_TOLERANCE)
        .map(|(p, depth)| ((p - a).norm().min((p - b).norm()), depth))
        .min_by(|x, y| x.0.total_cmp(&y.0))
        .map(|(_, depth)| depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ca() -> CaFootprint {
        CaFootprint::new([0.0, 0.0], 0.0, 2.0, 10.0)
    }

    fn run(obstacles: &[OrientedRect]) -> Reduction {
        let obstacles: Vec<Obstacle> = obstacles.iter().copied().map(Obstacle::new).collect();
        let index = build_index(&obstacles);
        reduce(&ca(), &obstacles, &index)
    }

    #[test]
    fn untouched_footprint_keeps_its_length() {
        let r = run(&[OrientedRect::new([10.0, 5.0], 2.0, 2.0, 0.0)]);
        assert!(!r.reduced);
        assert_eq!(r.length, 10.0);
        assert_eq!(r.footprint, Some(ca()));
    }

    #[test]
    fn crossing_obstacle_cuts_at_its_near_side() {
        let r = run(&[OrientedRect::new([0.0, 5.0], 4.0, 2.0, 0.0)]);
        assert!(r.reduced);
        assert_relative_eq!(r.length, 4.0 - REDUCTION_EPSILON, epsilon = 1e-9);
    }

    #[test]
    fn side_bite_cuts_the_full_width() {
        let r = run(&[OrientedRect::new([1.0, 5.0], 1.0, 2.0, 0.0)]);
        assert_relative_eq!(r.length, 4.0 - REDUCTION_EPSILON, epsilon = 1e-9);
        let fp = r.footprint.unwrap();
        assert_eq!(fp.width, 2.0);
        assert_eq!(fp.leading_edge(), ca().leading_edge());
    }

    #[test]
    fn obstacle_on_leading_edge_empties() {
        let r = run(&[OrientedRect::new([0.0, 0.0], 1.0, 1.0, 0.3)]);
        assert!(r.reduced);
        assert_eq!(r.footprint, None);
        assert_eq!(r.length, 0.0);
    }

    #[test]
    fn nearest_of_two_obstacles_wins() {
        let r = run(&[
            OrientedRect::new([0.0, 7.5], 4.0, 1.0, 0.0),
            OrientedRect::new([0.0, 3.5], 4.0, 1.0, 0.0),
        ]);
        assert_relative_eq!(r.length, 3.0 - REDUCTION_EPSILON, epsilon = 1e-9);
    }

    #[test]
    fn enclosed_obstacle_cuts_at_its_near_side() {
        // The difference is the footprint with a hole; the cut comes from the hole's ring.
        let obstacles = [OrientedRect::new([0.0, 5.0], 0.5, 0.5, 0.0)];
        let r = run(&obstacles);
        assert!(r.reduced);
        assert_relative_eq!(r.length, 4.75 - REDUCTION_EPSILON, epsilon = 1e-9);
        assert!(!r.footprint.unwrap().polygon().intersects(&obstacles[0].polygon()));
    }

    #[test]
    fn reduced_footprint_clears_axis_aligned_obstacles() {
        let obstacles = [OrientedRect::new([0.5, 6.0], 1.0, 3.0, 0.0)];
        let r = run(&obstacles);
        let fp = r.footprint.unwrap();
        assert!(!fp.polygon().intersects(&obstacles[0].polygon()));
    }
}
