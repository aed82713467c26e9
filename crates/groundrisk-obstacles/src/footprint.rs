//! Oriented rectangles on the ground: obstacles and critical-area footprints.
//!
//! A rectangle of width w and length ℓ at angle θ has its width along
//! R(θ)·x̂ and its length along R(θ)·ŷ. A critical area is anchored at the
//! midpoint of its *leading edge* (the width edge at the impact end) and
//! extends along its heading for its length, so shortening it keeps the
//! leading edge in place.

use geo::{Line, LineString, Polygon};
use nalgebra::{Point2, Rotation2, Vector2};
use rstar::AABB;
use serde::{Deserialize, Serialize};

/// Rectangle centred at `center` [m], rotated by `angle` [rad].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    pub center: [f64; 2],
    pub width: f64,
    pub length: f64,
    pub angle: f64,
}

impl OrientedRect {
    pub fn new(center: [f64; 2], width: f64, length: f64, angle: f64) -> Self {
        Self { center, width, length, angle }
    }

    /// Unit vectors along the width and the length.
    pub fn axes(&self) -> (Vector2<f64>, Vector2<f64>) {
        let r = Rotation2::new(self.angle);
        (r * Vector2::x(), r * Vector2::y())
    }

    /// Corners counter-clockwise, starting at (−w/2, −ℓ/2) in the local frame.
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let c = Point2::from(self.center);
        let (n, u) = self.axes();
        let (hw, hl) = (0.5 * self.width, 0.5 * self.length);
        [c - n * hw - u * hl, c + n * hw - u * hl, c + n * hw + u * hl, c - n * hw + u * hl]
    }

    pub fn polygon(&self) -> Polygon<f64> {
        let ring: Vec<(f64, f64)> = self.corners().iter().map(|p| (p.x, p.y)).collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Axis-aligned bounding box, for the spatial index.
    pub fn envelope(&self) -> AABB<[f64; 2]> {
        let corners = self.corners();
        let (mut lo, mut hi) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for p in &corners {
            lo = [lo[0].min(p.x), lo[1].min(p.y)];
            hi = [hi[0].max(p.x), hi[1].max(p.y)];
        }
        AABB::from_corners(lo, hi)
    }
}

/// Critical area on the ground, anchored at its leading edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaFootprint {
    /// Midpoint of the leading edge [m]
    pub origin: [f64; 2],
    /// Direction of travel [rad]; 0 points along +y
    pub heading: f64,
    pub width: f64,
    pub length: f64,
}

impl CaFootprint {
    pub fn new(origin: [f64; 2], heading: f64, width: f64, length: f64) -> Self {
        Self { origin, heading, width, length }
    }

    /// Footprint whose rectangle is centred at `center`.
    pub fn from_center(center: [f64; 2], heading: f64, width: f64, length: f64) -> Self {
        let u = Rotation2::new(heading) * Vector2::y();
        let origin = Point2::from(center) - u * (0.5 * length);
        Self { origin: [origin.x, origin.y], heading, width, length }
    }

    pub fn rect(&self) -> OrientedRect {
        let (_, u) = self.axes();
        let center = Point2::from(self.origin) + u * (0.5 * self.length);
        OrientedRect::new([center.x, center.y], self.width, self.length, self.heading)
    }

    pub fn axes(&self) -> (Vector2<f64>, Vector2<f64>) {
        let r = Rotation2::new(self.heading);
        (r * Vector2::x(), r * Vector2::y())
    }

    pub fn polygon(&self) -> Polygon<f64> {
        self.rect().polygon()
    }

    pub fn envelope(&self) -> AABB<[f64; 2]> {
        self.rect().envelope()
    }

    pub fn leading_edge_endpoints(&self) -> (Point2<f64>, Point2<f64>) {
        let (n, _) = self.axes();
        let o = Point2::from(self.origin);
        (o - n * (0.5 * self.width), o + n * (0.5 * self.width))
    }

    pub fn leading_edge(&self) -> Line<f64> {
        let (a, b) = self.leading_edge_endpoints();
        Line::new((a.x, a.y), (b.x, b.y))
    }

    /// Signed distance of `p` from the leading-edge line, positive inside.
    pub fn distance_from_leading_edge(&self, p: Point2<f64>) -> f64 {
        let (_, u) = self.axes();
        (p - Point2::from(self.origin)).dot(&u)
    }

    /// Same footprint with another length; the leading edge stays.
    #[must_use]
    pub fn with_length(&self, length: f64) -> Self {
        Self { length, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::Area;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn unrotated_rect_is_axis_aligned() {
        let r = OrientedRect::new([0.0, 0.0], 4.0, 2.0, 0.0);
        let c = r.corners();
        assert_relative_eq!(c[0].x, -2.0);
        assert_relative_eq!(c[0].y, -1.0);
        assert_relative_eq!(c[2].x, 2.0);
        assert_relative_eq!(c[2].y, 1.0);
        assert_relative_eq!(r.polygon().unsigned_area(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn_swaps_extent() {
        let r = OrientedRect::new([1.0, 1.0], 4.0, 2.0, FRAC_PI_2);
        let env = r.envelope();
        assert_relative_eq!(env.lower()[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(env.upper()[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn footprint_starts_at_leading_edge() {
        let ca = CaFootprint::new([0.0, 0.0], 0.0, 2.0, 10.0);
        let (a, b) = ca.leading_edge_endpoints();
        assert_relative_eq!(a.x, -1.0);
        assert_relative_eq!(b.x, 1.0);
        assert_relative_eq!(ca.rect().center[1], 5.0);
        assert_relative_eq!(ca.distance_from_leading_edge(Point2::new(0.3, 4.0)), 4.0);
    }

    #[test]
    fn from_center_round_trips() {
        let ca = CaFootprint::from_center([10.0, 20.0], 0.7, 3.0, 12.0);
        let c = ca.rect().center;
        assert_relative_eq!(c[0], 10.0, epsilon = 1e-12);
        assert_relative_eq!(c[1], 20.0, epsilon = 1e-12);
    }

    #[test]
    fn shortening_keeps_leading_edge() {
        let ca = CaFootprint::new([3.0, 4.0], 1.2, 2.0, 10.0);
        let short = ca.with_length(4.0);
        assert_eq!(ca.leading_edge(), short.leading_edge());
        assert_relative_eq!(short.polygon().unsigned_area(), 8.0, epsilon = 1e-9);
    }
}
