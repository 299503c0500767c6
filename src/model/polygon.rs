//! Closed polygon describing the usable shape of a slab.

use super::Point;
use crate::config::{float_cmp::approx_eq, CM2_PER_M2};
use serde::{Deserialize, Serialize};

/// Ordered vertex loop; the last point implicitly joins the first.
///
/// Insertion order defines edge order: edge `i` runs from vertex `i`
/// to vertex `(i + 1) % len`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from an ordered list of points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The full `width x height` rectangle, counter-clockwise from the origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than 3 points cannot enclose an area.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn pop(&mut self) -> Option<Point> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replace the vertex at `index`. Out-of-range indices are ignored.
    pub fn set_point(&mut self, index: usize, point: Point) {
        if let Some(p) = self.points.get_mut(index) {
            *p = point;
        }
    }

    /// Endpoints of edge `index`, if it exists.
    pub fn edge(&self, index: usize) -> Option<(Point, Point)> {
        let n = self.points.len();
        if n < 2 || index >= n {
            return None;
        }
        Some((self.points[index], self.points[(index + 1) % n]))
    }

    /// Length of edge `index` in cm.
    pub fn edge_length(&self, index: usize) -> Option<f64> {
        self.edge(index).map(|(a, b)| a.distance_to(&b))
    }

    /// Iterate over all edges, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed shoelace area in cm² (positive for counter-clockwise winding).
    //https://en.wikipedia.org/wiki/Shoelace_formula
    pub fn signed_area_cm2(&self) -> f64 {
        if !self.is_complete() {
            return 0.0;
        }

        let sigma: f64 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();

        0.5 * sigma
    }

    /// Absolute area in cm².
    pub fn area_cm2(&self) -> f64 {
        self.signed_area_cm2().abs()
    }

    /// Absolute area in m².
    pub fn area_m2(&self) -> f64 {
        self.area_cm2() / CM2_PER_M2
    }

    /// Bounding dimensions measured from the slab origin: `(max x, max y)`.
    pub fn bounding_dims(&self) -> (f64, f64) {
        if self.points.is_empty() {
            return (0.0, 0.0);
        }

        self.points.iter().fold((f64::MIN, f64::MIN), |(w, h), p| {
            (w.max(p.x), h.max(p.y))
        })
    }

    /// Check whether the polygon is exactly the `width x height` rectangle,
    /// starting at any corner and in either winding.
    pub fn is_full_rectangle(&self, width: f64, height: f64) -> bool {
        if self.points.len() != 4 {
            return false;
        }

        let corners = Self::rectangle(width, height);
        let same = |a: &Point, b: &Point| approx_eq(a.x, b.x) && approx_eq(a.y, b.y);

        let Some(start) = self.points.iter().position(|p| same(p, &corners.points[0])) else {
            return false;
        };

        let forward = (0..4).all(|k| same(&self.points[(start + k) % 4], &corners.points[k]));
        let backward =
            (0..4).all(|k| same(&self.points[(start + 4 - k) % 4], &corners.points[k]));

        forward || backward
    }

    /// Check for a proper crossing between any two non-adjacent edges.
    ///
    /// Touching or collinear overlaps are not reported.
    pub fn is_self_intersecting(&self) -> bool {
        let n = self.points.len();
        if n < 4 {
            return false;
        }

        for i in 0..n {
            let (a1, a2) = (self.points[i], self.points[(i + 1) % n]);
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (b1, b2) = (self.points[j], self.points[(j + 1) % n]);
                if segments_cross(a1, a2, b1, b2) {
                    return true;
                }
            }
        }

        false
    }

    /// Check whether every vertex lies inside `[0, width] x [0, height]`.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.points.iter().all(|p| p.within(width, height))
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn segments_cross(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    d1 * d2 < 0.0 && d3 * d4 < 0.0
}
