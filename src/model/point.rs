//! Planar point in slab coordinates (centimeters).

use serde::{Deserialize, Serialize};

/// A vertex on the slab surface, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (cm).
    pub x: f64,
    /// Y coordinate (cm).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into the box `[0, width] x [0, height]`.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width.max(0.0)),
            y: self.y.clamp(0.0, height.max(0.0)),
        }
    }

    /// Round both coordinates to the nearest whole centimeter.
    ///
    /// Halves round up toward positive infinity, so -2.5 becomes -2 rather
    /// than the -3 that `f64::round` would give.
    pub fn rounded(self) -> Self {
        Self {
            x: (self.x + 0.5).floor(),
            y: (self.y + 0.5).floor(),
        }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Check whether the point lies inside `[0, width] x [0, height]`.
    pub fn within(&self, width: f64, height: f64) -> bool {
        use crate::config::float_cmp::in_range;

        in_range(self.x, 0.0, width) && in_range(self.y, 0.0, height)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
