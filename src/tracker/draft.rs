//! In-memory draft polygon edited during a cut-registration session.
//!
//! Every edit consumes the draft and returns the next one, so the caller
//! owns the only copy and can drop it at any time to cancel the session.

use crate::config::float_cmp::approx_zero;
use crate::error::{Result, TrackerError};
use crate::model::{Point, Polygon, SlabRecord};
use tracing::debug;

/// Uncommitted remnant outline plus the bounds vertices are clamped into.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftState {
    polygon: Polygon,
    bound_width: f64,
    bound_height: f64,
}

impl DraftState {
    /// Start a draft from a slab's current outline.
    ///
    /// Slabs stored without an outline start from the rectangle of their
    /// current dimensions.
    pub fn from_slab(slab: &SlabRecord) -> Self {
        Self {
            polygon: slab.polygon(),
            bound_width: slab.current_width,
            bound_height: slab.current_height,
        }
    }

    /// Start a draft with an explicit outline and clamping bounds.
    pub fn new(polygon: Polygon, bound_width: f64, bound_height: f64) -> Self {
        Self {
            polygon,
            bound_width,
            bound_height,
        }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Clamping bounds `(width, height)` in cm.
    pub fn bounds(&self) -> (f64, f64) {
        (self.bound_width, self.bound_height)
    }

    pub fn vertex_count(&self) -> usize {
        self.polygon.len()
    }

    /// Append a vertex, clamped into the slab's current bounds.
    ///
    /// Points with a NaN or infinite coordinate are dropped.
    pub fn add_vertex(mut self, point: Point) -> Self {
        if !point.is_finite() {
            debug!("Ignoring non-finite vertex {}", point);
            return self;
        }
        let clamped = point.clamped(self.bound_width, self.bound_height);
        if clamped != point {
            debug!("Clamped vertex {} to {}", point, clamped);
        }
        self.polygon.push(clamped);
        self
    }

    /// Drop the most recent vertex. Nothing happens on an empty draft.
    pub fn undo_last_vertex(mut self) -> Self {
        self.polygon.pop();
        self
    }

    /// Remove every vertex.
    pub fn clear(mut self) -> Self {
        self.polygon.clear();
        self
    }

    /// Set the length of edge `edge_index` by moving its end vertex.
    ///
    /// The end vertex slides along the edge direction away from (or toward)
    /// the start vertex and is rounded to whole centimeters. Only that vertex
    /// moves, so the following edge changes length as well. A zero-length
    /// edge has no direction and is left untouched.
    pub fn resize_edge(mut self, edge_index: usize, new_length: f64) -> Result<Self> {
        if !new_length.is_finite() || new_length <= 0.0 {
            return Err(TrackerError::InvalidLength { length: new_length });
        }

        let count = self.polygon.len();
        let (start, end) = self
            .polygon
            .edge(edge_index)
            .ok_or(TrackerError::EdgeOutOfRange {
                index: edge_index,
                count,
            })?;

        let current_length = start.distance_to(&end);
        if approx_zero(current_length) {
            debug!("Edge {} has zero length, resize ignored", edge_index);
            return Ok(self);
        }

        let ratio = new_length / current_length;
        let moved = Point::new(
            start.x + (end.x - start.x) * ratio,
            start.y + (end.y - start.y) * ratio,
        )
        .rounded();

        debug!(
            "Edge {}: {:.1} -> {:.1} cm, vertex {} moved to {}",
            edge_index,
            current_length,
            new_length,
            (edge_index + 1) % count,
            moved
        );
        self.polygon.set_point((edge_index + 1) % count, moved);
        Ok(self)
    }

    /// Shoelace area of the draft in m²; 0 with fewer than 3 vertices.
    pub fn compute_area(&self) -> f64 {
        self.polygon.area_m2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_draft(width: f64, height: f64) -> DraftState {
        DraftState::new(Polygon::default(), width, height)
    }

    fn triangle() -> DraftState {
        empty_draft(100.0, 100.0)
            .add_vertex(Point::new(0.0, 0.0))
            .add_vertex(Point::new(10.0, 0.0))
            .add_vertex(Point::new(0.0, 10.0))
    }

    // ==================== Vertex editing ====================

    #[test]
    fn test_add_vertex_appends_in_order() {
        let draft = triangle();
        assert_eq!(
            draft.polygon().points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0)
            ]
        );
    }

    #[test]
    fn test_add_vertex_clamps_to_bounds() {
        let draft = empty_draft(300.0, 180.0)
            .add_vertex(Point::new(-20.0, 90.0))
            .add_vertex(Point::new(350.0, 200.0));
        assert_eq!(
            draft.polygon().points(),
            &[Point::new(0.0, 90.0), Point::new(300.0, 180.0)]
        );
    }

    #[test]
    fn test_add_vertex_drops_non_finite() {
        let draft = triangle()
            .add_vertex(Point::new(f64::NAN, 0.0))
            .add_vertex(Point::new(5.0, f64::INFINITY))
            .add_vertex(Point::new(f64::NEG_INFINITY, 5.0));
        assert_eq!(draft, triangle());
        assert!(draft.compute_area().is_finite());
    }

    #[test]
    fn test_undo_last_vertex() {
        let draft = triangle().undo_last_vertex();
        assert_eq!(draft.vertex_count(), 2);
        assert_eq!(draft.polygon().points()[1], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let draft = empty_draft(10.0, 10.0);
        assert_eq!(draft.clone().undo_last_vertex(), draft);
    }

    #[test]
    fn test_clear() {
        let draft = triangle().clear();
        assert_eq!(draft.vertex_count(), 0);
        assert_eq!(draft.clone().clear(), draft);
    }

    // ==================== Edge resizing ====================

    #[test]
    fn test_resize_edge_moves_end_vertex_only() {
        let before = triangle();
        let old_next_edge = before.polygon().edge_length(1).unwrap();
        let draft = before.resize_edge(0, 20.0).unwrap();
        let points = draft.polygon().points();
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[1], Point::new(20.0, 0.0));
        assert_eq!(points[2], Point::new(0.0, 10.0));
        assert_ne!(draft.polygon().edge_length(1).unwrap(), old_next_edge);
    }

    #[test]
    fn test_resize_closing_edge_moves_first_vertex() {
        // Edge 2 runs from (0,10) back to (0,0)
        let draft = triangle().resize_edge(2, 5.0).unwrap();
        assert_eq!(draft.polygon().points()[0], Point::new(0.0, 5.0));
        assert_eq!(draft.polygon().points()[2], Point::new(0.0, 10.0));
    }

    #[test]
    fn test_resize_rounds_to_whole_cm() {
        let draft = empty_draft(100.0, 100.0)
            .add_vertex(Point::new(0.0, 0.0))
            .add_vertex(Point::new(30.0, 40.0))
            .add_vertex(Point::new(0.0, 40.0));
        // 3-4-5 direction scaled to 7: (4.2, 5.6) -> (4, 6)
        let draft = draft.resize_edge(0, 7.0).unwrap();
        assert_eq!(draft.polygon().points()[1], Point::new(4.0, 6.0));
    }

    #[test]
    fn test_resize_degenerate_edge_is_noop() {
        let draft = empty_draft(100.0, 100.0)
            .add_vertex(Point::new(5.0, 5.0))
            .add_vertex(Point::new(5.0, 5.0))
            .add_vertex(Point::new(0.0, 10.0));
        let resized = draft.clone().resize_edge(0, 12.0).unwrap();
        assert_eq!(resized, draft);
    }

    #[test]
    fn test_resize_rejects_bad_length() {
        assert!(matches!(
            triangle().resize_edge(0, 0.0),
            Err(TrackerError::InvalidLength { .. })
        ));
        assert!(matches!(
            triangle().resize_edge(0, f64::NAN),
            Err(TrackerError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_resize_rejects_missing_edge() {
        match triangle().resize_edge(3, 10.0) {
            Err(TrackerError::EdgeOutOfRange { index, count }) => {
                assert_eq!(index, 3);
                assert_eq!(count, 3);
            }
            other => panic!("Expected EdgeOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_resize_may_leave_bounds() {
        let draft = triangle().resize_edge(0, 150.0).unwrap();
        assert_eq!(draft.polygon().points()[1], Point::new(150.0, 0.0));
    }

    // ==================== Area ====================

    #[test]
    fn test_compute_area_rectangle() {
        let draft = DraftState::new(Polygon::rectangle(300.0, 180.0), 300.0, 180.0);
        assert_eq!(draft.compute_area(), 300.0 * 180.0 / 10_000.0);
    }

    #[test]
    fn test_compute_area_incomplete() {
        let draft = triangle().undo_last_vertex();
        assert_eq!(draft.compute_area(), 0.0);
    }
}
