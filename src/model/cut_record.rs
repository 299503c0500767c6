//! Immutable record of one piece cut from a slab.

use super::Polygon;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A committed cut. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutRecord {
    /// Unique id (uuid v4).
    pub id: String,
    /// When the cut was committed.
    pub date: DateTime<Utc>,
    /// Customer the piece was cut for.
    pub client_name: String,
    /// Project or piece description.
    pub project: String,
    /// Area removed (m², 4 decimals). Negative when the new outline was larger.
    pub area_used: f64,
    /// Bounding width of the leftover (cm).
    pub leftover_width: f64,
    /// Bounding height of the leftover (cm).
    pub leftover_height: f64,
    /// Snapshot of the leftover outline.
    pub leftover_polygon: Polygon,
    pub operator_id: String,
    pub operator_name: String,
    /// Free-text notes.
    #[serde(default)]
    pub observations: String,
}

impl CutRecord {
    /// Area of the leftover snapshot (m²).
    pub fn leftover_area(&self) -> f64 {
        self.leftover_polygon.area_m2()
    }
}
