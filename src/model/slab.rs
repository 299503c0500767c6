//! Slab record: one stock line of stone material and its remnant shape.

use super::{CutRecord, Polygon, StockMovement};
use crate::config::TrackerConfig;
use crate::identity::Operator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock status derived from quantity and remaining shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlabStatus {
    /// Untouched: the outline is the full original rectangle.
    #[default]
    Whole,
    /// Part of the slab has been cut away.
    HasRemnant,
    /// Nothing usable left.
    Exhausted,
}

impl SlabStatus {
    /// Derive the status of a slab from its current state.
    pub fn derive(slab: &SlabRecord, config: &TrackerConfig) -> Self {
        if slab.quantity <= 0 || config.is_exhausted_area(slab.available_area) {
            SlabStatus::Exhausted
        } else if slab
            .polygon()
            .is_full_rectangle(slab.original_width, slab.original_height)
        {
            SlabStatus::Whole
        } else {
            SlabStatus::HasRemnant
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == SlabStatus::Exhausted
    }
}

impl std::fmt::Display for SlabStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlabStatus::Whole => write!(f, "whole"),
            SlabStatus::HasRemnant => write!(f, "has remnant"),
            SlabStatus::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Descriptive input for a new stock entry.
#[derive(Debug, Clone, Default)]
pub struct NewSlab {
    pub company_id: String,
    pub material: String,
    pub category: String,
    /// Free text, e.g. "2cm" or "3 cm polido".
    pub thickness: String,
    pub supplier: Option<String>,
    /// Width in cm.
    pub width: f64,
    /// Height in cm.
    pub height: f64,
    /// Identical whole units entering stock.
    pub quantity: i64,
}

/// Persistent slab entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabRecord {
    /// Unique id (uuid v4).
    pub id: String,
    /// Human-facing number, unique per tenant.
    pub serial: u32,
    /// Owning tenant. Never changes after creation.
    pub company_id: String,

    pub material: String,
    pub category: String,
    pub thickness: String,
    #[serde(default)]
    pub supplier: Option<String>,

    /// Width at stock entry (cm).
    pub original_width: f64,
    /// Height at stock entry (cm).
    pub original_height: f64,
    /// Bounding width of the current outline (cm).
    pub current_width: f64,
    /// Bounding height of the current outline (cm).
    pub current_height: f64,
    /// Live remnant outline. Absent means the rectangle of the current dims.
    #[serde(default)]
    pub current_polygon: Option<Polygon>,

    /// Area at stock entry (m²).
    pub total_area: f64,
    /// Area of the current outline (m²).
    pub available_area: f64,
    /// Whole identical units in stock.
    pub quantity: i64,
    pub status: SlabStatus,

    /// Committed cuts, newest first.
    #[serde(default)]
    pub history: Vec<CutRecord>,
    /// Quantity movements, newest first.
    #[serde(default)]
    pub movements: Vec<StockMovement>,

    pub last_operator_id: String,
    pub last_operator_name: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl SlabRecord {
    /// Create a whole slab from a stock entry.
    pub fn new(
        entry: NewSlab,
        id: String,
        serial: u32,
        operator: &Operator,
        now: DateTime<Utc>,
    ) -> Self {
        let polygon = Polygon::rectangle(entry.width, entry.height);
        let area = polygon.area_m2();

        let mut slab = Self {
            id,
            serial,
            company_id: entry.company_id,
            material: entry.material,
            category: entry.category,
            thickness: entry.thickness,
            supplier: entry.supplier,
            original_width: entry.width,
            original_height: entry.height,
            current_width: entry.width,
            current_height: entry.height,
            current_polygon: Some(polygon),
            total_area: area,
            available_area: area,
            quantity: entry.quantity,
            status: SlabStatus::Whole,
            history: Vec::new(),
            movements: Vec::new(),
            last_operator_id: operator.id.clone(),
            last_operator_name: operator.name.clone(),
            created_at: now,
            last_updated_at: now,
        };
        slab.status = SlabStatus::derive(&slab, &TrackerConfig::default());
        slab
    }

    /// Current outline, falling back to the rectangle of the current dims.
    pub fn polygon(&self) -> Polygon {
        self.current_polygon
            .clone()
            .unwrap_or_else(|| Polygon::rectangle(self.current_width, self.current_height))
    }

    /// Copy with a new outline; dims and available area follow the polygon.
    pub fn with_polygon(mut self, polygon: Polygon) -> Self {
        let (width, height) = polygon.bounding_dims();
        self.current_width = width;
        self.current_height = height;
        self.available_area = polygon.area_m2();
        self.current_polygon = Some(polygon);
        self
    }

    /// Copy with the audit stamp replaced.
    pub fn with_operator(mut self, operator: &Operator, now: DateTime<Utc>) -> Self {
        self.last_operator_id = operator.id.clone();
        self.last_operator_name = operator.name.clone();
        self.last_updated_at = now;
        self
    }

    /// Copy with the status set explicitly.
    pub fn with_status(mut self, status: SlabStatus) -> Self {
        self.status = status;
        self
    }

    /// Copy with a cut prepended to the history.
    pub fn with_cut(mut self, cut: CutRecord) -> Self {
        self.history.insert(0, cut);
        self
    }

    /// Copy with a movement prepended and the quantity adjusted.
    pub fn with_movement(mut self, movement: StockMovement) -> Self {
        self.quantity += movement.kind.delta(movement.quantity);
        self.movements.insert(0, movement);
        self
    }

    /// Total area removed by committed cuts (m²).
    pub fn area_consumed(&self) -> f64 {
        self.history.iter().map(|c| c.area_used).sum()
    }

    pub fn is_exhausted(&self) -> bool {
        self.status.is_terminal()
    }
}
