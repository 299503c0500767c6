//! Whole-unit stock movements (restock and consumption).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    /// Units entering stock.
    Restock,
    /// Units leaving stock.
    Consumption,
}

impl MovementKind {
    /// Signed change applied to the quantity for `amount` units.
    pub fn delta(&self, amount: i64) -> i64 {
        match self {
            MovementKind::Restock => amount,
            MovementKind::Consumption => -amount,
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementKind::Restock => write!(f, "restock"),
            MovementKind::Consumption => write!(f, "consumption"),
        }
    }
}

/// A recorded quantity change on a slab record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub date: DateTime<Utc>,
    pub kind: MovementKind,
    /// Number of units moved (always positive).
    pub quantity: i64,
    #[serde(default)]
    pub note: String,
    pub operator_id: String,
    pub operator_name: String,
}
