//! Data model types for slab stock and remnant geometry.

mod cut_record;
mod movement;
mod point;
mod polygon;
mod slab;

pub use cut_record::CutRecord;
pub use movement::{MovementKind, StockMovement};
pub use point::Point;
pub use polygon::Polygon;
pub use slab::{NewSlab, SlabRecord, SlabStatus};
