//! remnant-tracker - Slab stock and remnant geometry for stone fabrication shops.
//!
//! Each slab record keeps the usable outline of one physical unit as a
//! polygon. Cuts are drafted by editing that polygon and committed as
//! immutable cut records that reduce the available area.
//!
//! # Example
//!
//! ```no_run
//! use remnant_tracker::{CutDetails, Inventory, MemoryStore, NewSlab, Operator, Point, StaticIdentity};
//!
//! let identity = StaticIdentity::signed_in(Operator::new("u1", "Ana"));
//! let mut inventory = Inventory::new(MemoryStore::new(), identity);
//!
//! let slab = inventory.register_slab(NewSlab {
//!     company_id: "acme".into(),
//!     material: "Granito Preto".into(),
//!     width: 300.0,
//!     height: 180.0,
//!     quantity: 1,
//!     ..Default::default()
//! }).unwrap();
//!
//! let draft = inventory.begin_cut("acme", &slab.id).unwrap()
//!     .clear()
//!     .add_vertex(Point::new(0.0, 0.0))
//!     .add_vertex(Point::new(180.0, 0.0))
//!     .add_vertex(Point::new(180.0, 180.0))
//!     .add_vertex(Point::new(0.0, 180.0));
//!
//! let cut = inventory.record_cut("acme", &slab.id, &draft, CutDetails {
//!     client_name: "Joao".into(),
//!     project: "Bancada".into(),
//!     ..Default::default()
//! }).unwrap();
//! println!("{} m² used", cut.area_used);
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod inventory;
pub mod model;
pub mod store;
pub mod tracker;
pub mod validation;

// Re-exports for convenience
pub use config::TrackerConfig;
pub use error::{ErrorCode, Result, TrackerError};
pub use identity::{IdentityContext, Operator, StaticIdentity};
pub use inventory::{CutDetails, Inventory};
pub use model::{
    CutRecord, MovementKind, NewSlab, Point, Polygon, SlabRecord, SlabStatus, StockMovement,
};
pub use store::{InventoryStore, JsonFileStore, MemoryStore};
pub use tracker::{CutContext, DraftState, RemnantTracker};
pub use validation::{validate_draft, validate_slab, validate_slabs, ValidationResult};
