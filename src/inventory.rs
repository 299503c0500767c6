//! Inventory service: stock entry, cuts and quantity movements.
//!
//! Wires a store, an identity source and the remnant tracker together.
//! Every write goes through here so each persisted change carries an
//! operator stamp.

use crate::error::{Result, TrackerError};
use crate::identity::{IdentityContext, Operator};
use crate::model::{CutRecord, MovementKind, NewSlab, SlabRecord, SlabStatus, StockMovement};
use crate::store::InventoryStore;
use crate::tracker::{CutContext, DraftState, RemnantTracker};
use crate::validation::validate_draft;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// Customer-facing details of a cut; the operator comes from the identity.
#[derive(Debug, Clone, Default)]
pub struct CutDetails {
    pub client_name: String,
    pub project: String,
    pub observations: String,
}

/// Inventory operations for one store and one identity source.
pub struct Inventory<S, I> {
    store: S,
    identity: I,
    tracker: RemnantTracker,
}

impl<S: InventoryStore, I: IdentityContext> Inventory<S, I> {
    /// Create a service with the default tracker configuration.
    pub fn new(store: S, identity: I) -> Self {
        Self::with_tracker(store, identity, RemnantTracker::default())
    }

    pub fn with_tracker(store: S, identity: I, tracker: RemnantTracker) -> Self {
        Self {
            store,
            identity,
            tracker,
        }
    }

    fn operator(&self) -> Result<Operator> {
        self.identity.current().ok_or(TrackerError::MissingIdentity)
    }

    /// Enter a new slab into stock as a whole rectangle.
    pub fn register_slab(&mut self, entry: NewSlab) -> Result<SlabRecord> {
        let operator = self.operator()?;

        for (field, value) in [
            ("company_id", &entry.company_id),
            ("material", &entry.material),
        ] {
            if value.trim().is_empty() {
                return Err(TrackerError::MissingField {
                    field: field.to_string(),
                });
            }
        }
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !(usable(entry.width) && usable(entry.height)) {
            return Err(TrackerError::InvalidDimensions {
                width: entry.width,
                height: entry.height,
            });
        }
        if entry.quantity < 1 {
            return Err(TrackerError::InvalidQuantity {
                quantity: entry.quantity,
            });
        }

        let serial = self
            .store
            .list_by_tenant(&entry.company_id)?
            .iter()
            .map(|s| s.serial)
            .max()
            .unwrap_or(0)
            + 1;

        let slab = SlabRecord::new(
            entry,
            Uuid::new_v4().to_string(),
            serial,
            &operator,
            Utc::now(),
        );
        self.store.save(slab.clone())?;

        info!(
            "Registered slab #{} {} ({}x{} cm, qty {})",
            slab.serial, slab.material, slab.original_width, slab.original_height, slab.quantity
        );
        Ok(slab)
    }

    /// Fetch a slab, failing when the tenant has no such record.
    pub fn slab(&self, tenant_id: &str, slab_id: &str) -> Result<SlabRecord> {
        self.store
            .get_by_id(tenant_id, slab_id)?
            .ok_or_else(|| TrackerError::SlabNotFound {
                tenant_id: tenant_id.to_string(),
                slab_id: slab_id.to_string(),
            })
    }

    /// All slabs of a tenant, ordered by serial.
    pub fn list(&self, tenant_id: &str) -> Result<Vec<SlabRecord>> {
        self.store.list_by_tenant(tenant_id)
    }

    /// Open a cut draft on a slab that still has usable material.
    pub fn begin_cut(&self, tenant_id: &str, slab_id: &str) -> Result<DraftState> {
        let slab = self.slab(tenant_id, slab_id)?;
        if slab.is_exhausted() {
            return Err(TrackerError::SlabExhausted {
                slab_id: slab.id,
            });
        }
        Ok(self.tracker.begin_draft(&slab))
    }

    /// Commit a draft and persist the updated slab.
    ///
    /// Nothing is written when the commit is rejected.
    pub fn record_cut(
        &mut self,
        tenant_id: &str,
        slab_id: &str,
        draft: &DraftState,
        details: CutDetails,
    ) -> Result<CutRecord> {
        let operator = self.operator()?;
        let slab = self.slab(tenant_id, slab_id)?;

        let check = validate_draft(draft, &slab);
        for warning in &check.warnings {
            warn!("Slab #{}: {}", slab.serial, warning);
        }

        let context = CutContext {
            client_name: details.client_name,
            project: details.project,
            observations: details.observations,
            operator,
        };
        let (updated, cut) = self.tracker.commit_cut(draft, &slab, &context)?;
        self.store.save(updated)?;

        Ok(cut)
    }

    /// Add whole units to stock.
    pub fn restock(
        &mut self,
        tenant_id: &str,
        slab_id: &str,
        quantity: i64,
        note: &str,
    ) -> Result<SlabRecord> {
        self.move_stock(tenant_id, slab_id, MovementKind::Restock, quantity, note)
    }

    /// Take whole units out of stock.
    pub fn consume(
        &mut self,
        tenant_id: &str,
        slab_id: &str,
        quantity: i64,
        note: &str,
    ) -> Result<SlabRecord> {
        self.move_stock(tenant_id, slab_id, MovementKind::Consumption, quantity, note)
    }

    fn move_stock(
        &mut self,
        tenant_id: &str,
        slab_id: &str,
        kind: MovementKind,
        quantity: i64,
        note: &str,
    ) -> Result<SlabRecord> {
        let operator = self.operator()?;
        if quantity <= 0 {
            return Err(TrackerError::InvalidQuantity { quantity });
        }

        let slab = self.slab(tenant_id, slab_id)?;
        if kind == MovementKind::Consumption && quantity > slab.quantity {
            return Err(TrackerError::InsufficientQuantity {
                slab_id: slab.id,
                requested: quantity,
                available: slab.quantity,
            });
        }

        let now = Utc::now();
        let movement = StockMovement {
            id: Uuid::new_v4().to_string(),
            date: now,
            kind,
            quantity,
            note: note.trim().to_string(),
            operator_id: operator.id.clone(),
            operator_name: operator.name.clone(),
        };

        let moved = slab.with_movement(movement).with_operator(&operator, now);
        let status = SlabStatus::derive(&moved, self.tracker.config());
        let updated = moved.with_status(status);
        self.store.save(updated.clone())?;

        info!(
            "Slab #{} {} of {}: quantity now {} ({})",
            updated.serial, kind, quantity, updated.quantity, updated.status
        );
        Ok(updated)
    }

    /// Delete a slab record outright.
    pub fn remove(&mut self, tenant_id: &str, slab_id: &str) -> Result<bool> {
        self.operator()?;
        let removed = self.store.delete(tenant_id, slab_id)?;
        if removed {
            info!("Removed slab {} (tenant {})", slab_id, tenant_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use crate::model::{Point, Polygon};
    use crate::store::MemoryStore;

    fn inventory() -> Inventory<MemoryStore, StaticIdentity> {
        Inventory::new(
            MemoryStore::new(),
            StaticIdentity::signed_in(Operator::new("u1", "Ana")),
        )
    }

    fn entry(tenant: &str) -> NewSlab {
        NewSlab {
            company_id: tenant.into(),
            material: "Granito Verde Ubatuba".into(),
            category: "Granito".into(),
            thickness: "2cm".into(),
            supplier: None,
            width: 300.0,
            height: 180.0,
            quantity: 2,
        }
    }

    fn details() -> CutDetails {
        CutDetails {
            client_name: "Maria".into(),
            project: "Lavatorio".into(),
            observations: String::new(),
        }
    }

    // ==================== Registration ====================

    #[test]
    fn test_register_assigns_serials_per_tenant() {
        let mut inv = inventory();
        let a = inv.register_slab(entry("acme")).unwrap();
        let b = inv.register_slab(entry("acme")).unwrap();
        let c = inv.register_slab(entry("other")).unwrap();
        assert_eq!((a.serial, b.serial, c.serial), (1, 2, 1));
        assert_ne!(a.id, b.id);
        assert_eq!(a.last_operator_id, "u1");
    }

    #[test]
    fn test_register_rejects_bad_entries() {
        let mut inv = inventory();
        assert!(matches!(
            inv.register_slab(NewSlab {
                width: 0.0,
                ..entry("acme")
            }),
            Err(TrackerError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            inv.register_slab(NewSlab {
                width: f64::INFINITY,
                ..entry("acme")
            }),
            Err(TrackerError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            inv.register_slab(NewSlab {
                height: f64::NAN,
                ..entry("acme")
            }),
            Err(TrackerError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            inv.register_slab(NewSlab {
                quantity: 0,
                ..entry("acme")
            }),
            Err(TrackerError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            inv.register_slab(NewSlab {
                material: " ".into(),
                ..entry("acme")
            }),
            Err(TrackerError::MissingField { .. })
        ));
        assert!(inv.list("acme").unwrap().is_empty());
    }

    #[test]
    fn test_anonymous_cannot_write() {
        let mut inv = Inventory::new(MemoryStore::new(), StaticIdentity::anonymous());
        assert!(matches!(
            inv.register_slab(entry("acme")),
            Err(TrackerError::MissingIdentity)
        ));
    }

    // ==================== Cuts ====================

    #[test]
    fn test_record_cut_persists() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();

        let draft = inv
            .begin_cut("acme", &slab.id)
            .unwrap()
            .clear()
            .add_vertex(Point::new(0.0, 0.0))
            .add_vertex(Point::new(150.0, 0.0))
            .add_vertex(Point::new(150.0, 180.0))
            .add_vertex(Point::new(0.0, 180.0));
        let cut = inv.record_cut("acme", &slab.id, &draft, details()).unwrap();

        let stored = inv.slab("acme", &slab.id).unwrap();
        assert_eq!(cut.area_used, 2.7);
        assert_eq!(stored.available_area, 2.7);
        assert_eq!(stored.status, SlabStatus::HasRemnant);
        assert_eq!(stored.history[0].id, cut.id);
    }

    #[test]
    fn test_rejected_cut_is_not_persisted() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();
        let draft = inv.begin_cut("acme", &slab.id).unwrap();

        let err = inv
            .record_cut("acme", &slab.id, &draft, CutDetails::default())
            .unwrap_err();
        assert!(matches!(err, TrackerError::MissingClientName));
        assert_eq!(inv.slab("acme", &slab.id).unwrap(), slab);
    }

    #[test]
    fn test_begin_cut_refuses_exhausted_slab() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();
        let tiny = DraftState::new(Polygon::rectangle(10.0, 10.0), 300.0, 180.0);
        inv.record_cut("acme", &slab.id, &tiny, details()).unwrap();

        assert!(matches!(
            inv.begin_cut("acme", &slab.id),
            Err(TrackerError::SlabExhausted { .. })
        ));
    }

    #[test]
    fn test_unknown_slab() {
        let inv = inventory();
        assert!(matches!(
            inv.slab("acme", "nope"),
            Err(TrackerError::SlabNotFound { .. })
        ));
    }

    // ==================== Movements ====================

    #[test]
    fn test_restock_and_consume() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();

        let restocked = inv.restock("acme", &slab.id, 3, "NF 1234").unwrap();
        assert_eq!(restocked.quantity, 5);
        assert_eq!(restocked.movements[0].kind, MovementKind::Restock);
        assert_eq!(restocked.movements[0].note, "NF 1234");

        let consumed = inv.consume("acme", &slab.id, 5, "").unwrap();
        assert_eq!(consumed.quantity, 0);
        assert_eq!(consumed.status, SlabStatus::Exhausted);
        assert_eq!(consumed.movements.len(), 2);
        assert_eq!(consumed.movements[0].kind, MovementKind::Consumption);
    }

    #[test]
    fn test_consume_more_than_stock() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();
        match inv.consume("acme", &slab.id, 3, "") {
            Err(TrackerError::InsufficientQuantity {
                requested,
                available,
                ..
            }) => {
                assert_eq!((requested, available), (3, 2));
            }
            other => panic!("Expected InsufficientQuantity, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_movement_rejected() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();
        assert!(matches!(
            inv.restock("acme", &slab.id, 0, ""),
            Err(TrackerError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn test_restock_whole_slab_stays_whole() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();
        let updated = inv.restock("acme", &slab.id, 1, "").unwrap();
        assert_eq!(updated.status, SlabStatus::Whole);
    }

    #[test]
    fn test_remove() {
        let mut inv = inventory();
        let slab = inv.register_slab(entry("acme")).unwrap();
        assert!(!inv.remove("other", &slab.id).unwrap());
        assert!(inv.remove("acme", &slab.id).unwrap());
        assert!(inv.list("acme").unwrap().is_empty());
    }
}
