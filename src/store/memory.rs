//! In-memory store, used by tests and short-lived sessions.

use super::InventoryStore;
use crate::error::Result;
use crate::model::SlabRecord;
use std::collections::BTreeMap;

/// Slabs held in a map keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slabs: BTreeMap<String, SlabRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with records.
    pub fn from_slabs(slabs: impl IntoIterator<Item = SlabRecord>) -> Self {
        Self {
            slabs: slabs.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    pub(crate) fn all(&self) -> impl Iterator<Item = &SlabRecord> {
        self.slabs.values()
    }

    pub fn len(&self) -> usize {
        self.slabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slabs.is_empty()
    }
}

impl InventoryStore for MemoryStore {
    fn get_by_id(&self, tenant_id: &str, slab_id: &str) -> Result<Option<SlabRecord>> {
        Ok(self
            .slabs
            .get(slab_id)
            .filter(|s| s.company_id == tenant_id)
            .cloned())
    }

    fn save(&mut self, slab: SlabRecord) -> Result<()> {
        self.slabs.insert(slab.id.clone(), slab);
        Ok(())
    }

    fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<SlabRecord>> {
        let mut slabs: Vec<SlabRecord> = self
            .slabs
            .values()
            .filter(|s| s.company_id == tenant_id)
            .cloned()
            .collect();
        slabs.sort_by_key(|s| s.serial);
        Ok(slabs)
    }

    fn delete(&mut self, tenant_id: &str, slab_id: &str) -> Result<bool> {
        let owned = self
            .slabs
            .get(slab_id)
            .is_some_and(|s| s.company_id == tenant_id);
        if owned {
            self.slabs.remove(slab_id);
        }
        Ok(owned)
    }
}
