//! Slab persistence behind a pluggable repository trait.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::SlabRecord;

/// Repository of slab records keyed by tenant and id.
///
/// Writes are last-write-wins; there is no versioning.
pub trait InventoryStore {
    /// Look up a slab. Records owned by another tenant are reported as absent.
    fn get_by_id(&self, tenant_id: &str, slab_id: &str) -> Result<Option<SlabRecord>>;

    /// Insert or replace a slab by id.
    fn save(&mut self, slab: SlabRecord) -> Result<()>;

    /// All slabs of a tenant, ordered by serial.
    fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<SlabRecord>>;

    /// Remove a slab. Returns whether anything was deleted.
    fn delete(&mut self, tenant_id: &str, slab_id: &str) -> Result<bool>;
}

impl<S: InventoryStore + ?Sized> InventoryStore for &mut S {
    fn get_by_id(&self, tenant_id: &str, slab_id: &str) -> Result<Option<SlabRecord>> {
        (**self).get_by_id(tenant_id, slab_id)
    }

    fn save(&mut self, slab: SlabRecord) -> Result<()> {
        (**self).save(slab)
    }

    fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<SlabRecord>> {
        (**self).list_by_tenant(tenant_id)
    }

    fn delete(&mut self, tenant_id: &str, slab_id: &str) -> Result<bool> {
        (**self).delete(tenant_id, slab_id)
    }
}
