//! Whole-file JSON snapshot store.
//!
//! The file is read once on open and rewritten after every change. Writes
//! go to a temporary file in the same directory which then replaces the
//! store file, and the in-memory copy only changes once that succeeds.

use super::{InventoryStore, MemoryStore};
use crate::error::{Result, TrackerError};
use crate::model::SlabRecord;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    slabs: Vec<SlabRecord>,
}

/// Store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open a store file. A missing or empty file starts an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| {
                TrackerError::StoreFile {
                    path: path.clone(),
                    source,
                }
            })?;
            if content.trim().is_empty() {
                MemoryStore::new()
            } else {
                let snapshot: Snapshot = serde_json::from_str(&content)?;
                MemoryStore::from_slabs(snapshot.slabs)
            }
        } else {
            MemoryStore::new()
        };

        debug!("Opened {} with {} slab(s)", path.display(), inner.len());
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, store: &MemoryStore) -> Result<()> {
        let snapshot = Snapshot {
            slabs: store.all().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        let io_err = |source: std::io::Error| TrackerError::StoreFile {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.as_file().sync_all().map_err(io_err)?;
        file.persist(&self.path).map_err(|e| io_err(e.error))?;

        debug!("Wrote {} slab(s) to {}", snapshot.slabs.len(), self.path.display());
        Ok(())
    }
}

impl InventoryStore for JsonFileStore {
    fn get_by_id(&self, tenant_id: &str, slab_id: &str) -> Result<Option<SlabRecord>> {
        self.inner.get_by_id(tenant_id, slab_id)
    }

    fn save(&mut self, slab: SlabRecord) -> Result<()> {
        let mut next = self.inner.clone();
        next.save(slab)?;
        self.flush(&next)?;
        self.inner = next;
        Ok(())
    }

    fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<SlabRecord>> {
        self.inner.list_by_tenant(tenant_id)
    }

    fn delete(&mut self, tenant_id: &str, slab_id: &str) -> Result<bool> {
        let mut next = self.inner.clone();
        let removed = next.delete(tenant_id, slab_id)?;
        if removed {
            self.flush(&next)?;
            self.inner = next;
        }
        Ok(removed)
    }
}
