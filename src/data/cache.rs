//! Load-once cache for the reference table.
//!
//! The cache is an explicitly owned value (held by the front-end), not a
//! global. The table is handed out as `Arc<ReferenceTable>` so any number of
//! readers can share it without locking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::loader::load_table;
use crate::domain::ReferenceTable;
use crate::error::LoadError;

#[derive(Debug)]
pub struct TableCache {
    path: PathBuf,
    table: Option<Arc<ReferenceTable>>,
}

impl TableCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Return the cached table, reading the resource on first use.
    ///
    /// Failed loads are not cached; the next call reads the resource again.
    pub fn get(&mut self) -> Result<Arc<ReferenceTable>, LoadError> {
        if let Some(table) = &self.table {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_table(&self.path)?);
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table so the next `get` re-reads the resource.
    pub fn invalidate(&mut self) {
        self.table = None;
    }

    pub fn reload(&mut self) -> Result<Arc<ReferenceTable>, LoadError> {
        self.invalidate();
        self.get()
    }

    /// Degraded-mode load: an empty table plus the error when loading fails.
    pub fn load_or_empty(&mut self) -> (Arc<ReferenceTable>, Option<LoadError>) {
        match self.get() {
            Ok(table) => (table, None),
            Err(err) => (Arc::new(ReferenceTable::empty()), Some(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_data() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("gases.json")
    }

    #[test]
    fn repeated_get_returns_same_table() {
        let mut cache = TableCache::new(shipped_data());
        assert!(!cache.is_loaded());
        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn reload_reads_again_with_equal_content() {
        let mut cache = TableCache::new(shipped_data());
        let a = cache.get().unwrap();
        let b = cache.reload().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn missing_resource_degrades_to_empty_table() {
        let mut cache = TableCache::new("no/such/dir/gases.json");
        let (table, err) = cache.load_or_empty();
        assert!(table.is_empty());
        assert!(matches!(err, Some(LoadError::ResourceNotFound(_))));
        assert!(!cache.is_loaded());
    }
}
