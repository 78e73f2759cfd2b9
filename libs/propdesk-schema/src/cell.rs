use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::error::SchemaError;
use crate::registry::SchemaRegistry;

/// One-time initialization slot for a shared [`SchemaRegistry`].
///
/// Initialization is serialized: concurrent first callers wait for a single
/// loader run, and later calls return the stored registry without running
/// their loader. A failed load leaves the cell empty so the next caller
/// retries.
///
/// ```
/// use propdesk_schema::{SchemaCell, SchemaRegistry};
///
/// static SCHEMA: SchemaCell = SchemaCell::new();
///
/// let registry = SCHEMA.get_or_try_init(|| Ok(SchemaRegistry::default())).unwrap();
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SchemaCell {
    inner: OnceLock<Arc<SchemaRegistry>>,
    init: Mutex<()>,
}

impl SchemaCell {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The registry, if it has been loaded.
    #[must_use]
    pub fn get(&self) -> Option<Arc<SchemaRegistry>> {
        self.inner.get().cloned()
    }

    /// Return the loaded registry, running `load` if nothing is stored yet.
    ///
    /// # Errors
    /// Propagates the loader's error; the cell stays empty in that case.
    pub fn get_or_try_init<F>(&self, load: F) -> Result<Arc<SchemaRegistry>, SchemaError>
    where
        F: FnOnce() -> Result<SchemaRegistry, SchemaError>,
    {
        if let Some(existing) = self.get() {
            return Ok(existing);
        }
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = self.get() {
            return Ok(existing);
        }
        let loaded = Arc::new(load()?);
        Ok(Arc::clone(self.inner.get_or_init(|| loaded)))
    }
}
