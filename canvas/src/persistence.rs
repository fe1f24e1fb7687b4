//! Persistence controller: the single store blob holding every canvas.
//!
//! DESIGN
//! ======
//! All canvases live in one JSON object under one key. Every write
//! serializes the complete mapping and replaces the blob with a single
//! `set`, so the stored value is always a whole, self-consistent document.
//! There is no per-note incremental write and no versioning: the last save
//! wins, including across browser tabs.
//!
//! ERROR HANDLING
//! ==============
//! A missing or unparseable blob reads as an empty mapping. Write failures
//! are returned to the caller untouched; nothing is queued or retried.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use tracing::{debug, warn};

use crate::consts::DEFAULT_STORAGE_KEY;
use crate::document::Canvases;
use crate::error::EngineError;
use crate::store::KeyValueStore;

/// Where the blob lives inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    pub storage_key: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { storage_key: DEFAULT_STORAGE_KEY.to_owned() }
    }
}

/// Reads and writes the canvas mapping in a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    config: PersistenceConfig,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, config: PersistenceConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every canvas. Absent or malformed data yields an empty mapping.
    #[must_use]
    pub fn load_all(&self) -> Canvases {
        let Some(raw) = self.store.get(&self.config.storage_key) else {
            return Canvases::new();
        };
        match serde_json::from_str::<Option<Canvases>>(&raw) {
            Ok(canvases) => canvases.unwrap_or_default(),
            Err(e) => {
                warn!(key = %self.config.storage_key, error = %e, "stored canvases are malformed; starting empty");
                Canvases::new()
            }
        }
    }

    /// Replace the stored blob with `canvases`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store rejects the write.
    pub fn write_all(&mut self, canvases: &Canvases) -> Result<(), EngineError> {
        let raw = serde_json::to_string(canvases)?;
        self.store.set(&self.config.storage_key, &raw)?;
        debug!(canvases = canvases.len(), bytes = raw.len(), "canvases saved");
        Ok(())
    }
}
