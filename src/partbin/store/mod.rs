//! # Storage Layer
//!
//! The [`CatalogueStore`] trait abstracts where the component list and its
//! change history live.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage. The catalogue is one JSON array
//!   rewritten in full on every save — callers must accept this overwrite
//!   contract (no atomic rename, no append log). The changelog is a plain
//!   append-only text file, written but never read back.
//! - [`memory::InMemoryStore`]: in-memory storage for tests; keeps the
//!   appended changelog lines inspectable.

use crate::error::Result;
use crate::model::Component;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Abstract interface for catalogue persistence.
pub trait CatalogueStore {
    /// Load the full component list. A store that has never been written
    /// returns an empty list.
    fn load(&self) -> Result<Vec<Component>>;

    /// Persist the full component list, replacing whatever was stored.
    fn save(&mut self, components: &[Component]) -> Result<()>;

    /// Append one `timestamp - message` line to the change history.
    fn append_changelog(&mut self, message: &str) -> Result<()>;

    /// Path of the catalogue file, for stores that have one. Used by the
    /// backup task; memory stores return `None` and are never backed up.
    fn catalogue_path(&self) -> Option<&Path> {
        None
    }
}
