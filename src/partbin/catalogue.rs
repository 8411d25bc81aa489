//! The owned catalogue: the single home of the component list.
//!
//! All mutation goes through the command layer, which operates on a
//! `&mut Catalogue` — there is no free-standing shared collection. The
//! list is ordered: newly added or merged components sit at the front,
//! which is a deliberate recency bias, not an accident of insertion.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::model::Component;
use crate::store::CatalogueStore;

/// Snapshot of a deleted component and the index it was removed from.
pub type UndoEntry = (Component, usize);

pub struct Catalogue<S: CatalogueStore> {
    store: S,
    components: Vec<Component>,
    undo_stack: Vec<UndoEntry>,
    last_activity: Instant,
    max_bins: usize,
}

impl<S: CatalogueStore> Catalogue<S> {
    /// Open a catalogue, loading whatever the store currently holds.
    pub fn open(store: S, max_bins: usize) -> Result<Self> {
        let components = store.load()?;
        Ok(Self {
            store,
            components,
            undo_stack: Vec::new(),
            last_activity: Instant::now(),
            max_bins,
        })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut Vec<Component> {
        &mut self.components
    }

    pub fn max_bins(&self) -> usize {
        self.max_bins
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// How long since the last persisted mutation. Gates the backup loop.
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// All location codes currently assigned, upper-cased.
    pub fn assigned_locations(&self) -> HashSet<String> {
        self.components
            .iter()
            .filter_map(|comp| comp.part_info.location.as_deref())
            .map(|loc| loc.trim().to_uppercase())
            .filter(|loc| !loc.is_empty())
            .collect()
    }

    /// Index of the component with the given normalized part number.
    pub fn find_index(&self, normalized: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|comp| comp.normalized_part_number() == normalized)
    }

    /// Write the full list to the store and append a changelog line.
    /// Synchronous whole-file rewrite; errors surface to the caller.
    pub fn persist(&mut self, message: &str) -> Result<()> {
        self.store.save(&self.components)?;
        self.store.append_changelog(message)?;
        self.last_activity = Instant::now();
        log::debug!("catalogue persisted: {message}");
        Ok(())
    }

    pub(crate) fn push_undo(&mut self, entry: UndoEntry) {
        self.undo_stack.push(entry);
    }

    pub(crate) fn pop_undo(&mut self) -> Option<UndoEntry> {
        self.undo_stack.pop()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}
