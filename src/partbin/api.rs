//! # API Facade
//!
//! Single entry point for every operation a front end may invoke. The
//! facade owns the catalogue behind one mutex and holds it for the full
//! mutate-then-persist span of each call, so a duplicate merge and a BOM
//! consumption touching the same part can never interleave. It returns
//! structured types only; presentation stays with the caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::backup::{self, BackupHandle};
use crate::catalogue::Catalogue;
use crate::commands::{
    self, AddOutcome, BomRowResult, CheckoutReceipt, Statistics, Suggestion,
};
use crate::error::{PartbinError, Result};
use crate::model::{BomRow, Component};
use crate::store::CatalogueStore;
use crate::strip::bus::{LedBus, SetOutcome};
use crate::strip::scheduler::Highlighter;

pub struct PartbinApi<S: CatalogueStore> {
    catalogue: Arc<Mutex<Catalogue<S>>>,
    highlighter: Highlighter,
    backup: Option<BackupHandle>,
}

impl<S: CatalogueStore> PartbinApi<S> {
    pub fn new(catalogue: Catalogue<S>, bus: Arc<LedBus>) -> Self {
        Self {
            catalogue: Arc::new(Mutex::new(catalogue)),
            highlighter: Highlighter::new(bus),
            backup: None,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Catalogue<S>>> {
        self.catalogue
            .lock()
            .map_err(|_| PartbinError::Store("Catalogue lock poisoned".to_string()))
    }

    // --- catalogue / ledger ---

    pub fn add_component(&self, component: Component) -> Result<AddOutcome> {
        commands::add::run(&mut *self.lock()?, component)
    }

    /// Advisory near-duplicate check; see [`commands::add::suggest`].
    pub fn suggest_duplicate(&self, part_number: &str) -> Result<Option<Suggestion>> {
        Ok(commands::add::suggest(&*self.lock()?, part_number))
    }

    pub fn merge_counts(&self, target: &str, count: i64) -> Result<AddOutcome> {
        commands::add::merge_counts(&mut *self.lock()?, target, count)
    }

    pub fn edit_component(&self, index: usize, updated: Component) -> Result<()> {
        commands::edit::run(&mut *self.lock()?, index, updated)
    }

    pub fn delete_component(&self, index: usize) -> Result<Component> {
        commands::delete::run(&mut *self.lock()?, index)
    }

    pub fn undo_delete(&self) -> Result<bool> {
        commands::delete::undo(&mut *self.lock()?)
    }

    pub fn get_all_components(&self) -> Result<Vec<Component>> {
        Ok(self.lock()?.components().to_vec())
    }

    pub fn search_components(&self, query: &str) -> Result<Vec<Component>> {
        Ok(commands::search::run(&*self.lock()?, query))
    }

    pub fn get_statistics(&self) -> Result<Statistics> {
        Ok(commands::stats::statistics(&*self.lock()?))
    }

    pub fn get_low_stock(&self) -> Result<Vec<Component>> {
        Ok(commands::stats::low_stock(&*self.lock()?))
    }

    pub fn checkout(&self, part_number: &str, qty: i64) -> Result<CheckoutReceipt> {
        commands::checkout::run(&mut *self.lock()?, part_number, qty)
    }

    pub fn process_bom_out(&self, rows: &[BomRow], board: &str) -> Result<Vec<BomRowResult>> {
        commands::bom::process_out(&mut *self.lock()?, rows, board)
    }

    pub fn process_returned_vials(
        &self,
        rows: &[BomRow],
        adjustments: &HashMap<String, i64>,
    ) -> Result<Vec<BomRowResult>> {
        commands::bom::process_returned(&mut *self.lock()?, rows, adjustments)
    }

    /// Run one backup immediately, regardless of the idle gate.
    pub fn backup_now(&self) -> Result<Option<std::path::PathBuf>> {
        backup::run_backup(&*self.lock()?)
    }

    // --- strip ---

    pub fn bus(&self) -> &Arc<LedBus> {
        self.highlighter.bus()
    }

    pub fn highlight(&self, code: &str, delay: Duration) -> u64 {
        self.highlighter.highlight(code, delay)
    }

    pub fn highlight_many(&self, codes: &[String], stagger: Duration) -> JoinHandle<()> {
        self.highlighter.highlight_many(codes, stagger)
    }

    pub fn set_led(&self, code: &str, r: u8, g: u8, b: u8) -> SetOutcome {
        self.bus().set(code, r, g, b)
    }

    pub fn turn_off_led(&self, code: &str) -> SetOutcome {
        self.bus().off(code)
    }

    pub fn clear_recent(&self) -> SetOutcome {
        self.bus().clear_recent()
    }

    pub fn clear_all(&self) -> SetOutcome {
        self.bus().clear_all()
    }
}

impl<S: CatalogueStore + Send + 'static> PartbinApi<S> {
    /// Start the periodic backup loop alongside this facade.
    pub fn with_backup(mut self, interval: Duration, idle_cutoff: Duration) -> Self {
        self.backup = Some(backup::spawn(
            Arc::clone(&self.catalogue),
            interval,
            idle_cutoff,
        ));
        self
    }

    /// Stop the backup loop (if running) and join it.
    pub fn shutdown(mut self) {
        if let Some(handle) = self.backup.take() {
            handle.stop();
        }
    }
}
