//! Periodic catalogue backups.
//!
//! One loop with an explicit stop signal, not a chain of one-shot timers:
//! shutdown is a send on the stop channel followed by a join, and cannot
//! be lost to a reschedule that never fires. Backups pause while the
//! catalogue is idle and resume on the next mutation.

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;

use crate::catalogue::Catalogue;
use crate::error::Result;
use crate::store::CatalogueStore;

/// Handle to a running backup loop. Dropping it without calling
/// [`BackupHandle::stop`] also ends the loop (the channel disconnects),
/// but `stop` additionally joins the thread.
pub struct BackupHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl BackupHandle {
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.thread.join();
    }
}

/// Start the backup loop. Every `interval` it copies the catalogue file
/// aside, unless no mutation has been persisted within `idle_cutoff`.
pub fn spawn<S>(
    catalogue: Arc<Mutex<Catalogue<S>>>,
    interval: Duration,
    idle_cutoff: Duration,
) -> BackupHandle
where
    S: CatalogueStore + Send + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel();
    let thread = thread::spawn(move || loop {
        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
        let Ok(cat) = catalogue.lock() else {
            log::warn!("catalogue lock poisoned, backup loop exiting");
            break;
        };
        if cat.idle_for() > idle_cutoff {
            log::debug!("catalogue idle, skipping backup");
            continue;
        }
        match run_backup(&cat) {
            Ok(Some(path)) => log::info!("backup created: {}", path.display()),
            Ok(None) => {}
            Err(err) => log::warn!("backup failed: {err}"),
        }
    });
    BackupHandle { stop_tx, thread }
}

/// Copy the catalogue file into a `backups/` folder next to it, stamped
/// `<name>_<YYYYmmdd_HHMMSS><ext>`. Returns `None` for stores without a
/// file (nothing to back up) or when the file does not exist yet.
pub fn run_backup<S: CatalogueStore>(cat: &Catalogue<S>) -> Result<Option<PathBuf>> {
    let Some(source) = cat.store().catalogue_path() else {
        return Ok(None);
    };
    if !source.exists() {
        return Ok(None);
    }

    let parent = source.parent().unwrap_or_else(|| std::path::Path::new("."));
    let backup_dir = parent.join("backups");
    std::fs::create_dir_all(&backup_dir)?;

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("catalogue");
    let ext = source
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let target = backup_dir.join(format!("{stem}_{stamp}{ext}"));

    std::fs::copy(source, &target)?;
    Ok(Some(target))
}
