//! Seams for the external collaborators the core consumes.
//!
//! The vendor lookup client (OAuth token lifecycle, HTTP) and the BOM
//! file reader (CSV dialect handling) live outside this crate; the core
//! only sees these two contracts.

use crate::error::Result;
use crate::model::{BomRow, Component};

/// Vendor parts lookup: resolve a part number (e.g. scanned off a reel
/// label) into a catalogue-shaped record, or `None` when the vendor does
/// not know it.
pub trait PartsLookup {
    fn fetch(&self, part_number: &str) -> Result<Option<Component>>;
}

/// Produces the rows of one bill of materials, already annotated against
/// the catalogue (`found`, `location`, `current_count`).
pub trait BomSource {
    fn rows(&self) -> Result<Vec<BomRow>>;
}
