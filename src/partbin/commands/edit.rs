use crate::catalogue::Catalogue;
use crate::error::{PartbinError, Result};
use crate::model::Component;
use crate::store::CatalogueStore;

/// Replace the component at `index` with `updated` and persist.
pub fn run<S: CatalogueStore>(
    cat: &mut Catalogue<S>,
    index: usize,
    updated: Component,
) -> Result<()> {
    if index >= cat.components().len() {
        return Err(PartbinError::NotFound(format!(
            "No component at index {index}"
        )));
    }
    let old_part = cat.components()[index].part_info.part_number.clone();
    cat.components_mut()[index] = updated;
    cat.persist(&format!(
        "Edited component at index {index} (part number: {old_part})."
    ))
}
