use crate::catalogue::Catalogue;
use crate::commands::CheckoutReceipt;
use crate::error::{PartbinError, Result};
use crate::model::normalize_part_number;
use crate::store::CatalogueStore;

/// Debit `qty` units from the component with `part_number`.
///
/// Fails without mutating on an unknown part, a non-positive quantity, or
/// a quantity larger than the stock on hand.
pub fn run<S: CatalogueStore>(
    cat: &mut Catalogue<S>,
    part_number: &str,
    qty: i64,
) -> Result<CheckoutReceipt> {
    let key = normalize_part_number(part_number);
    let index = cat
        .find_index(&key)
        .ok_or_else(|| PartbinError::NotFound(part_number.to_string()))?;

    if qty <= 0 {
        return Err(PartbinError::Validation(
            "Quantity must be positive".to_string(),
        ));
    }

    let current = cat.components()[index].part_info.count;
    if qty > current {
        return Err(PartbinError::OutOfStock {
            part: part_number.to_string(),
            available: current,
        });
    }

    let comp = &mut cat.components_mut()[index];
    comp.part_info.count = current - qty;
    let new_count = comp.part_info.count;
    let location = comp.part_info.location.clone();
    cat.persist(&format!(
        "Checked out {qty} x '{part_number}'. New count: {new_count}."
    ))?;

    Ok(CheckoutReceipt {
        new_count,
        location,
    })
}
