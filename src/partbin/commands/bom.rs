use std::collections::HashMap;

use crate::catalogue::Catalogue;
use crate::commands::{BomRowResult, BomStatus};
use crate::error::Result;
use crate::model::{normalize_part_number, BomRow};
use crate::store::CatalogueStore;

/// Consume stock for a build: subtract each row's quantity and tag the
/// component as in use for `board`.
///
/// Row-level outcomes, never a batch abort: rows the BOM reader could not
/// resolve (`found == false`, or a part that has since vanished) come back
/// `NotFound`; rows with too little stock come back `OutOfStock` with the
/// count untouched. One persist covers the whole batch.
pub fn process_out<S: CatalogueStore>(
    cat: &mut Catalogue<S>,
    rows: &[BomRow],
    board: &str,
) -> Result<Vec<BomRowResult>> {
    let mut results = Vec::with_capacity(rows.len());

    for row in rows {
        let key = normalize_part_number(&row.digikey);
        let index = if row.found { cat.find_index(&key) } else { None };

        let Some(index) = index else {
            results.push(BomRowResult {
                part: row.digikey.clone(),
                remaining: None,
                status: BomStatus::NotFound,
                adjustment: None,
            });
            continue;
        };

        let comp = &mut cat.components_mut()[index];
        let current = comp.part_info.count;
        if current < row.quantity {
            results.push(BomRowResult {
                part: row.digikey.clone(),
                remaining: Some(current),
                status: BomStatus::OutOfStock,
                adjustment: None,
            });
            continue;
        }

        comp.part_info.count = current - row.quantity;
        comp.metadata.in_use = Some(format!("Used for {board}"));
        results.push(BomRowResult {
            part: row.digikey.clone(),
            remaining: Some(comp.part_info.count),
            status: BomStatus::Updated,
            adjustment: None,
        });
    }

    cat.persist(&format!("Consumed BOM for '{board}'."))?;
    Ok(results)
}

/// Settle a checkout after the vials come back.
///
/// `adjustments` maps part numbers to a signed count delta, applied
/// verbatim — whether a return credits or debits is the caller's call.
/// Every matched row has its `in_use` tag cleared (available again).
pub fn process_returned<S: CatalogueStore>(
    cat: &mut Catalogue<S>,
    rows: &[BomRow],
    adjustments: &HashMap<String, i64>,
) -> Result<Vec<BomRowResult>> {
    let mut results = Vec::with_capacity(rows.len());

    for row in rows {
        let key = normalize_part_number(&row.digikey);
        let delta = adjustments.get(&row.digikey).copied().unwrap_or(0);

        let Some(index) = cat.find_index(&key) else {
            results.push(BomRowResult {
                part: row.digikey.clone(),
                remaining: None,
                status: BomStatus::NotFound,
                adjustment: Some(delta),
            });
            continue;
        };

        let comp = &mut cat.components_mut()[index];
        comp.part_info.count += delta;
        comp.metadata.in_use = None;
        results.push(BomRowResult {
            part: row.digikey.clone(),
            remaining: Some(comp.part_info.count),
            status: BomStatus::Returned,
            adjustment: Some(delta),
        });
    }

    cat.persist("Processed returned vials.")?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::Component;
    use crate::store::memory::InMemoryStore;

    fn row(digikey: &str, quantity: i64, found: bool) -> BomRow {
        BomRow {
            digikey: digikey.to_string(),
            quantity,
            found,
            location: None,
            current_count: None,
        }
    }

    fn catalogue_with(part: &str, count: i64) -> Catalogue<InMemoryStore> {
        let mut cat = Catalogue::open(InMemoryStore::new(), 300).unwrap();
        add::run(&mut cat, Component::new(part, count)).unwrap();
        cat
    }

    #[test]
    fn subtracts_and_tags_in_use() {
        let mut cat = catalogue_with("abc-123", 10);
        let results = process_out(&mut cat, &[row("ABC-123", 2, true)], "rev-b board").unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, BomStatus::Updated);
        assert_eq!(results[0].remaining, Some(8));
        assert_eq!(cat.components()[0].part_info.count, 8);
        assert_eq!(
            cat.components()[0].metadata.in_use.as_deref(),
            Some("Used for rev-b board")
        );
    }

    #[test]
    fn short_stock_is_skipped_not_drained() {
        let mut cat = catalogue_with("abc-123", 1);
        let results = process_out(&mut cat, &[row("abc-123", 2, true)], "board").unwrap();

        assert_eq!(results[0].status, BomStatus::OutOfStock);
        assert_eq!(results[0].remaining, Some(1));
        assert_eq!(cat.components()[0].part_info.count, 1);
        assert!(cat.components()[0].metadata.in_use.is_none());
    }

    #[test]
    fn unresolved_rows_do_not_stop_the_batch() {
        let mut cat = catalogue_with("abc-123", 10);
        let rows = [
            row("ghost", 1, false),
            row("abc-123", 3, true),
            row("also-missing", 1, true),
        ];
        let results = process_out(&mut cat, &rows, "board").unwrap();

        assert_eq!(results[0].status, BomStatus::NotFound);
        assert_eq!(results[1].status, BomStatus::Updated);
        assert_eq!(results[1].remaining, Some(7));
        assert_eq!(results[2].status, BomStatus::NotFound);
    }

    #[test]
    fn returns_apply_signed_delta_and_clear_in_use() {
        let mut cat = catalogue_with("abc-123", 10);
        process_out(&mut cat, &[row("abc-123", 4, true)], "board").unwrap();
        assert_eq!(cat.components()[0].part_info.count, 6);

        // caller decided: two vials came back unused
        let mut adjustments = HashMap::new();
        adjustments.insert("abc-123".to_string(), 2);
        let results =
            process_returned(&mut cat, &[row("abc-123", 4, true)], &adjustments).unwrap();

        assert_eq!(results[0].status, BomStatus::Returned);
        assert_eq!(results[0].adjustment, Some(2));
        assert_eq!(cat.components()[0].part_info.count, 8);
        assert!(cat.components()[0].metadata.in_use.is_none());
    }

    #[test]
    fn negative_delta_debits_further() {
        let mut cat = catalogue_with("abc-123", 10);
        let mut adjustments = HashMap::new();
        adjustments.insert("abc-123".to_string(), -3);
        process_returned(&mut cat, &[row("abc-123", 0, true)], &adjustments).unwrap();
        assert_eq!(cat.components()[0].part_info.count, 7);
    }

    #[test]
    fn returned_row_for_unknown_part_reports_not_found() {
        let mut cat = catalogue_with("abc-123", 10);
        let results = process_returned(&mut cat, &[row("ghost", 0, true)], &HashMap::new()).unwrap();
        assert_eq!(results[0].status, BomStatus::NotFound);
        assert_eq!(results[0].remaining, None);
    }
}
