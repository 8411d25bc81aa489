use crate::catalogue::Catalogue;
use crate::commands::{move_to_front, AddOutcome, Suggestion};
use crate::error::{PartbinError, Result};
use crate::location;
use crate::model::{normalize_part_number, Component};
use crate::similarity;
use crate::store::CatalogueStore;

/// Cutoff below which a near match is not worth suggesting.
const SUGGESTION_CUTOFF: f64 = 0.8;

/// Add a component to the catalogue.
///
/// An empty location gets the first free bin. An explicit location that is
/// already taken aborts with `LocationConflict`, unless the code contains
/// `"bin"` — those labels are shared by design and may hold several parts.
/// An exact duplicate (same normalized part number) merges counts into the
/// existing record instead of creating a second one.
pub fn run<S: CatalogueStore>(
    cat: &mut Catalogue<S>,
    mut component: Component,
) -> Result<AddOutcome> {
    let key = component.normalized_part_number();
    if key.is_empty() {
        return Err(PartbinError::Validation(
            "Part number is required".to_string(),
        ));
    }

    let requested = component
        .part_info
        .location
        .as_deref()
        .map(str::trim)
        .filter(|loc| !loc.is_empty())
        .map(str::to_uppercase);

    match requested {
        None => {
            let free = location::assign_location(&cat.assigned_locations(), cat.max_bins())
                .ok_or(PartbinError::NoFreeSlot)?;
            component.part_info.location = Some(free);
        }
        Some(loc) => {
            let taken = cat.assigned_locations().contains(&loc);
            if taken && !loc.to_lowercase().contains("bin") {
                return Err(PartbinError::LocationConflict(loc));
            }
            component.part_info.location = Some(loc);
        }
    }

    if let Some(index) = cat.find_index(&key) {
        let added = component.part_info.count;
        let existing = &mut cat.components_mut()[index];
        let old_count = existing.part_info.count;
        existing.part_info.count = old_count + added;
        let new_count = existing.part_info.count;
        let part_number = existing.part_info.part_number.clone();
        let merged_location = existing.part_info.location.clone();
        move_to_front(cat.components_mut(), index);
        cat.persist(&format!(
            "Updated component '{part_number}' count from {old_count} to {new_count} (exact duplicate)."
        ))?;
        return Ok(AddOutcome::Merged {
            part_number,
            new_count,
            location: merged_location,
        });
    }

    let location = component.part_info.location.clone();
    let part_number = component.part_info.part_number.clone();
    cat.components_mut().insert(0, component);
    cat.persist(&format!(
        "Added component '{part_number}' at {}.",
        location.as_deref().unwrap_or("?")
    ))?;
    Ok(AddOutcome::Added { location })
}

/// Best near-duplicate for `part_number` among the stored records, if any
/// scores at least the cutoff. Exact matches are skipped — `run` already
/// merges those without asking.
pub fn suggest<S: CatalogueStore>(cat: &Catalogue<S>, part_number: &str) -> Option<Suggestion> {
    let key = normalize_part_number(part_number);
    if key.is_empty() {
        return None;
    }
    let stored: Vec<String> = cat
        .components()
        .iter()
        .map(Component::normalized_part_number)
        .filter(|candidate| !candidate.is_empty() && *candidate != key)
        .collect();

    similarity::best_match(&key, stored.iter().map(String::as_str), SUGGESTION_CUTOFF).map(
        |m| Suggestion {
            part_number: m.candidate,
            score: m.score,
        },
    )
}

/// Accept a suggestion: fold `count` units into the record identified by
/// `target` and move it to the front of the list.
pub fn merge_counts<S: CatalogueStore>(
    cat: &mut Catalogue<S>,
    target: &str,
    count: i64,
) -> Result<AddOutcome> {
    let key = normalize_part_number(target);
    let index = cat
        .find_index(&key)
        .ok_or_else(|| PartbinError::NotFound(target.to_string()))?;

    let existing = &mut cat.components_mut()[index];
    let old_count = existing.part_info.count;
    existing.part_info.count = old_count + count;
    let new_count = existing.part_info.count;
    let part_number = existing.part_info.part_number.clone();
    let merged_location = existing.part_info.location.clone();
    move_to_front(cat.components_mut(), index);
    cat.persist(&format!(
        "Updated component '{part_number}' count from {old_count} to {new_count} (matched suggestion)."
    ))?;
    Ok(AddOutcome::Merged {
        part_number,
        new_count,
        location: merged_location,
    })
}
