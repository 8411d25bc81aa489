use crate::catalogue::Catalogue;
use crate::error::{PartbinError, Result};
use crate::model::Component;
use crate::store::CatalogueStore;

/// Remove the component at `index`, keeping a snapshot on the undo stack.
/// Returns the removed component.
pub fn run<S: CatalogueStore>(cat: &mut Catalogue<S>, index: usize) -> Result<Component> {
    if index >= cat.components().len() {
        return Err(PartbinError::NotFound(format!(
            "No component at index {index}"
        )));
    }
    let removed = cat.components_mut().remove(index);
    cat.push_undo((removed.clone(), index));
    cat.persist(&format!(
        "Deleted component at index {index} (part number: {}).",
        removed.part_info.part_number
    ))?;
    Ok(removed)
}

/// Restore the most recently deleted component at its original index, or
/// append it when the list has since shrunk past that index. Returns
/// `false` when there is nothing to undo.
pub fn undo<S: CatalogueStore>(cat: &mut Catalogue<S>) -> Result<bool> {
    let Some((component, index)) = cat.pop_undo() else {
        return Ok(false);
    };
    let part_number = component.part_info.part_number.clone();
    if index >= cat.components().len() {
        cat.components_mut().push(component);
    } else {
        cat.components_mut().insert(index, component);
    }
    cat.persist(&format!(
        "Restored component at index {index} (part number: {part_number})."
    ))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::memory::InMemoryStore;

    fn catalogue_with(parts: &[&str]) -> Catalogue<InMemoryStore> {
        let mut cat = Catalogue::open(InMemoryStore::new(), 300).unwrap();
        // add inserts at the front, so feed in reverse to keep test order
        for part in parts.iter().rev() {
            add::run(&mut cat, Component::new(*part, 1)).unwrap();
        }
        cat
    }

    #[test]
    fn delete_then_undo_restores_original_position() {
        let mut cat = catalogue_with(&["a", "b", "c"]);
        let removed = run(&mut cat, 1).unwrap();
        assert_eq!(removed.part_info.part_number, "b");
        assert_eq!(cat.components().len(), 2);

        assert!(undo(&mut cat).unwrap());
        let order: Vec<&str> = cat
            .components()
            .iter()
            .map(|comp| comp.part_info.part_number.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn undo_appends_when_index_out_of_range() {
        let mut cat = catalogue_with(&["a", "b", "c"]);
        run(&mut cat, 2).unwrap(); // delete "c" (snapshot index 2)
        run(&mut cat, 0).unwrap(); // delete "a"
        run(&mut cat, 0).unwrap(); // delete "b" — list now empty

        assert!(undo(&mut cat).unwrap()); // "b" back at 0
        assert!(undo(&mut cat).unwrap()); // "a" back at 0
        assert!(undo(&mut cat).unwrap()); // "c" wanted index 2 == len, appended
        let order: Vec<&str> = cat
            .components()
            .iter()
            .map(|comp| comp.part_info.part_number.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn undo_on_empty_stack_returns_false() {
        let mut cat = catalogue_with(&["a"]);
        assert!(!undo(&mut cat).unwrap());
    }

    #[test]
    fn deletes_are_undone_lifo() {
        let mut cat = catalogue_with(&["a", "b"]);
        run(&mut cat, 0).unwrap();
        run(&mut cat, 0).unwrap();
        assert_eq!(cat.undo_depth(), 2);

        assert!(undo(&mut cat).unwrap());
        assert_eq!(cat.components()[0].part_info.part_number, "b");
    }

    #[test]
    fn delete_rejects_bad_index() {
        let mut cat = catalogue_with(&["a"]);
        assert!(matches!(
            run(&mut cat, 9).unwrap_err(),
            PartbinError::NotFound(_)
        ));
    }
}
