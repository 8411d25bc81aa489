use std::collections::BTreeSet;

use crate::catalogue::Catalogue;
use crate::commands::Statistics;
use crate::model::Component;
use crate::store::CatalogueStore;

pub fn statistics<S: CatalogueStore>(cat: &Catalogue<S>) -> Statistics {
    let types: BTreeSet<String> = cat
        .components()
        .iter()
        .filter_map(|comp| comp.part_info.part_type.clone())
        .collect();
    Statistics {
        total_parts: cat.components().len(),
        types: types.into_iter().collect(),
    }
}

/// Components whose count has dropped below their low-stock threshold.
/// Components without a threshold are never flagged.
pub fn low_stock<S: CatalogueStore>(cat: &Catalogue<S>) -> Vec<Component> {
    cat.components()
        .iter()
        .filter(|comp| {
            comp.metadata
                .low_stock
                .map(|threshold| comp.part_info.count < threshold)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn counts_parts_and_distinct_types() {
        let mut cat = Catalogue::open(InMemoryStore::new(), 300).unwrap();
        let mut a = Component::new("a", 1);
        a.part_info.part_type = Some("resistor".to_string());
        let mut b = Component::new("b", 1);
        b.part_info.part_type = Some("resistor".to_string());
        let mut c = Component::new("c", 1);
        c.part_info.part_type = Some("capacitor".to_string());
        for comp in [a, b, c] {
            add::run(&mut cat, comp).unwrap();
        }

        let stats = statistics(&cat);
        assert_eq!(stats.total_parts, 3);
        assert_eq!(stats.types, vec!["capacitor", "resistor"]);
    }

    #[test]
    fn flags_only_parts_below_their_threshold() {
        let mut cat = Catalogue::open(InMemoryStore::new(), 300).unwrap();
        let mut low = Component::new("low", 2);
        low.metadata.low_stock = Some(5);
        let mut ok = Component::new("ok", 50);
        ok.metadata.low_stock = Some(5);
        let no_threshold = Component::new("untracked", 0);
        for comp in [low, ok, no_threshold] {
            add::run(&mut cat, comp).unwrap();
        }

        let flagged = low_stock(&cat);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].part_info.part_number, "low");
    }
}
