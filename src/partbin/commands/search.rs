use crate::catalogue::Catalogue;
use crate::model::Component;
use crate::store::CatalogueStore;

/// Case-insensitive substring search across every part and metadata field.
pub fn run<S: CatalogueStore>(cat: &Catalogue<S>, query: &str) -> Vec<Component> {
    let needle = query.to_lowercase();
    cat.components()
        .iter()
        .filter(|comp| matches(comp, &needle))
        .cloned()
        .collect()
}

fn matches(comp: &Component, needle: &str) -> bool {
    let info = &comp.part_info;
    let meta = &comp.metadata;

    let text_fields = [
        Some(info.part_number.as_str()),
        info.manufacturer_number.as_deref(),
        info.location.as_deref(),
        info.part_type.as_deref(),
        meta.price.as_deref(),
        meta.description.as_deref(),
        meta.photo_url.as_deref(),
        meta.datasheet_url.as_deref(),
        meta.product_url.as_deref(),
        meta.in_use.as_deref(),
    ];

    text_fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
        || info.count.to_string().contains(needle)
        || meta
            .low_stock
            .map(|v| v.to_string().contains(needle))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::memory::InMemoryStore;

    fn sample_catalogue() -> Catalogue<InMemoryStore> {
        let mut cat = Catalogue::open(InMemoryStore::new(), 300).unwrap();
        let mut resistor = Component::new("RES-10K", 100);
        resistor.metadata.description = Some("10k pull-up resistor".to_string());
        add::run(&mut cat, resistor).unwrap();

        let mut cap = Component::new("CAP-100N", 40);
        cap.part_info.part_type = Some("capacitor".to_string());
        add::run(&mut cat, cap).unwrap();
        cat
    }

    #[test]
    fn matches_part_number_case_insensitively() {
        let cat = sample_catalogue();
        let hits = run(&cat, "res-10");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].part_info.part_number, "RES-10K");
    }

    #[test]
    fn matches_metadata_fields() {
        let cat = sample_catalogue();
        assert_eq!(run(&cat, "pull-up").len(), 1);
        assert_eq!(run(&cat, "capacitor").len(), 1);
    }

    #[test]
    fn no_hits_for_unrelated_query() {
        let cat = sample_catalogue();
        assert!(run(&cat, "inductor").is_empty());
    }
}
