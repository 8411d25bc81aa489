use super::CatalogueStore;
use crate::error::Result;
use crate::model::Component;
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileStore {
    catalogue_file: PathBuf,
    changelog_file: PathBuf,
}

impl FileStore {
    pub fn new(catalogue_file: PathBuf, changelog_file: PathBuf) -> Self {
        Self {
            catalogue_file,
            changelog_file,
        }
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl CatalogueStore for FileStore {
    fn load(&self) -> Result<Vec<Component>> {
        if !self.catalogue_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.catalogue_file)?;
        let components: Vec<Component> = serde_json::from_str(&content)?;
        Ok(components)
    }

    fn save(&mut self, components: &[Component]) -> Result<()> {
        Self::ensure_parent(&self.catalogue_file)?;
        let content = serde_json::to_string_pretty(components)?;
        fs::write(&self.catalogue_file, content)?;
        Ok(())
    }

    fn append_changelog(&mut self, message: &str) -> Result<()> {
        Self::ensure_parent(&self.changelog_file)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.changelog_file)?;
        writeln!(file, "{} - {}", Local::now().to_rfc3339(), message)?;
        Ok(())
    }

    fn catalogue_path(&self) -> Option<&Path> {
        Some(&self.catalogue_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    fn store_in(dir: &Path) -> FileStore {
        FileStore::new(dir.join("catalogue.json"), dir.join("changelog.txt"))
    }

    #[test]
    fn missing_catalogue_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        let mut comp = Component::new("abc-123", 10);
        comp.part_info.location = Some("1A".to_string());
        store.save(&[comp]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].part_info.part_number, "abc-123");
        assert_eq!(loaded[0].part_info.location.as_deref(), Some("1A"));
    }

    #[test]
    fn save_rewrites_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        store
            .save(&[Component::new("old", 1), Component::new("older", 2)])
            .unwrap();
        store.save(&[Component::new("current", 3)]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].part_info.part_number, "current");
    }

    #[test]
    fn changelog_lines_are_timestamped_and_append_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        store.append_changelog("first").unwrap();
        store.append_changelog("second").unwrap();

        let log = fs::read_to_string(dir.path().join("changelog.txt")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" - first"));
        assert!(lines[1].contains(" - second"));
    }

    #[test]
    fn corrupt_catalogue_surfaces_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("catalogue.json"), "{not json").unwrap();
        let store = store_in(dir.path());
        assert!(store.load().is_err());
    }
}
