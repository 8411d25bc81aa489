use super::CatalogueStore;
use crate::error::{PartbinError, Result};
use crate::model::Component;

/// In-memory store for tests. Saved components and appended changelog
/// lines can both be inspected; `fail_next_save` forces the next save to
/// error so persistence-failure paths can be exercised.
#[derive(Default)]
pub struct InMemoryStore {
    components: Vec<Component>,
    pub changelog: Vec<String>,
    fail_next_save: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }

    pub fn saved(&self) -> &[Component] {
        &self.components
    }
}

impl CatalogueStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Component>> {
        Ok(self.components.clone())
    }

    fn save(&mut self, components: &[Component]) -> Result<()> {
        if self.fail_next_save {
            self.fail_next_save = false;
            return Err(PartbinError::Store("simulated save failure".to_string()));
        }
        self.components = components.to_vec();
        Ok(())
    }

    fn append_changelog(&mut self, message: &str) -> Result<()> {
        self.changelog.push(message.to_string());
        Ok(())
    }
}
