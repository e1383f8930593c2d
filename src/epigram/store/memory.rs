use super::DataStore;
use crate::error::{EpigramError, Result};
use std::collections::HashMap;

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: HashMap<String, String>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl DataStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(EpigramError::Store("Simulated write error".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(EpigramError::Store("Simulated write error".to_string()));
        }
        self.items.remove(key);
        Ok(())
    }
}
