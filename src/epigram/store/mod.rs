//! # Storage Layer
//!
//! Client-side persistence is modelled on browser local storage: a flat map
//! of string keys to string values. The [`DataStore`] trait keeps the rest of
//! the crate unaware of where those strings live.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, a single `storage.json` object
//!   in the data directory.
//! - [`memory::InMemoryStore`]: no persistence, for tests.
//!
//! ## Keys
//!
//! ```text
//! storage.json
//! ├── searchHistory   # JSON-encoded list of terms, most recent first
//! └── accessToken     # bearer token of the signed-in user
//! ```
//!
//! Values are stored as strings, exactly like local storage, so the history
//! list is JSON inside JSON. Typed access goes through [`SearchHistoryStore`]
//! and the token helpers below.

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const SEARCH_HISTORY_KEY: &str = "searchHistory";
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Abstract key/value storage.
pub trait DataStore {
    /// Read a value; `Ok(None)` when the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Typed access to the persisted search history slot.
pub trait SearchHistoryStore {
    fn load_history(&self) -> Vec<String>;
    fn save_history(&mut self, history: &[String]) -> Result<()>;
    fn clear_history(&mut self) -> Result<()>;
}

impl<S: DataStore> SearchHistoryStore for S {
    /// Unreadable or malformed history is treated as empty.
    fn load_history(&self) -> Vec<String> {
        let raw = match self.get_item(SEARCH_HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read search history: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Ignoring malformed search history: {}", e);
                Vec::new()
            }
        }
    }

    fn save_history(&mut self, history: &[String]) -> Result<()> {
        let encoded = serde_json::to_string(history)?;
        self.set_item(SEARCH_HISTORY_KEY, &encoded)
    }

    fn clear_history(&mut self) -> Result<()> {
        self.remove_item(SEARCH_HISTORY_KEY)
    }
}

pub fn access_token<S: DataStore>(store: &S) -> Result<Option<String>> {
    store.get_item(ACCESS_TOKEN_KEY)
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryStore;
    use super::*;

    #[test]
    fn history_round_trips_through_string_slot() {
        let mut store = InMemoryStore::new();
        store
            .save_history(&["foo".to_string(), "bar".to_string()])
            .unwrap();

        let raw = store.get_item(SEARCH_HISTORY_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"["foo","bar"]"#);
        assert_eq!(store.load_history(), vec!["foo", "bar"]);
    }

    #[test]
    fn malformed_history_loads_as_empty() {
        let mut store = InMemoryStore::new();
        store.set_item(SEARCH_HISTORY_KEY, "{not json").unwrap();
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn clear_removes_the_key() {
        let mut store = InMemoryStore::new();
        store.save_history(&["foo".to_string()]).unwrap();
        store.clear_history().unwrap();
        assert_eq!(store.get_item(SEARCH_HISTORY_KEY).unwrap(), None);
    }
}
