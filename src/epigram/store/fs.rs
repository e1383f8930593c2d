use super::DataStore;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const STORAGE_FILENAME: &str = "storage.json";

/// File-backed key/value storage.
///
/// The whole map is read on every access and rewritten on every change;
/// it only ever holds a handful of keys.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn storage_file(&self) -> PathBuf {
        self.root.join(STORAGE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let path = self.storage_file();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        let items = serde_json::from_str(&content)?;
        Ok(items)
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(items)?;
        // Write to a sibling then rename so a crash never leaves half a file
        let tmp = self.root.join(format!("{}.tmp", STORAGE_FILENAME));
        fs::write(&tmp, content)?;
        fs::rename(tmp, self.storage_file())?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}
