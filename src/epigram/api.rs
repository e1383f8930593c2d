//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every epigram operation, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Owns** the content source, the store, the config and the live
//!   [`SearchSession`]
//! - **Dispatches** to the matching `commands/*.rs` function
//! - **Normalizes inputs** (1-based display indexes to 0-based positions)
//! - **Returns structured types** ([`CmdResult`]), never strings
//!
//! No stdout, no formatting, no business logic here.
//!
//! ## Generic Over Both Seams
//!
//! `EpigramApi<C: ContentSource, S: DataStore>`:
//! - Production: `EpigramApi<HttpClient, FileStore>`
//! - Testing: `EpigramApi<InMemorySource, InMemoryStore>`
//!
//! API tests check dispatch and argument handling only; command behaviour is
//! tested in the command modules.

use crate::client::ContentSource;
use crate::commands::config::ConfigAction;
use crate::commands::search::{self, SearchSession};
use crate::commands::{self, CmdMessage, CmdResult, EpigramPaths};
use crate::config::EpigramConfig;
use crate::error::{EpigramError, Result};
use crate::store::DataStore;
use crate::validation::FormValues;

pub struct EpigramApi<C: ContentSource, S: DataStore> {
    source: C,
    store: S,
    config: EpigramConfig,
    paths: EpigramPaths,
    session: SearchSession,
}

impl<C: ContentSource, S: DataStore> EpigramApi<C, S> {
    /// Build the facade; the search session starts from the persisted history.
    pub fn new(source: C, store: S, config: EpigramConfig, paths: EpigramPaths) -> Self {
        let session = SearchSession::load(&store, config.page_size);
        Self {
            source,
            store,
            config,
            paths,
            session,
        }
    }

    pub fn config(&self) -> &EpigramConfig {
        &self.config
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn search(&mut self, term: &str) -> CmdResult {
        search::run(
            &self.source,
            &mut self.store,
            &mut self.session,
            &self.config,
            term,
        )
        .await
    }

    pub fn load_more(&mut self) -> CmdResult {
        let revealed = self.session.load_more().len();
        let mut result = search::displayed_result(&self.session);
        if revealed == 0 {
            result.add_message(CmdMessage::info("No more results."));
        }
        result
    }

    pub fn history(&self) -> CmdResult {
        commands::history::list(&self.session)
    }

    pub fn clear_history(&mut self) -> Result<CmdResult> {
        commands::history::clear(&mut self.store, &mut self.session)
    }

    /// Re-run a history entry by its 1-based display index.
    pub async fn search_history_entry(&mut self, display_index: usize) -> Result<CmdResult> {
        let index = display_index
            .checked_sub(1)
            .ok_or_else(|| EpigramError::Validation("History index starts at 1".to_string()))?;
        Ok(commands::history::rerun(
            &self.source,
            &mut self.store,
            &mut self.session,
            &self.config,
            index,
        )
        .await)
    }

    pub async fn list_epigrams(&self) -> CmdResult {
        commands::cards::list(&self.source).await
    }

    pub async fn today(&self) -> CmdResult {
        commands::cards::today(&self.source).await
    }

    pub async fn show(&self, id: u64) -> CmdResult {
        commands::cards::show(&self.source, id).await
    }

    pub async fn sign_up(&mut self, values: FormValues, dry_run: bool) -> Result<CmdResult> {
        commands::auth::sign_up(&self.source, &mut self.store, values, dry_run).await
    }

    pub async fn sign_in(&mut self, values: FormValues, dry_run: bool) -> Result<CmdResult> {
        commands::auth::sign_in(&self.source, &mut self.store, values, dry_run).await
    }

    pub fn sign_out(&mut self) -> Result<CmdResult> {
        commands::auth::sign_out(&mut self.store)
    }

    pub async fn create_epigram(
        &self,
        values: FormValues,
        tags: &str,
        dry_run: bool,
    ) -> Result<CmdResult> {
        commands::write::create_epigram(&self.source, &self.store, values, tags, dry_run).await
    }

    pub fn config_action(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemorySource;
    use crate::model::Epigram;
    use crate::store::memory::InMemoryStore;
    use crate::store::SearchHistoryStore;

    fn make_api(epigrams: Vec<Epigram>) -> EpigramApi<InMemorySource, InMemoryStore> {
        make_api_with_store(epigrams, InMemoryStore::new())
    }

    fn make_api_with_store(
        epigrams: Vec<Epigram>,
        store: InMemoryStore,
    ) -> EpigramApi<InMemorySource, InMemoryStore> {
        EpigramApi::new(
            InMemorySource::new(epigrams),
            store,
            EpigramConfig::default(),
            EpigramPaths {
                data: std::env::temp_dir(),
            },
        )
    }

    fn numbered(n: u64) -> Vec<Epigram> {
        (1..=n)
            .map(|i| Epigram::new(i, format!("abc {}", i), "x"))
            .collect()
    }

    #[test]
    fn new_loads_persisted_history() {
        let mut store = InMemoryStore::new();
        store.save_history(&["saved".to_string()]).unwrap();
        let api = make_api_with_store(Vec::new(), store);
        assert_eq!(api.history().history, vec!["saved"]);
    }

    #[tokio::test]
    async fn search_then_load_more() {
        let mut api = make_api(numbered(12));

        let first = api.search("abc").await;
        assert_eq!(first.listed.len(), 5);
        assert!(first.page.as_ref().unwrap().has_more());

        assert_eq!(api.load_more().listed.len(), 10);
        let last = api.load_more();
        assert_eq!(last.listed.len(), 12);
        assert!(!last.page.unwrap().has_more());

        let exhausted = api.load_more();
        assert_eq!(exhausted.listed.len(), 12);
        assert_eq!(exhausted.messages.len(), 1);
    }

    #[tokio::test]
    async fn search_history_entry_uses_display_index() {
        let mut api = make_api(numbered(3));
        api.search("abc 1").await;
        api.search("abc 2").await;

        let result = api.search_history_entry(2).await.unwrap();
        assert_eq!(result.listed[0].id, 1);
        assert_eq!(result.history, vec!["abc 1", "abc 2"]);

        assert!(api.search_history_entry(0).await.is_err());
    }

    #[tokio::test]
    async fn clear_history_persists() {
        let mut api = make_api(Vec::new());
        api.search("x").await;
        api.clear_history().unwrap();
        assert!(api.history().history.is_empty());
        assert!(api.store().load_history().is_empty());
    }

    #[tokio::test]
    async fn browse_dispatches() {
        let api = make_api(numbered(2));
        assert_eq!(api.list_epigrams().await.listed.len(), 2);
        assert_eq!(api.show(2).await.epigram.unwrap().id, 2);
        assert!(api.today().await.epigram.is_none());
    }
}
