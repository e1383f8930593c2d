use crate::client::ContentSource;
use crate::commands::search::{self, SearchSession};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::EpigramConfig;
use crate::error::Result;
use crate::store::SearchHistoryStore;

pub fn list(session: &SearchSession) -> CmdResult {
    CmdResult::default().with_history(session.history().to_vec())
}

pub fn clear<S: SearchHistoryStore>(store: &mut S, session: &mut SearchSession) -> Result<CmdResult> {
    let count = session.history().len();
    session.clear_history(store)?;
    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::info("Search history is already empty."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Cleared {} search{}.",
            count,
            if count == 1 { "" } else { "es" }
        )));
    }
    Ok(result)
}

/// Re-run the history entry at `index` (0-based, most recent first). The
/// term moves back to the front of the history.
pub async fn rerun<C: ContentSource, S: SearchHistoryStore>(
    source: &C,
    store: &mut S,
    session: &mut SearchSession,
    config: &EpigramConfig,
    index: usize,
) -> CmdResult {
    let Some(ticket) = session.submit_history_entry(store, index) else {
        let mut result = list(session);
        result.add_message(CmdMessage::error(format!(
            "No search history entry #{}",
            index + 1
        )));
        return result;
    };
    let results = search::fetch(source, config, &ticket).await;
    session.apply(&ticket, results);
    search::displayed_result(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemorySource;
    use crate::commands::MessageLevel;
    use crate::model::Epigram;
    use crate::store::memory::InMemoryStore;

    fn session_with(store: &mut InMemoryStore, terms: &[&str]) -> SearchSession {
        let mut session = SearchSession::new(5);
        for term in terms {
            session.submit(store, term);
        }
        session
    }

    #[test]
    fn list_is_most_recent_first() {
        let mut store = InMemoryStore::new();
        let session = session_with(&mut store, &["a", "b", "c"]);
        assert_eq!(list(&session).history, vec!["c", "b", "a"]);
    }

    #[test]
    fn clear_reports_count() {
        let mut store = InMemoryStore::new();
        let mut session = session_with(&mut store, &["a", "b"]);

        let result = clear(&mut store, &mut session).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.messages[0].content.contains("Cleared 2 searches"));
        assert!(store.load_history().is_empty());

        let again = clear(&mut store, &mut session).unwrap();
        assert_eq!(again.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn clear_surfaces_storage_failure() {
        let mut store = InMemoryStore::new();
        let mut session = session_with(&mut store, &["a"]);
        store.set_simulate_write_error(true);
        assert!(clear(&mut store, &mut session).is_err());
        assert_eq!(session.history(), ["a"]);
        assert_eq!(session.history(), store.load_history().as_slice());
    }

    #[tokio::test]
    async fn rerun_searches_again_and_reorders() {
        let source = InMemorySource::new(vec![
            Epigram::new(1, "old words", "x"),
            Epigram::new(2, "new words", "y"),
        ]);
        let mut store = InMemoryStore::new();
        let mut session = session_with(&mut store, &["old", "new"]);

        let result = rerun(&source, &mut store, &mut session, &EpigramConfig::default(), 1).await;
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].id, 1);
        assert_eq!(result.history, vec!["old", "new"]);
    }

    #[tokio::test]
    async fn rerun_out_of_range_reports_error() {
        let source = InMemorySource::new(Vec::new());
        let mut store = InMemoryStore::new();
        let mut session = session_with(&mut store, &["only"]);

        let result = rerun(&source, &mut store, &mut session, &EpigramConfig::default(), 4).await;
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0].content.contains("#5"));
        assert!(source.requests().is_empty());
    }
}
