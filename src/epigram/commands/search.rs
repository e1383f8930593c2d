//! # Search
//!
//! A [`SearchSession`] holds everything a search page shows: the submitted
//! term, the persisted history, the filtered result list and the page cursor.
//!
//! ## Flow
//!
//! 1. [`SearchSession::submit`] trims the input, moves the term to the front
//!    of the history, persists it, resets to page 1 and hands out a
//!    [`SearchTicket`].
//! 2. [`run`] fetches up to `fetch_limit` items and filters them once with
//!    [`matches_term`].
//! 3. [`SearchSession::apply`] stores the results unless a newer ticket has
//!    been issued in the meantime (last write wins).
//! 4. [`SearchSession::load_more`] reveals the next page of the stored list
//!    without touching the network.
//!
//! ## Filter contract
//!
//! An item matches when the term is an exact, case-sensitive substring of its
//! content, its author, or any one of its tag names. The server may be asked
//! to pre-filter by `keyword`, but only this check decides what is shown.

use crate::client::{ContentSource, ListQuery};
use crate::commands::{CmdMessage, CmdResult, PageInfo};
use crate::config::EpigramConfig;
use crate::model::{Epigram, EpigramCard};
use crate::store::SearchHistoryStore;

/// Issued per submitted search; results for an outdated ticket are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub term: String,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    term: String,
    history: Vec<String>,
    results: Vec<Epigram>,
    page: usize,
    page_size: usize,
    generation: u64,
}

impl SearchSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            term: String::new(),
            history: Vec::new(),
            results: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            generation: 0,
        }
    }

    /// Start a session with the persisted history.
    pub fn load<S: SearchHistoryStore>(store: &S, page_size: usize) -> Self {
        Self {
            history: store.load_history(),
            ..Self::new(page_size)
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// The visible prefix of the filtered results.
    pub fn displayed(&self) -> &[Epigram] {
        let shown = (self.page * self.page_size).min(self.results.len());
        &self.results[..shown]
    }

    pub fn can_load_more(&self) -> bool {
        self.displayed().len() < self.results.len()
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            term: self.term.clone(),
            page: self.page,
            shown: self.displayed().len(),
            total: self.total(),
        }
    }

    /// Record a new search. Blank input is a no-op and returns `None`.
    pub fn submit<S: SearchHistoryStore>(
        &mut self,
        store: &mut S,
        input: &str,
    ) -> Option<SearchTicket> {
        let term = input.trim();
        if term.is_empty() {
            return None;
        }

        self.history.retain(|t| t != term);
        self.history.insert(0, term.to_string());
        if let Err(e) = store.save_history(&self.history) {
            tracing::warn!("Could not persist search history: {}", e);
        }

        self.term = term.to_string();
        self.page = 1;
        self.generation += 1;
        Some(SearchTicket {
            term: self.term.clone(),
            generation: self.generation,
        })
    }

    /// Re-run the search for a history entry (0-based, most recent first).
    pub fn submit_history_entry<S: SearchHistoryStore>(
        &mut self,
        store: &mut S,
        index: usize,
    ) -> Option<SearchTicket> {
        let term = self.history.get(index)?.clone();
        self.submit(store, &term)
    }

    /// Store filtered results for `ticket`. Returns false when the ticket is
    /// stale and the results were discarded.
    pub fn apply(&mut self, ticket: &SearchTicket, results: Vec<Epigram>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!("Dropping stale results for '{}'", ticket.term);
            return false;
        }
        self.results = results;
        self.page = 1;
        true
    }

    /// Reveal the next page. Returns the newly shown slice, empty once
    /// everything is displayed.
    pub fn load_more(&mut self) -> &[Epigram] {
        if !self.can_load_more() {
            return &[];
        }
        let start = self.displayed().len();
        self.page += 1;
        let end = self.displayed().len();
        &self.results[start..end]
    }

    pub fn clear_history<S: SearchHistoryStore>(&mut self, store: &mut S) -> crate::error::Result<()> {
        store.clear_history()?;
        self.history.clear();
        Ok(())
    }
}

/// Exact, case-sensitive substring match over content, author and tags.
pub fn matches_term(epigram: &Epigram, term: &str) -> bool {
    epigram.content.contains(term)
        || epigram.author.contains(term)
        || epigram.tag_names().any(|name| name.contains(term))
}

pub fn filter_epigrams(items: Vec<Epigram>, term: &str) -> Vec<Epigram> {
    items
        .into_iter()
        .filter(|epigram| matches_term(epigram, term))
        .collect()
}

/// Fetch and filter results for `ticket`. Fetch failures are logged and
/// yield no results.
pub async fn fetch<C: ContentSource>(
    source: &C,
    config: &EpigramConfig,
    ticket: &SearchTicket,
) -> Vec<Epigram> {
    let mut query = ListQuery::limit(config.fetch_limit);
    if config.server_keyword {
        query = query.with_keyword(ticket.term.clone());
    }
    match source.list_epigrams(&query).await {
        Ok(list) => filter_epigrams(list.list, &ticket.term),
        Err(e) => {
            tracing::error!("Search for '{}' failed: {}", ticket.term, e);
            Vec::new()
        }
    }
}

/// Full search flow: submit, fetch, filter, apply.
pub async fn run<C: ContentSource, S: SearchHistoryStore>(
    source: &C,
    store: &mut S,
    session: &mut SearchSession,
    config: &EpigramConfig,
    input: &str,
) -> CmdResult {
    let Some(ticket) = session.submit(store, input) else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("Enter a search term."));
        return result;
    };
    let results = fetch(source, config, &ticket).await;
    session.apply(&ticket, results);
    displayed_result(session)
}

/// The current page state as a command result.
pub fn displayed_result(session: &SearchSession) -> CmdResult {
    let cards = session.displayed().iter().map(EpigramCard::from).collect();
    CmdResult::default()
        .with_listed(cards)
        .with_history(session.history().to_vec())
        .with_page(session.page_info())
}
