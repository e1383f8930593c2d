//! Read-only browsing. Every failure here is logged and degrades to an empty
//! or absent result; nothing is returned as an error.

use crate::client::{ContentSource, ListQuery};
use crate::commands::{CmdMessage, CmdResult, PageInfo};
use crate::model::{Epigram, EpigramCard};

/// Size of the probe request used to learn `totalCount`.
const PROBE_LIMIT: usize = 10;

/// Fetch every epigram as a card. The first request only learns the total;
/// the second asks for exactly that many.
pub async fn fetch_epigram_cards<C: ContentSource>(source: &C) -> (Vec<EpigramCard>, usize) {
    let probe = match source.list_epigrams(&ListQuery::limit(PROBE_LIMIT)).await {
        Ok(list) => list,
        Err(e) => {
            tracing::error!("Failed to fetch epigram count: {}", e);
            return (Vec::new(), 0);
        }
    };
    if probe.total_count <= probe.list.len() {
        let cards: Vec<EpigramCard> = probe.list.into_iter().map(EpigramCard::from).collect();
        let total = cards.len();
        return (cards, total);
    }

    match source
        .list_epigrams(&ListQuery::limit(probe.total_count))
        .await
    {
        Ok(full) => {
            let cards: Vec<EpigramCard> = full.list.into_iter().map(EpigramCard::from).collect();
            (cards, full.total_count)
        }
        Err(e) => {
            tracing::error!("Failed to fetch epigrams: {}", e);
            (Vec::new(), 0)
        }
    }
}

pub async fn fetch_today_epigram<C: ContentSource>(source: &C) -> Option<Epigram> {
    match source.today_epigram().await {
        Ok(today) => today,
        Err(e) => {
            tracing::error!("Failed to fetch today's epigram: {}", e);
            None
        }
    }
}

pub async fn fetch_epigram<C: ContentSource>(source: &C, id: u64) -> Option<Epigram> {
    match source.get_epigram(id).await {
        Ok(epigram) => Some(epigram),
        Err(e) => {
            tracing::error!("Failed to fetch epigram {}: {}", id, e);
            None
        }
    }
}

pub async fn list<C: ContentSource>(source: &C) -> CmdResult {
    let (cards, total) = fetch_epigram_cards(source).await;
    let shown = cards.len();
    let mut result = CmdResult::default().with_listed(cards).with_page(PageInfo {
        term: String::new(),
        page: 1,
        shown,
        total,
    });
    if shown == 0 {
        result.add_message(CmdMessage::info("No epigrams yet."));
    }
    result
}

pub async fn today<C: ContentSource>(source: &C) -> CmdResult {
    let epigram = fetch_today_epigram(source).await;
    let mut result = CmdResult::default();
    if epigram.is_none() {
        result.add_message(CmdMessage::info("No epigram for today."));
    }
    result.with_epigram(epigram)
}

pub async fn show<C: ContentSource>(source: &C, id: u64) -> CmdResult {
    let epigram = fetch_epigram(source, id).await;
    let mut result = CmdResult::default();
    if epigram.is_none() {
        result.add_message(CmdMessage::warning(format!("Epigram #{} not found.", id)));
    }
    result.with_epigram(epigram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemorySource;

    fn many(n: u64) -> Vec<Epigram> {
        (1..=n)
            .map(|i| Epigram::new(i, format!("content {}", i), "author").with_tags(["t"]))
            .collect()
    }

    #[tokio::test]
    async fn cards_use_probe_then_full_request() {
        let source = InMemorySource::new(many(23));
        let (cards, total) = fetch_epigram_cards(&source).await;

        assert_eq!(cards.len(), 23);
        assert_eq!(total, 23);
        assert_eq!(cards[0].tags, vec!["t"]);

        let limits: Vec<usize> = source.requests().iter().map(|q| q.limit).collect();
        assert_eq!(limits, vec![10, 23]);
    }

    #[tokio::test]
    async fn small_collections_need_one_request() {
        let source = InMemorySource::new(many(4));
        let (cards, total) = fetch_epigram_cards(&source).await;
        assert_eq!((cards.len(), total), (4, 4));
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn cards_degrade_to_empty_on_failure() {
        let source = InMemorySource::failing();
        assert_eq!(fetch_epigram_cards(&source).await, (Vec::new(), 0));
    }

    #[tokio::test]
    async fn today_absent_and_failing_are_none() {
        assert!(fetch_today_epigram(&InMemorySource::new(many(2))).await.is_none());
        assert!(fetch_today_epigram(&InMemorySource::failing()).await.is_none());

        let source = InMemorySource::new(Vec::new()).with_today(Epigram::new(9, "오늘", "나"));
        assert_eq!(fetch_today_epigram(&source).await.unwrap().id, 9);
    }

    #[tokio::test]
    async fn show_missing_epigram_warns() {
        let source = InMemorySource::new(many(2));
        let found = show(&source, 2).await;
        assert_eq!(found.epigram.unwrap().id, 2);

        let missing = show(&source, 99).await;
        assert!(missing.epigram.is_none());
        assert!(missing.messages[0].content.contains("#99"));
    }

    #[tokio::test]
    async fn list_reports_empty_state() {
        let result = list(&InMemorySource::failing()).await;
        assert!(result.listed.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
