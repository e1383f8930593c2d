use crate::client::ContentSource;
use crate::commands::auth::{dry_run_result, submit_form};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{EpigramError, Result};
use crate::form::NEW_EPIGRAM_FIELDS;
use crate::model::NewEpigramRequest;
use crate::store::{access_token, DataStore};
use crate::validation::FormValues;

/// Post a new epigram as the signed-in user. `tags` is free-form input,
/// split by [`crate::form::parse_tags`].
pub async fn create_epigram<C: ContentSource, S: DataStore>(
    source: &C,
    store: &S,
    values: FormValues,
    tags: &str,
    dry_run: bool,
) -> Result<CmdResult> {
    let values = match submit_form(NEW_EPIGRAM_FIELDS, values) {
        Ok(values) => values,
        Err(rejected) => return Ok(rejected),
    };
    let request = NewEpigramRequest::from_values(&values, tags);
    if dry_run {
        return Ok(dry_run_result());
    }

    let token = access_token(store)?.ok_or(EpigramError::Unauthorized)?;
    let epigram = source.create_epigram(&token, &request).await?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Posted epigram #{}.",
        epigram.id
    )));
    Ok(result.with_epigram(Some(epigram)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemorySource;
    use crate::commands::auth::sign_up;
    use crate::store::memory::InMemoryStore;
    use crate::validation::Field;

    fn values(content: &str) -> FormValues {
        [
            (Field::EpigramContent, content),
            (Field::Author, "미상"),
            (Field::ReferenceUrl, "https://example.com/source"),
        ]
        .into_iter()
        .collect()
    }

    async fn signed_in(source: &InMemorySource, store: &mut InMemoryStore) {
        let account: FormValues = [
            (Field::Email, "me@example.com"),
            (Field::Nickname, "me"),
            (Field::Password, "abcd1234"),
            (Field::PasswordConfirmation, "abcd1234"),
        ]
        .into_iter()
        .collect();
        sign_up(source, store, account, false).await.unwrap();
    }

    #[tokio::test]
    async fn requires_sign_in() {
        let source = InMemorySource::new(Vec::new());
        let store = InMemoryStore::new();
        let result = create_epigram(&source, &store, values("글"), "", false).await;
        assert!(matches!(result, Err(EpigramError::Unauthorized)));
    }

    #[tokio::test]
    async fn posts_with_parsed_tags() {
        let source = InMemorySource::new(Vec::new());
        let mut store = InMemoryStore::new();
        signed_in(&source, &mut store).await;

        let result = create_epigram(&source, &store, values("배움에는 끝이 없다"), "#공부, 배움", false)
            .await
            .unwrap();
        let epigram = result.epigram.unwrap();
        assert_eq!(epigram.tag_names().collect::<Vec<_>>(), vec!["공부", "배움"]);
        assert_eq!(epigram.writer_id, Some(1));
        assert_eq!(source.epigrams().len(), 1);
    }

    #[tokio::test]
    async fn over_long_content_is_rejected() {
        let source = InMemorySource::new(Vec::new());
        let store = InMemoryStore::new();
        let result = create_epigram(&source, &store, values(&"가".repeat(501)), "", false)
            .await
            .unwrap();
        assert_eq!(result.field_errors[0].message, "500자 이내로 입력해주세요");
    }

    #[tokio::test]
    async fn dry_run_needs_no_session() {
        let source = InMemorySource::new(Vec::new());
        let store = InMemoryStore::new();
        let result = create_epigram(&source, &store, values("글"), "", true).await.unwrap();
        assert!(!result.is_rejected());
        assert!(source.epigrams().is_empty());
    }
}
