use crate::client::ContentSource;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::{FormState, SIGN_IN_FIELDS, SIGN_UP_FIELDS};
use crate::model::{AuthSession, SignInRequest, SignUpRequest};
use crate::store::{access_token, DataStore, ACCESS_TOKEN_KEY};
use crate::validation::FormValues;

/// Validate `values` against `fields`. `Err` carries the rejected result.
pub(crate) fn submit_form(
    fields: &[crate::validation::Field],
    values: FormValues,
) -> std::result::Result<FormValues, CmdResult> {
    let mut form = FormState::with_defaults(fields, values);
    form.submit()
        .map_err(|errors| CmdResult::default().with_field_errors(errors))
}

pub(crate) fn dry_run_result() -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("All fields are valid."));
    result
}

fn remember<S: DataStore>(store: &mut S, session: &AuthSession) -> Result<()> {
    store.set_item(ACCESS_TOKEN_KEY, &session.access_token)
}

pub async fn sign_up<C: ContentSource, S: DataStore>(
    source: &C,
    store: &mut S,
    values: FormValues,
    dry_run: bool,
) -> Result<CmdResult> {
    let values = match submit_form(SIGN_UP_FIELDS, values) {
        Ok(values) => values,
        Err(rejected) => return Ok(rejected),
    };
    if dry_run {
        return Ok(dry_run_result());
    }

    let session = source.sign_up(&SignUpRequest::from_values(&values)).await?;
    remember(store, &session)?;
    tracing::debug!("Signed up user {}", session.user.id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Welcome, {}! You are signed in.",
        session.user.nickname
    )));
    Ok(result.with_user(session.user))
}

pub async fn sign_in<C: ContentSource, S: DataStore>(
    source: &C,
    store: &mut S,
    values: FormValues,
    dry_run: bool,
) -> Result<CmdResult> {
    let values = match submit_form(SIGN_IN_FIELDS, values) {
        Ok(values) => values,
        Err(rejected) => return Ok(rejected),
    };
    if dry_run {
        return Ok(dry_run_result());
    }

    let session = source.sign_in(&SignInRequest::from_values(&values)).await?;
    remember(store, &session)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Signed in as {}.",
        session.user.nickname
    )));
    Ok(result.with_user(session.user))
}

pub fn sign_out<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let was_signed_in = access_token(store)?.is_some();
    store.remove_item(ACCESS_TOKEN_KEY)?;

    let mut result = CmdResult::default();
    if was_signed_in {
        result.add_message(CmdMessage::success("Signed out."));
    } else {
        result.add_message(CmdMessage::info("Not signed in."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemorySource;
    use crate::error::EpigramError;
    use crate::store::memory::InMemoryStore;
    use crate::validation::Field;

    fn sign_up_values(email: &str) -> FormValues {
        [
            (Field::Email, email),
            (Field::Nickname, "에피"),
            (Field::Password, "abcd1234"),
            (Field::PasswordConfirmation, "abcd1234"),
        ]
        .into_iter()
        .collect()
    }

    fn sign_in_values(password: &str) -> FormValues {
        [(Field::Email, "me@example.com"), (Field::Password, password)]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn sign_up_persists_token() {
        let source = InMemorySource::new(Vec::new());
        let mut store = InMemoryStore::new();

        let result = sign_up(&source, &mut store, sign_up_values("me@example.com"), false)
            .await
            .unwrap();
        assert_eq!(result.user.unwrap().nickname, "에피");
        assert_eq!(access_token(&store).unwrap().as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_server() {
        let source = InMemorySource::failing();
        let mut store = InMemoryStore::new();

        let result = sign_up(&source, &mut store, sign_up_values("nope"), false)
            .await
            .unwrap();
        assert!(result.is_rejected());
        assert_eq!(result.field_errors[0].field, Field::Email);
        assert_eq!(result.field_errors[0].message, "이메일 형식으로 작성해 주세요.");
    }

    #[tokio::test]
    async fn dry_run_validates_only() {
        let source = InMemorySource::failing();
        let mut store = InMemoryStore::new();

        let result = sign_up(&source, &mut store, sign_up_values("me@example.com"), true)
            .await
            .unwrap();
        assert!(!result.is_rejected());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn sign_in_checks_credentials() {
        let source = InMemorySource::new(Vec::new());
        let mut store = InMemoryStore::new();
        sign_up(&source, &mut store, sign_up_values("me@example.com"), false)
            .await
            .unwrap();
        sign_out(&mut store).unwrap();

        let wrong = sign_in(&source, &mut store, sign_in_values("wrong1234"), false).await;
        assert!(matches!(wrong, Err(EpigramError::Api { status: 400, .. })));
        assert_eq!(access_token(&store).unwrap(), None);

        sign_in(&source, &mut store, sign_in_values("abcd1234"), false)
            .await
            .unwrap();
        assert!(access_token(&store).unwrap().is_some());
    }

    #[tokio::test]
    async fn sign_up_surfaces_server_errors() {
        let source = InMemorySource::new(Vec::new());
        let mut store = InMemoryStore::new();
        sign_up(&source, &mut store, sign_up_values("me@example.com"), false)
            .await
            .unwrap();

        let duplicate = sign_up(&source, &mut store, sign_up_values("me@example.com"), false).await;
        assert!(duplicate.is_err());
    }

    #[test]
    fn sign_out_when_signed_out_is_informational() {
        let mut store = InMemoryStore::new();
        let result = sign_out(&mut store).unwrap();
        assert_eq!(result.messages[0].content, "Not signed in.");
    }
}
