use super::{check_endpoint, ContentSource, ListQuery};
use crate::error::{EpigramError, Result};
use crate::model::{
    AuthSession, Epigram, EpigramList, NewEpigramRequest, SignInRequest, SignUpRequest,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// `reqwest` client bound to a fixed base URL.
pub struct HttpClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Result<String> {
        check_endpoint(path)?;
        Ok(format!("{}{}", self.base_url, path))
    }

    fn get(&self, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!("GET {}", url);
        Ok(self.client.get(url))
    }

    fn post(&self, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!("POST {}", url);
        Ok(self.client.post(url))
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::checked(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Turn non-2xx responses into `EpigramError::Api`, keeping the
    /// server's `message` when it sent one.
    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
        Err(EpigramError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl ContentSource for HttpClient {
    async fn list_epigrams(&self, query: &ListQuery) -> Result<EpigramList> {
        let request = self.get("/epigrams")?.query(&query.to_pairs());
        Self::json(request).await
    }

    async fn today_epigram(&self) -> Result<Option<Epigram>> {
        let response = Self::checked(self.get("/epigrams/today")?.send().await?).await?;
        let body = response.text().await?;
        parse_optional(&body)
    }

    async fn get_epigram(&self, id: u64) -> Result<Epigram> {
        Self::json(self.get(&format!("/epigrams/{}", id))?).await
    }

    async fn create_epigram(&self, token: &str, request: &NewEpigramRequest) -> Result<Epigram> {
        let builder = self.post("/epigrams")?.bearer_auth(token).json(request);
        Self::json(builder).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession> {
        Self::json(self.post("/auth/signUp")?.json(request)).await
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession> {
        Self::json(self.post("/auth/signIn")?.json(request)).await
    }
}

/// An empty body or a JSON `null` both mean "nothing registered".
fn parse_optional<T: DeserializeOwned>(body: &str) -> Result<Option<T>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str(trimmed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpClient {
        HttpClient::new("https://api.example.com/7-3/", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(client().base_url(), "https://api.example.com/7-3");
    }

    #[test]
    fn url_joins_allowed_paths() {
        assert_eq!(
            client().url("/epigrams/today").unwrap(),
            "https://api.example.com/7-3/epigrams/today"
        );
    }

    #[test]
    fn url_rejects_disallowed_paths() {
        assert!(matches!(
            client().url("/secrets"),
            Err(EpigramError::EndpointNotAllowed(_))
        ));
    }

    #[test]
    fn optional_body_parsing() {
        assert_eq!(parse_optional::<Epigram>("").unwrap(), None);
        assert_eq!(parse_optional::<Epigram>(" null ").unwrap(), None);
        let parsed: Option<Epigram> =
            parse_optional(r#"{"id": 1, "content": "c", "author": "a", "tags": []}"#).unwrap();
        assert_eq!(parsed.map(|e| e.id), Some(1));
        assert!(parse_optional::<Epigram>("{broken").is_err());
    }
}
