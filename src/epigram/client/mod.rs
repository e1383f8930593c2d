//! # Content API Client
//!
//! [`ContentSource`] is the seam between the command layer and the remote
//! epigram API, the same way `DataStore` separates commands from storage:
//!
//! - [`http::HttpClient`]: production client over `reqwest`
//! - [`memory::InMemorySource`]: canned data for tests
//!
//! Implementations return errors; deciding whether a failure degrades to an
//! empty result or reaches the user is the command layer's job.

use crate::error::{EpigramError, Result};
use crate::model::{
    AuthSession, Epigram, EpigramList, NewEpigramRequest, SignInRequest, SignUpRequest,
};

pub mod http;
pub mod memory;

/// Path prefixes the client is allowed to request.
pub const ALLOWED_ENDPOINTS: &[&str] = &[
    "/users",
    "/oauthApps",
    "/images",
    "/epigrams",
    "/emotionLogs",
    "/comments",
    "/auth",
];

/// Query for `GET /epigrams`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: usize,
    pub keyword: Option<String>,
}

impl ListQuery {
    pub fn limit(limit: usize) -> Self {
        Self {
            limit,
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        pairs
    }
}

/// Remote epigram API operations.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    async fn list_epigrams(&self, query: &ListQuery) -> Result<EpigramList>;

    /// `Ok(None)` when no epigram is registered for today.
    async fn today_epigram(&self) -> Result<Option<Epigram>>;

    async fn get_epigram(&self, id: u64) -> Result<Epigram>;

    async fn create_epigram(&self, token: &str, request: &NewEpigramRequest) -> Result<Epigram>;

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession>;

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession>;
}

/// Reject paths outside the allowed prefixes before anything hits the network.
pub fn check_endpoint(path: &str) -> Result<()> {
    let allowed = ALLOWED_ENDPOINTS.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    });
    if allowed {
        Ok(())
    } else {
        Err(EpigramError::EndpointNotAllowed(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_known_prefixes() {
        assert!(check_endpoint("/epigrams").is_ok());
        assert!(check_endpoint("/epigrams/today").is_ok());
        assert!(check_endpoint("/epigrams/12").is_ok());
        assert!(check_endpoint("/auth/signIn").is_ok());
    }

    #[test]
    fn rejects_unknown_and_lookalike_paths() {
        assert!(matches!(
            check_endpoint("/admin"),
            Err(EpigramError::EndpointNotAllowed(_))
        ));
        assert!(check_endpoint("/epigramsX").is_err());
        assert!(check_endpoint("epigrams").is_err());
    }

    #[test]
    fn query_pairs_include_keyword_only_when_set() {
        assert_eq!(
            ListQuery::limit(10).to_pairs(),
            vec![("limit", "10".to_string())]
        );
        assert_eq!(
            ListQuery::limit(1000).with_keyword("꿈 a&b").to_pairs(),
            vec![
                ("limit", "1000".to_string()),
                ("keyword", "꿈 a&b".to_string())
            ]
        );
    }
}
