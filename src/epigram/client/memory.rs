use super::{ContentSource, ListQuery};
use crate::error::{EpigramError, Result};
use crate::model::{
    AuthSession, Epigram, EpigramList, NewEpigramRequest, SignInRequest, SignUpRequest, User,
};
use std::cell::RefCell;

/// Canned content source for tests.
///
/// Uses `RefCell` since everything runs on one thread; requests are recorded
/// so tests can assert on what would have gone over the wire.
#[derive(Default)]
pub struct InMemorySource {
    epigrams: RefCell<Vec<Epigram>>,
    today: Option<Epigram>,
    users: RefCell<Vec<(SignUpRequest, User)>>,
    requests: RefCell<Vec<ListQuery>>,
    keyword_filter: Option<fn(&Epigram, &str) -> bool>,
    fail: bool,
}

impl InMemorySource {
    pub fn new(epigrams: Vec<Epigram>) -> Self {
        Self {
            epigrams: RefCell::new(epigrams),
            ..Self::default()
        }
    }

    /// Every call fails as if the server were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_today(mut self, epigram: Epigram) -> Self {
        self.today = Some(epigram);
        self
    }

    /// Simulate the server narrowing results by `keyword`.
    pub fn with_keyword_filter(mut self, filter: fn(&Epigram, &str) -> bool) -> Self {
        self.keyword_filter = Some(filter);
        self
    }

    pub fn requests(&self) -> Vec<ListQuery> {
        self.requests.borrow().clone()
    }

    pub fn epigrams(&self) -> Vec<Epigram> {
        self.epigrams.borrow().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(EpigramError::Api {
                status: 503,
                message: "Simulated outage".to_string(),
            });
        }
        Ok(())
    }
}

impl ContentSource for InMemorySource {
    async fn list_epigrams(&self, query: &ListQuery) -> Result<EpigramList> {
        self.requests.borrow_mut().push(query.clone());
        self.check()?;

        let all = self.epigrams.borrow();
        let matching: Vec<Epigram> = match (&query.keyword, self.keyword_filter) {
            (Some(keyword), Some(filter)) => {
                all.iter().filter(|e| filter(e, keyword)).cloned().collect()
            }
            _ => all.clone(),
        };
        let total_count = matching.len();
        let list: Vec<Epigram> = matching.into_iter().take(query.limit).collect();
        let next_cursor = if list.len() < total_count {
            list.last().map(|e| e.id)
        } else {
            None
        };

        Ok(EpigramList {
            total_count,
            next_cursor,
            list,
        })
    }

    async fn today_epigram(&self) -> Result<Option<Epigram>> {
        self.check()?;
        Ok(self.today.clone())
    }

    async fn get_epigram(&self, id: u64) -> Result<Epigram> {
        self.check()?;
        self.epigrams
            .borrow()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| EpigramError::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
    }

    async fn create_epigram(&self, token: &str, request: &NewEpigramRequest) -> Result<Epigram> {
        self.check()?;
        let writer = self
            .users
            .borrow()
            .iter()
            .find(|(_, user)| token_for(user) == token)
            .map(|(_, user)| user.id)
            .ok_or(EpigramError::Api {
                status: 401,
                message: "Unauthorized".to_string(),
            })?;

        let mut epigrams = self.epigrams.borrow_mut();
        let id = epigrams.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let mut epigram = Epigram::new(id, request.content.clone(), request.author.clone())
            .with_tags(request.tags.clone());
        epigram.reference_url = request.reference_url.clone();
        epigram.reference_title = request.reference_title.clone();
        epigram.writer_id = Some(writer);
        epigrams.insert(0, epigram.clone());
        Ok(epigram)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession> {
        self.check()?;
        let mut users = self.users.borrow_mut();
        if users.iter().any(|(r, _)| r.email == request.email) {
            return Err(EpigramError::Api {
                status: 400,
                message: "이미 사용중인 이메일입니다.".to_string(),
            });
        }
        let user = User {
            id: users.len() as u64 + 1,
            email: request.email.clone(),
            nickname: request.nickname.clone(),
            image: None,
        };
        users.push((request.clone(), user.clone()));
        Ok(session_for(user))
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession> {
        self.check()?;
        self.users
            .borrow()
            .iter()
            .find(|(r, _)| r.email == request.email && r.password == request.password)
            .map(|(_, user)| session_for(user.clone()))
            .ok_or(EpigramError::Api {
                status: 400,
                message: "이메일 혹은 비밀번호를 확인해주세요.".to_string(),
            })
    }
}

fn token_for(user: &User) -> String {
    format!("token-{}", user.id)
}

fn session_for(user: User) -> AuthSession {
    AuthSession {
        access_token: token_for(&user),
        refresh_token: None,
        user,
    }
}
