use crate::config::EpigramConfig;
use crate::form::FieldError;
use crate::model::{Epigram, EpigramCard, User};
use std::path::PathBuf;

pub mod auth;
pub mod cards;
pub mod config;
pub mod history;
pub mod search;
pub mod write;

#[derive(Debug, Clone)]
pub struct EpigramPaths {
    pub data: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Where a paged listing stands after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub term: String,
    pub page: usize,
    pub shown: usize,
    pub total: usize,
}

impl PageInfo {
    pub fn has_more(&self) -> bool {
        self.shown < self.total
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<EpigramCard>,
    pub epigram: Option<Epigram>,
    pub history: Vec<String>,
    pub page: Option<PageInfo>,
    pub user: Option<User>,
    pub config: Option<EpigramConfig>,
    pub field_errors: Vec<FieldError>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, cards: Vec<EpigramCard>) -> Self {
        self.listed = cards;
        self
    }

    pub fn with_epigram(mut self, epigram: Option<Epigram>) -> Self {
        self.epigram = epigram;
        self
    }

    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_config(mut self, config: EpigramConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.field_errors = errors;
        self
    }

    pub fn is_rejected(&self) -> bool {
        !self.field_errors.is_empty()
    }
}
