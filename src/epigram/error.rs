use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpigramError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Endpoint not allowed: {0}")]
    EndpointNotAllowed(String),

    #[error("Not signed in")]
    Unauthorized,

    #[error("Invalid form: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EpigramError>;
