use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid link header: {0}")]
    InvalidLinkHeader(String),

    #[error("Page {page} is past the end of the listing (last page: {last:?})")]
    PageOutOfRange { page: u32, last: Option<u32> },

    #[error("Actor error: {0}")]
    ActorError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
