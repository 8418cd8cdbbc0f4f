use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaleError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid timestamp {0:?}, expected YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[source] toml::ser::Error),

    #[error("Failed to read token file at {path}: {source}")]
    TokenFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GITHUB_TOKEN env var or add token to ~/.config/stale-prs/config.toml"
    )]
    MissingToken,

    #[error("Repository not specified and no owner/repo in config")]
    MissingRepository,

    #[error("Invalid repository {0:?}, expected owner/name")]
    InvalidRepository(String),

    #[error("Stale threshold must be at least 1 day, got {0}")]
    InvalidThreshold(u32),

    #[error("Invalid stale threshold {0:?}, expected a whole number of days")]
    InvalidThresholdInput(String),

    #[error("Page size must be between 1 and 100, got {0}")]
    InvalidPageSize(u32),
}

impl From<serde_json::Error> for StaleError {
    fn from(err: serde_json::Error) -> Self {
        StaleError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StaleError>;
