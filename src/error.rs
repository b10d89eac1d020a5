use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Data directory not found")]
    NoDataDir,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API request failed with status {status}")]
    Api { status: u16 },

    /// A user-facing failure from the remote backend, after fallbacks ran out.
    #[error("{0}")]
    Remote(String),

    #[error("Anime not found: {0}")]
    AnimeNotFound(u64),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Trivia unavailable: {0}")]
    Trivia(String),
}

pub type Result<T> = std::result::Result<T, Error>;
