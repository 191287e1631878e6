//! Error types shared by the storage, decoding and import layers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Stored tag payload is not a mapping of heading key to list of strings.
    #[error("failed to decode tags for {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing page records failed.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("invalid table name '{0}': use letters, digits and underscores only")]
    InvalidTableName(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A crawler-output line could not be parsed.
    #[error("import line {line}: {source}")]
    Import {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
