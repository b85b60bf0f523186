use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the board model, the engine and the protocol session.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("malformed {field} update: {reason}")]
    MalformedUpdate { field: &'static str, reason: String },

    #[error("no legal move available")]
    NoLegalMove,

    #[error("unknown player id {0} (expected 1 or 2)")]
    UnknownPlayer(i64),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedUpdate { field, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
