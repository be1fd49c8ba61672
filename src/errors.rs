// src/errors.rs

use thiserror::Error;

/// Errors surfaced by the quarry client.
///
/// The chat path only ever produces the first four variants; they are mapped
/// to a single `Error: ...` bubble and never abort the session. The remaining
/// variants are startup failures.
#[derive(Debug, Error)]
pub enum QuarryError {
    /// The search service answered with an `error` field. Displayed verbatim.
    #[error("{0}")]
    Backend(String),

    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The search service answered with a non-success status.
    #[error("search service returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not JSON, or a success reply was missing fields.
    #[error("malformed search reply: {0}")]
    MalformedReply(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuarryError {
    pub fn backend(msg: impl Into<String>) -> Self {
        QuarryError::Backend(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        QuarryError::MalformedReply(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        QuarryError::Config(msg.into())
    }
}

pub type QuarryResult<T> = Result<T, QuarryError>;
