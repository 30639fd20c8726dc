//! Error types for the fetch-parse pipeline.
//!
//! Every failure the pipeline can hit maps onto one [`FetchError`] variant.
//! The fail-soft entry point collapses all of them into an empty article
//! list; callers that want to tell them apart use the typed entry point and
//! [`FetchError::kind`].

use thiserror::Error;

/// Errors raised while turning a response body into articles.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document isn't JSON, or `response.results` is missing or mistyped
    #[error("malformed news JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A single entry in `results` lacked a required field or had the wrong type
    #[error("article {index} could not be extracted: {source}")]
    Article {
        /// Zero-based position in `results`
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Main error type for a single fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL couldn't be parsed
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The connection couldn't be established or the request failed in flight
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    /// The connect or read timeout elapsed
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The server answered with anything other than 200 OK
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response body couldn't be read to completion
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body was read but didn't contain the expected articles
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Coarse failure category, cheap to copy into loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    Parse,
}

impl FetchError {
    /// Classify a transport error from reqwest.
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e)
        } else {
            FetchError::Connect(e)
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidUrl(_) => FetchErrorKind::InvalidUrl,
            FetchError::Connect(_) | FetchError::Body(_) => FetchErrorKind::Network,
            FetchError::Timeout(_) => FetchErrorKind::Timeout,
            FetchError::Status(code) => FetchErrorKind::HttpStatus(*code),
            FetchError::Parse(_) => FetchErrorKind::Parse,
        }
    }
}
