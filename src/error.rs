// Reel Scout Error Types
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Fatal errors abort a run. Provider and download failures never reach this
// type: they are absorbed where they happen and only show up in the report.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias using [`ReelError`].
pub type Result<T> = std::result::Result<T, ReelError>;

#[derive(Error, Debug)]
pub enum ReelError {
    /// The script was empty after trimming whitespace.
    #[error("No script provided: the input is empty")]
    InvalidInput,

    /// The language model call failed or produced no usable search phrase.
    #[error("Could not extract search terms: {0}")]
    Extraction(String),

    /// The run folder could not be created.
    #[error("Cannot create output folder '{path}': {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more required API keys are missing or blank.
    #[error("Missing API keys: {}. Set them as environment variables or in a .env file", .keys.join(", "))]
    MissingCredentials { keys: Vec<&'static str> },

    /// The HTTP client could not be built (TLS backend, invalid settings).
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Failure of a single provider search. Never fatal.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("authentication rejected (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("rate limit reached{}", .retry_after_secs.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("response did not match the expected schema: {0}")]
    Schema(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Schema(e.to_string())
        } else {
            ProviderError::Network(e)
        }
    }
}

/// Failure of the language-model completion call.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("empty completion")]
    EmptyResponse,
}

/// Failure of a single image download. Recorded, never propagated.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("blocked URL: {0}")]
    BlockedUrl(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("rejected payload: {0}")]
    Payload(String),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_lists_every_key() {
        let err = ReelError::MissingCredentials {
            keys: vec!["OPENAI_API_KEY", "UNSPLASH_ACCESS_KEY"],
        };
        let msg = err.to_string();
        assert!(msg.contains("OPENAI_API_KEY, UNSPLASH_ACCESS_KEY"));
    }

    #[test]
    fn test_rate_limit_message() {
        let with = ProviderError::RateLimited { retry_after_secs: Some(60) };
        let without = ProviderError::RateLimited { retry_after_secs: None };
        assert_eq!(with.to_string(), "rate limit reached, retry after 60s");
        assert_eq!(without.to_string(), "rate limit reached");
    }
}
