// Reel Scout Stock Photo Providers
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod pexels;
pub mod traits;
pub mod unsplash;

pub use pexels::PexelsProvider;
pub use traits::ImageProvider;
pub use unsplash::UnsplashProvider;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{ProviderError, ReelError};

/// Both providers in fan-out order.
pub fn default_providers(config: &Config) -> Result<Vec<Arc<dyn ImageProvider>>, ReelError> {
    let pexels: Arc<dyn ImageProvider> = Arc::new(PexelsProvider::from_config(config)?);
    let unsplash: Arc<dyn ImageProvider> = Arc::new(UnsplashProvider::from_config(config)?);
    Ok(vec![pexels, unsplash])
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, ReelError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Map a non-success response onto the provider error taxonomy.
pub(crate) fn classify_status(status: StatusCode, headers: &HeaderMap) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => ProviderError::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            retry_after_secs: headers
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok()),
        },
        other => ProviderError::Status {
            status: other.as_u16(),
        },
    }
}

/// Deserialize each raw item on its own, dropping the ones that don't fit.
pub(crate) fn parse_items<T: DeserializeOwned>(
    provider: &str,
    items: Vec<serde_json::Value>,
) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| match serde_json::from_value::<T>(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("[{}] Skipping malformed result #{}: {}", provider, i, e);
                None
            }
        })
        .collect()
}
