// Reel Scout Unsplash Provider
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// https://unsplash.com/documentation#search-photos

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::{classify_status, http_client, parse_items};
use crate::agent::providers::traits::ImageProvider;
use crate::agent::types::{ImageCandidate, ProviderKind, SearchTerm};
use crate::config::Config;
use crate::error::{ProviderError, ReelError};

/// Unsplash caps `per_page` at 30.
const MAX_PER_PAGE: usize = 30;

pub struct UnsplashProvider {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl UnsplashProvider {
    pub fn new(base_url: &str, access_key: &str, timeout: std::time::Duration) -> Result<Self, ReelError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ReelError> {
        Self::new(
            &config.unsplash_base_url,
            &config.credentials.unsplash_access_key,
            config.search_timeout,
        )
    }
}

/// Unsplash signals an exhausted hourly quota with 403 rather than 429.
fn is_quota_exhausted(status: StatusCode, headers: &HeaderMap, body: &str) -> bool {
    if status != StatusCode::FORBIDDEN {
        return false;
    }
    let remaining_zero = headers
        .get("X-Ratelimit-Remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);
    remaining_zero || body.to_lowercase().contains("rate limit")
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Unsplash
    }

    fn max_page_size(&self) -> usize {
        MAX_PER_PAGE
    }

    async fn fetch_page(
        &self,
        term: &SearchTerm,
        page_size: usize,
    ) -> Result<Vec<ImageCandidate>, ProviderError> {
        let url = format!("{}/search/photos", self.base_url);
        let per_page = page_size.min(MAX_PER_PAGE).to_string();
        debug!("[UNSPLASH] GET {} query='{}' per_page={}", url, term, per_page);

        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .query(&[
                ("query", term.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", "portrait"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let headers = resp.headers().clone();
            let body = resp.text().await.unwrap_or_default();
            if is_quota_exhausted(status, &headers, &body) {
                return Err(ProviderError::RateLimited {
                    retry_after_secs: None,
                });
            }
            return Err(classify_status(status, &headers));
        }

        let body: UnsplashSearchResponse = resp.json().await?;
        let photos: Vec<UnsplashPhoto> = parse_items("UNSPLASH", body.results);

        Ok(photos.into_iter().map(UnsplashPhoto::into_candidate).collect())
    }
}

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UnsplashSearchResponse {
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    urls: UnsplashUrls,
    #[serde(default)]
    user: Option<UnsplashUser>,
    #[serde(default)]
    links: Option<UnsplashLinks>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUser {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnsplashLinks {
    #[serde(default)]
    html: Option<String>,
}

impl UnsplashPhoto {
    fn into_candidate(self) -> ImageCandidate {
        ImageCandidate {
            provider: ProviderKind::Unsplash,
            id: self.id,
            url: self.urls.regular,
            width: self.width,
            height: self.height,
            photographer: self.user.and_then(|u| u.name).filter(|n| !n.is_empty()),
            page_url: self.links.and_then(|l| l.html),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_quota_detection() {
        let empty = HeaderMap::new();
        assert!(is_quota_exhausted(StatusCode::FORBIDDEN, &empty, "Rate Limit Exceeded"));
        assert!(!is_quota_exhausted(StatusCode::FORBIDDEN, &empty, "Forbidden"));
        assert!(!is_quota_exhausted(StatusCode::UNAUTHORIZED, &empty, "Rate Limit Exceeded"));

        let mut headers = HeaderMap::new();
        headers.insert("X-Ratelimit-Remaining", HeaderValue::from_static("0"));
        assert!(is_quota_exhausted(StatusCode::FORBIDDEN, &headers, ""));
    }
}
