// Reel Scout Pexels Provider
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// https://www.pexels.com/api/documentation/

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{classify_status, http_client, parse_items};
use crate::agent::providers::traits::ImageProvider;
use crate::agent::types::{ImageCandidate, ProviderKind, SearchTerm};
use crate::config::Config;
use crate::error::{ProviderError, ReelError};

/// Pexels caps `per_page` at 80.
const MAX_PER_PAGE: usize = 80;

pub struct PexelsProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PexelsProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: std::time::Duration) -> Result<Self, ReelError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ReelError> {
        Self::new(
            &config.pexels_base_url,
            &config.credentials.pexels_api_key,
            config.search_timeout,
        )
    }
}

#[async_trait]
impl ImageProvider for PexelsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Pexels
    }

    fn max_page_size(&self) -> usize {
        MAX_PER_PAGE
    }

    async fn fetch_page(
        &self,
        term: &SearchTerm,
        page_size: usize,
    ) -> Result<Vec<ImageCandidate>, ProviderError> {
        let url = format!("{}/search", self.base_url);
        let per_page = page_size.min(MAX_PER_PAGE).to_string();
        debug!("[PEXELS] GET {} query='{}' per_page={}", url, term, per_page);

        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", term.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", "portrait"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(classify_status(resp.status(), resp.headers()));
        }

        let body: PexelsSearchResponse = resp.json().await?;
        let photos: Vec<PexelsPhoto> = parse_items("PEXELS", body.photos);

        Ok(photos.into_iter().map(PexelsPhoto::into_candidate).collect())
    }
}

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PexelsSearchResponse {
    photos: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    photographer: Option<String>,
    src: PexelsPhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsPhotoSrc {
    large2x: String,
}

impl PexelsPhoto {
    fn into_candidate(self) -> ImageCandidate {
        ImageCandidate {
            provider: ProviderKind::Pexels,
            id: self.id.to_string(),
            url: self.src.large2x,
            width: self.width,
            height: self.height,
            photographer: self.photographer.filter(|p| !p.is_empty()),
            page_url: self.url,
        }
    }
}
