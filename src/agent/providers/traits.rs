// Reel Scout Provider Trait
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use async_trait::async_trait;
use tracing::warn;

use crate::agent::types::{ImageCandidate, ProviderKind, SearchTerm};
use crate::error::ProviderError;

/// A stock-photo search service.
///
/// Implementors only provide [`ImageProvider::fetch_page`]. Callers use
/// [`ImageProvider::search`], which never fails: a provider that is down,
/// rate limited or misconfigured simply contributes nothing for that term.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Largest page the provider accepts in one request.
    fn max_page_size(&self) -> usize;

    /// One search request, ordered by provider relevance.
    async fn fetch_page(
        &self,
        term: &SearchTerm,
        page_size: usize,
    ) -> Result<Vec<ImageCandidate>, ProviderError>;

    async fn search(&self, term: &SearchTerm, page_size: usize) -> Vec<ImageCandidate> {
        let page_size = page_size.min(self.max_page_size());
        if page_size == 0 {
            return Vec::new();
        }

        match self.fetch_page(term, page_size).await {
            Ok(mut candidates) => {
                candidates.truncate(page_size);
                candidates
            }
            Err(e) => {
                warn!(
                    "[{}] ⚠️ Search failed for '{}': {}",
                    self.kind().display_name().to_uppercase(),
                    term,
                    e
                );
                Vec::new()
            }
        }
    }
}
