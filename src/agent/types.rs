// Reel Scout Data Model
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// A short visual search phrase. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` when the phrase is blank after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stock-photo provider identity. Declaration order is the fan-out order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Pexels,
    Unsplash,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Pexels => "pexels",
            ProviderKind::Unsplash => "unsplash",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Pexels => "Pexels",
            ProviderKind::Unsplash => "Unsplash",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dedup key: two candidates are the same image only within one provider.
pub type CandidateKey = (ProviderKind, String);

/// One image returned by a provider search, before download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub provider: ProviderKind,
    pub id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub photographer: Option<String>,
    pub page_url: Option<String>,
}

impl ImageCandidate {
    /// Portrait means strictly taller than wide. Missing (zero) dimensions never qualify.
    pub fn is_portrait(&self) -> bool {
        self.width > 0 && self.height > self.width
    }

    pub fn key(&self) -> CandidateKey {
        (self.provider, self.id.clone())
    }
}

/// What happened to a candidate offered to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Inserted,
    Duplicate,
    Landscape,
    Full,
}

/// Ordered, deduplicated, portrait-only, capped set of candidates.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    items: Vec<ImageCandidate>,
    seen: HashSet<CandidateKey>,
    cap: usize,
}

impl CandidatePool {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            seen: HashSet::new(),
            cap,
        }
    }

    pub fn offer(&mut self, candidate: ImageCandidate) -> Offer {
        if self.is_full() {
            return Offer::Full;
        }
        if !candidate.is_portrait() {
            return Offer::Landscape;
        }
        if !self.seen.insert(candidate.key()) {
            return Offer::Duplicate;
        }
        self.items.push(candidate);
        Offer::Inserted
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageCandidate> {
        self.items.iter()
    }
}

/// Outcome of one attempted download.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// 1-based position in the pool.
    pub index: usize,
    pub candidate: ImageCandidate,
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: Option<String>,
    pub failure: Option<String>,
}

impl DownloadResult {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(provider: ProviderKind, id: &str, w: u32, h: u32) -> ImageCandidate {
        ImageCandidate {
            provider,
            id: id.to_string(),
            url: format!("https://img.test/{id}.jpg"),
            width: w,
            height: h,
            photographer: None,
            page_url: None,
        }
    }

    #[test]
    fn test_search_term_trims_and_rejects_blank() {
        assert_eq!(SearchTerm::new("  city night ").unwrap().as_str(), "city night");
        assert!(SearchTerm::new(" \n\t ").is_none());
    }

    #[test]
    fn test_orientation_rules() {
        assert!(candidate(ProviderKind::Pexels, "1", 1080, 1920).is_portrait());
        assert!(!candidate(ProviderKind::Pexels, "2", 1920, 1080).is_portrait());
        assert!(!candidate(ProviderKind::Pexels, "3", 1000, 1000).is_portrait());
        assert!(!candidate(ProviderKind::Pexels, "4", 0, 1000).is_portrait());
        assert!(!candidate(ProviderKind::Pexels, "5", 0, 0).is_portrait());
    }

    #[test]
    fn test_pool_dedups_within_provider_only() {
        let mut pool = CandidatePool::with_cap(10);
        assert_eq!(pool.offer(candidate(ProviderKind::Pexels, "42", 2, 3)), Offer::Inserted);
        assert_eq!(pool.offer(candidate(ProviderKind::Pexels, "42", 2, 3)), Offer::Duplicate);
        assert_eq!(pool.offer(candidate(ProviderKind::Unsplash, "42", 2, 3)), Offer::Inserted);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_pool_respects_cap_and_orientation() {
        let mut pool = CandidatePool::with_cap(2);
        assert_eq!(pool.offer(candidate(ProviderKind::Pexels, "a", 3, 2)), Offer::Landscape);
        assert_eq!(pool.offer(candidate(ProviderKind::Pexels, "b", 2, 3)), Offer::Inserted);
        assert_eq!(pool.offer(candidate(ProviderKind::Pexels, "c", 2, 3)), Offer::Inserted);
        assert!(pool.is_full());
        assert_eq!(pool.offer(candidate(ProviderKind::Pexels, "d", 2, 3)), Offer::Full);
        let ids: Vec<_> = pool.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_cap_pool_is_full_immediately() {
        let mut pool = CandidatePool::with_cap(0);
        assert!(pool.is_full());
        assert_eq!(pool.offer(candidate(ProviderKind::Pexels, "a", 2, 3)), Offer::Full);
    }
}
