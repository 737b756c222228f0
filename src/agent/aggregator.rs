// Reel Scout Result Aggregator
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Fans each term out to every provider (term first, provider second) and
// fills a capped pool. Once the pool is full no further request is sent.

use std::sync::Arc;
use tracing::{debug, info};

use crate::agent::providers::ImageProvider;
use crate::agent::types::{CandidatePool, Offer, SearchTerm};

/// Per-request page size: enough to fill the whole pool, and at least twice
/// the fair share of one (term, provider) pair.
pub fn page_size_for(cap: usize, term_count: usize, provider_count: usize) -> usize {
    let pairs = (term_count * provider_count).max(1);
    let fair_share = cap.div_ceil(pairs);
    cap.max(fair_share * 2).max(2)
}

pub struct ResultAggregator {
    providers: Vec<Arc<dyn ImageProvider>>,
}

impl ResultAggregator {
    pub fn new(providers: Vec<Arc<dyn ImageProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub async fn aggregate(&self, terms: &[SearchTerm], cap: usize) -> CandidatePool {
        aggregate(terms, &self.providers, cap).await
    }
}

pub async fn aggregate(
    terms: &[SearchTerm],
    providers: &[Arc<dyn ImageProvider>],
    cap: usize,
) -> CandidatePool {
    let mut pool = CandidatePool::with_cap(cap);
    let page_size = page_size_for(cap, terms.len(), providers.len());

    'terms: for term in terms {
        info!("[AGGREGATE] 🔍 Searching: '{}'", term);
        for provider in providers {
            if pool.is_full() {
                break 'terms;
            }

            let candidates = provider.search(term, page_size).await;
            let (mut inserted, mut duplicates, mut landscape) = (0usize, 0usize, 0usize);
            for candidate in candidates {
                match pool.offer(candidate) {
                    Offer::Inserted => inserted += 1,
                    Offer::Duplicate => duplicates += 1,
                    Offer::Landscape => landscape += 1,
                    Offer::Full => break,
                }
            }

            debug!(
                "[AGGREGATE] {} '{}': +{} (dup {}, landscape {})",
                provider.kind(),
                term,
                inserted,
                duplicates,
                landscape
            );
        }
    }

    info!("[AGGREGATE] Selected {} of {} images", pool.len(), cap);
    pool
}
