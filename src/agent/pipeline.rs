// Reel Scout Pipeline - Script to Image Set Orchestrator
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// extract terms -> aggregate candidates -> fetch -> manifest -> report.
// Fatal errors propagate immediately; everything else degrades into the
// report counts.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::agent::aggregator::ResultAggregator;
use crate::agent::fetcher::Fetcher;
use crate::agent::llm_bridge::ChatClient;
use crate::agent::manifest::Manifest;
use crate::agent::providers;
use crate::agent::run_folder::RunFolder;
use crate::agent::term_extractor::TermExtractor;
use crate::agent::types::{CandidatePool, DownloadResult, SearchTerm};
use crate::config::Config;
use crate::error::Result;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Extract,
    Search,
    Download,
    Report,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Extract => "extract",
            PipelineStage::Search => "search",
            PipelineStage::Download => "download",
            PipelineStage::Report => "report",
        };
        f.write_str(name)
    }
}

pub type ProgressCallback = Arc<dyn Fn(PipelineStage, &str) + Send + Sync>;

/// Outcome of a completed run, partial or not.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub terms: Vec<SearchTerm>,
    pub folder: PathBuf,
    pub requested: usize,
    pub results: Vec<DownloadResult>,
}

impl RunReport {
    pub fn downloaded(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DownloadResult> {
        self.results.iter().filter(|r| !r.succeeded())
    }

    /// "7/10 downloaded", or "6/6 downloaded (10 requested)" when the pool came back short.
    pub fn summary(&self) -> String {
        let line = format!("{}/{} downloaded", self.downloaded(), self.attempted());
        if self.attempted() < self.requested {
            format!("{} ({} requested)", line, self.requested)
        } else {
            line
        }
    }
}

pub struct ReelPipeline {
    extractor: TermExtractor,
    aggregator: ResultAggregator,
    fetcher: Fetcher,
    pool_cap: usize,
    output_root: PathBuf,
    progress: Option<ProgressCallback>,
}

impl ReelPipeline {
    /// Wire the production components from one configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let model = Arc::new(ChatClient::from_config(config)?);
        Ok(Self::new(
            TermExtractor::new(model, config.max_terms),
            ResultAggregator::new(providers::default_providers(config)?),
            Fetcher::new(config.download_timeout, config.download_concurrency)?,
            config.pool_cap,
            config.output_root.clone(),
        ))
    }

    pub fn new(
        extractor: TermExtractor,
        aggregator: ResultAggregator,
        fetcher: Fetcher,
        pool_cap: usize,
        output_root: PathBuf,
    ) -> Self {
        Self {
            extractor,
            aggregator,
            fetcher,
            pool_cap,
            output_root,
            progress: None,
        }
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    fn report_progress(&self, stage: PipelineStage, msg: &str) {
        info!("[PIPELINE] {}: {}", stage, msg);
        if let Some(cb) = &self.progress {
            cb(stage, msg);
        }
    }

    pub async fn extract_terms(&self, script: &str) -> Result<Vec<SearchTerm>> {
        self.report_progress(PipelineStage::Extract, "analyzing script");
        self.extractor.extract(script).await
    }

    /// Terms and the selected pool, without downloading anything.
    pub async fn preview(&self, script: &str) -> Result<(Vec<SearchTerm>, CandidatePool)> {
        let terms = self.extract_terms(script).await?;
        let pool = self.search(&terms).await;
        Ok((terms, pool))
    }

    async fn search(&self, terms: &[SearchTerm]) -> CandidatePool {
        self.report_progress(
            PipelineStage::Search,
            &format!("{} terms across {} providers", terms.len(), self.aggregator.provider_count()),
        );
        self.aggregator.aggregate(terms, self.pool_cap).await
    }

    pub async fn run(&self, script: &str) -> Result<RunReport> {
        self.run_at(script, Local::now().naive_local()).await
    }

    /// Same as [`ReelPipeline::run`] with an explicit start time for the folder name.
    pub async fn run_at(&self, script: &str, started: NaiveDateTime) -> Result<RunReport> {
        let (terms, pool) = self.preview(script).await?;

        let folder = RunFolder::at(&self.output_root, started, terms.first()).into_path();
        self.report_progress(
            PipelineStage::Download,
            &format!("{} images into {:?}", pool.len(), folder),
        );
        let results = self.fetcher.fetch_all(&pool, &folder).await?;

        let manifest = Manifest::build(started, &terms, &results);
        if let Err(e) = manifest.write(&folder).await {
            warn!("[PIPELINE] ⚠️ Could not write manifest: {}", e);
        }

        let report = RunReport {
            terms,
            folder,
            requested: self.pool_cap,
            results,
        };
        self.report_progress(PipelineStage::Report, &report.summary());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::types::{ImageCandidate, ProviderKind};

    fn result(index: usize, ok: bool) -> DownloadResult {
        DownloadResult {
            index,
            candidate: ImageCandidate {
                provider: ProviderKind::Pexels,
                id: index.to_string(),
                url: String::new(),
                width: 2,
                height: 3,
                photographer: None,
                page_url: None,
            },
            path: PathBuf::from(format!("{index:02}_pexels_{index}.jpg")),
            bytes: 0,
            sha256: None,
            failure: (!ok).then(|| "HTTP 500".to_string()),
        }
    }

    #[test]
    fn test_report_summary() {
        let report = RunReport {
            terms: vec![],
            folder: PathBuf::from("out"),
            requested: 10,
            results: (1..=10).map(|i| result(i, i != 4)).collect(),
        };
        assert_eq!(report.summary(), "9/10 downloaded");
        assert_eq!(report.failures().map(|r| r.index).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_empty_report() {
        let report = RunReport {
            terms: vec![],
            folder: PathBuf::from("out"),
            requested: 10,
            results: vec![],
        };
        assert_eq!(report.summary(), "0/0 downloaded (10 requested)");
    }

    #[test]
    fn test_short_pool_reports_target() {
        let report = RunReport {
            terms: vec![],
            folder: PathBuf::from("out"),
            requested: 10,
            results: (1..=6).map(|i| result(i, true)).collect(),
        };
        assert_eq!(report.summary(), "6/6 downloaded (10 requested)");
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::Download.to_string(), "download");
    }
}
