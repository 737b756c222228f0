// Reel Scout Run Manifest
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// `manifest.json` records what landed in the run folder: search terms,
// attribution, and a SHA-256 per file so later tampering can be spotted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::agent::types::{DownloadResult, ProviderKind, SearchTerm};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub created_at: String,
    pub terms: Vec<SearchTerm>,
    pub attempted: usize,
    pub images: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    pub provider: ProviderKind,
    pub id: String,
    pub source_url: String,
    pub photographer: Option<String>,
    pub page_url: Option<String>,
    pub bytes: u64,
    pub sha256: String,
}

impl Manifest {
    pub fn build(started: NaiveDateTime, terms: &[SearchTerm], results: &[DownloadResult]) -> Self {
        let images = results
            .iter()
            .filter(|r| r.succeeded())
            .map(|r| ManifestEntry {
                file: r
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                provider: r.candidate.provider,
                id: r.candidate.id.clone(),
                source_url: r.candidate.url.clone(),
                photographer: r.candidate.photographer.clone(),
                page_url: r.candidate.page_url.clone(),
                bytes: r.bytes,
                sha256: r.sha256.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            created_at: started.format("%Y-%m-%dT%H:%M:%S").to_string(),
            terms: terms.to_vec(),
            attempted: results.len(),
            images,
        }
    }

    pub async fn write(&self, folder: &Path) -> std::io::Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(folder.join(MANIFEST_FILE), json).await
    }

    pub async fn read(folder: &Path) -> std::io::Result<Self> {
        let raw = tokio::fs::read(folder.join(MANIFEST_FILE)).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Files that are missing or whose hash no longer matches.
    pub async fn verify(&self, folder: &Path) -> Vec<String> {
        let mut violations = Vec::new();
        for entry in &self.images {
            match tokio::fs::read(folder.join(&entry.file)).await {
                Ok(bytes) => {
                    if format!("{:x}", Sha256::digest(&bytes)) != entry.sha256 {
                        violations.push(format!("TAMPERED: {}", entry.file));
                    }
                }
                Err(_) => violations.push(format!("MISSING: {}", entry.file)),
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::types::ImageCandidate;
    use chrono::NaiveDate;

    fn result(index: usize, failure: Option<&str>, dir: &Path, body: &[u8]) -> DownloadResult {
        let candidate = ImageCandidate {
            provider: ProviderKind::Unsplash,
            id: format!("u{index}"),
            url: format!("https://images.unsplash.com/u{index}"),
            width: 2,
            height: 3,
            photographer: Some("Ada".into()),
            page_url: None,
        };
        DownloadResult {
            index,
            path: dir.join(format!("{index:02}_unsplash_u{index}.jpg")),
            candidate,
            bytes: body.len() as u64,
            sha256: failure.is_none().then(|| format!("{:x}", Sha256::digest(body))),
            failure: failure.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_manifest_round_trip_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let started = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        let terms = vec![SearchTerm::new("red car").unwrap()];

        tokio::fs::write(dir.path().join("01_unsplash_u1.jpg"), b"one").await.unwrap();
        tokio::fs::write(dir.path().join("03_unsplash_u3.jpg"), b"three").await.unwrap();
        let results = vec![
            result(1, None, dir.path(), b"one"),
            result(2, Some("HTTP 500"), dir.path(), b""),
            result(3, None, dir.path(), b"three"),
        ];

        let manifest = Manifest::build(started, &terms, &results);
        assert_eq!(manifest.attempted, 3);
        assert_eq!(manifest.images.len(), 2);
        assert_eq!(manifest.images[0].file, "01_unsplash_u1.jpg");
        assert_eq!(manifest.created_at, "2026-01-02T03:04:05");

        manifest.write(dir.path()).await.unwrap();
        let loaded = Manifest::read(dir.path()).await.unwrap();
        assert_eq!(loaded, manifest);
        assert!(loaded.verify(dir.path()).await.is_empty());

        tokio::fs::write(dir.path().join("03_unsplash_u3.jpg"), b"edited").await.unwrap();
        tokio::fs::remove_file(dir.path().join("01_unsplash_u1.jpg")).await.unwrap();
        let violations = loaded.verify(dir.path()).await;
        assert_eq!(violations, vec!["MISSING: 01_unsplash_u1.jpg", "TAMPERED: 03_unsplash_u3.jpg"]);
    }
}
