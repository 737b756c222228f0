// Reel Scout Run Folder
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use crate::agent::types::SearchTerm;

const SLUG_MAX_CHARS: usize = 30;

/// One run's output directory: `{YYYYMMDD_HHMMSS}_{slug}` under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFolder {
    path: PathBuf,
}

impl RunFolder {
    pub fn at(root: &Path, started: NaiveDateTime, first_term: Option<&SearchTerm>) -> Self {
        Self {
            path: root.join(folder_name(started, first_term)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

pub fn folder_name(started: NaiveDateTime, first_term: Option<&SearchTerm>) -> String {
    let timestamp = started.format("%Y%m%d_%H%M%S").to_string();
    match first_term.map(|t| slugify(t.as_str())) {
        Some(slug) if !slug.is_empty() => format!("{}_{}", timestamp, slug),
        _ => timestamp,
    }
}

/// Keep alphanumerics, `-`, `_` and spaces; spaces become `_`; at most 30 chars.
pub fn slugify(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();
    kept.trim()
        .replace(' ', "_")
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect()
}
