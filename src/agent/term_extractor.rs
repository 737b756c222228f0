// Reel Scout Term Extractor
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Turns a raw reel script into a short ordered list of photographable
// search phrases. Every later stage depends on this one, so there is no
// fallback: a failed or empty completion aborts the run.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::agent::llm_bridge::CompletionModel;
use crate::agent::types::SearchTerm;
use crate::error::{ReelError, Result};

const SYSTEM_PROMPT: &str = "You are an expert at identifying visual concepts for image searches.
Given a short-form video script, extract search terms that would find relevant,
visually appealing stock photos to accompany the content.

Rules:
- Focus on concrete, visual concepts (objects, scenes, emotions, actions)
- Avoid abstract concepts that don't photograph well
- Each term should be 2-4 words
- Return ONLY the search terms, one per line, no numbering or bullets";

pub struct TermExtractor {
    model: Arc<dyn CompletionModel>,
    max_terms: usize,
}

impl TermExtractor {
    pub fn new(model: Arc<dyn CompletionModel>, max_terms: usize) -> Self {
        Self {
            model,
            max_terms: max_terms.max(1),
        }
    }

    /// Extract between 1 and `max_terms` search terms from `script`.
    pub async fn extract(&self, script: &str) -> Result<Vec<SearchTerm>> {
        let script = script.trim();
        if script.is_empty() {
            return Err(ReelError::InvalidInput);
        }

        info!("[EXTRACT] 🤖 Analyzing script ({} chars)...", script.chars().count());
        let user_prompt = build_user_prompt(script, self.max_terms);
        let response = self
            .model
            .complete(SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(|e| ReelError::Extraction(e.to_string()))?;

        let terms = parse_terms(&response, self.max_terms);
        if terms.is_empty() {
            return Err(ReelError::Extraction(
                "the model returned no usable search phrase".to_string(),
            ));
        }

        info!(
            "[EXTRACT] Found search terms: {}",
            terms.iter().map(SearchTerm::as_str).collect::<Vec<_>>().join(", ")
        );
        Ok(terms)
    }
}

pub fn build_user_prompt(script: &str, max_terms: usize) -> String {
    format!(
        "Extract exactly {} image search terms from this script:\n\n{}",
        max_terms, script
    )
}

/// Split a completion into phrases: newline or comma delimited, list markers
/// and quotes stripped, blanks and case-insensitive repeats dropped.
pub fn parse_terms(response: &str, max_terms: usize) -> Vec<SearchTerm> {
    let mut seen = HashSet::new();

    response
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .flat_map(|line| line.split(','))
        .map(clean_phrase)
        .filter_map(|phrase| SearchTerm::new(&phrase))
        .filter(|term| seen.insert(term.as_str().to_lowercase()))
        .take(max_terms)
        .collect()
}

fn clean_phrase(raw: &str) -> String {
    let mut phrase = raw.trim();

    phrase = phrase.trim_start_matches(['-', '*', '•']).trim_start();

    // "1." / "2)" numbering, but not "1.5 liter"
    let digits = phrase.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &phrase[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if stripped.is_empty() || stripped.starts_with(char::is_whitespace) {
                phrase = stripped.trim_start();
            }
        }
    }

    phrase
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}
