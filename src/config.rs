// Reel Scout Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Built once at startup and passed by reference into every component.
// Nothing below `main` reads the process environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ReelError, Result};

pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
pub const PEXELS_KEY_VAR: &str = "PEXELS_API_KEY";
pub const UNSPLASH_KEY_VAR: &str = "UNSPLASH_ACCESS_KEY";

pub const DEFAULT_LLM_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const PEXELS_API_URL: &str = "https://api.pexels.com/v1";
pub const UNSPLASH_API_URL: &str = "https://api.unsplash.com";

/// The three secrets a run needs.
#[derive(Clone)]
pub struct Credentials {
    pub llm_api_key: String,
    pub pexels_api_key: String,
    pub unsplash_access_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("llm_api_key", &"***")
            .field("pexels_api_key", &"***")
            .field("unsplash_access_key", &"***")
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials through `lookup`, reporting every missing or blank key at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |var: &'static str| -> String {
            match lookup(var).map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(var);
                    String::new()
                }
            }
        };

        let llm_api_key = fetch(OPENAI_KEY_VAR);
        let pexels_api_key = fetch(PEXELS_KEY_VAR);
        let unsplash_access_key = fetch(UNSPLASH_KEY_VAR);

        if !missing.is_empty() {
            return Err(ReelError::MissingCredentials { keys: missing });
        }

        Ok(Self {
            llm_api_key,
            pexels_api_key,
            unsplash_access_key,
        })
    }

    /// Read credentials from the process environment (call `dotenv()` first).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }
}

/// Runtime settings for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub llm_base_url: String,
    pub llm_model: String,
    pub pexels_base_url: String,
    pub unsplash_base_url: String,
    /// Upper bound on extracted search terms (K).
    pub max_terms: usize,
    /// Upper bound on the candidate pool and therefore on downloads (N).
    pub pool_cap: usize,
    pub search_timeout: Duration,
    pub llm_timeout: Duration,
    pub download_timeout: Duration,
    pub download_concurrency: usize,
    pub output_root: PathBuf,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            llm_base_url: DEFAULT_LLM_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            pexels_base_url: PEXELS_API_URL.to_string(),
            unsplash_base_url: UNSPLASH_API_URL.to_string(),
            max_terms: 5,
            pool_cap: 10,
            search_timeout: Duration::from_secs(10),
            llm_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(30),
            download_concurrency: 4,
            output_root: default_output_root(),
        }
    }
}

/// `<downloads>/reel-images`, falling back to `~/Downloads` and then the working directory.
pub fn default_output_root() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reel-images")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_all_credentials_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (OPENAI_KEY_VAR, "sk-1"),
            (PEXELS_KEY_VAR, " px "),
            (UNSPLASH_KEY_VAR, "us"),
        ]))
        .unwrap();
        assert_eq!(creds.llm_api_key, "sk-1");
        assert_eq!(creds.pexels_api_key, "px");
        assert_eq!(creds.unsplash_access_key, "us");
    }

    #[test]
    fn test_missing_and_blank_keys_are_reported_together() {
        let err = Credentials::from_lookup(lookup_from(&[(PEXELS_KEY_VAR, "   ")])).unwrap_err();
        match err {
            ReelError::MissingCredentials { keys } => {
                assert_eq!(keys, vec![OPENAI_KEY_VAR, PEXELS_KEY_VAR, UNSPLASH_KEY_VAR]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials {
            llm_api_key: "sk-secret".into(),
            pexels_api_key: "px".into(),
            unsplash_access_key: "us".into(),
        };
        assert!(!format!("{:?}", creds).contains("sk-secret"));
    }

    #[test]
    fn test_defaults() {
        let creds = Credentials {
            llm_api_key: "a".into(),
            pexels_api_key: "b".into(),
            unsplash_access_key: "c".into(),
        };
        let config = Config::new(creds);
        assert_eq!(config.max_terms, 5);
        assert_eq!(config.pool_cap, 10);
        assert_eq!(config.search_timeout, Duration::from_secs(10));
        assert!(config.output_root.ends_with("reel-images"));
    }
}
