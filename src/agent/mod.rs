// Reel Scout Agent Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod aggregator;
pub mod download_guard;
pub mod fetcher;
pub mod llm_bridge;
pub mod manifest;
pub mod providers;
pub mod run_folder;
pub mod term_extractor;
pub mod types;

pub mod pipeline; // Exposed orchestration
