// Reel Scout Library Root
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod agent;
pub mod config;
pub mod desktop;
pub mod error;
pub mod script_input;

pub use agent::pipeline::{PipelineStage, ReelPipeline, RunReport};
pub use config::{Config, Credentials};
pub use error::{ReelError, Result};
