// Reel Scout Desktop Integration
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Show `path` in the platform file manager. Failure is logged, never fatal.
pub fn open_folder(path: &Path) {
    let program = opener();
    info!("[DESKTOP] Opening {:?} with {}", path, program);
    if let Err(e) = Command::new(program).arg(path).spawn() {
        warn!("[DESKTOP] ⚠️ Could not open folder {:?}: {}", path, e);
    }
}
