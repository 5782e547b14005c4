// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for constructing the platform download writer.
///
/// The defaults match detection-at-call-time: SDK level read from the OS,
/// Downloads directory resolved through the platform, strict file-name
/// checking enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Override the resolved public Downloads directory (direct backend
    /// only). `None` uses the platform's own resolution.
    pub downloads_dir: Option<PathBuf>,
    /// Override the detected OS SDK level used for capability selection.
    /// Useful for tests and sideloaded builds running on patched images.
    pub sdk_version_override: Option<u32>,
    /// Reject file names containing path separators, NUL bytes, or `..`
    /// components before joining them into the Downloads path. Disable
    /// only for bug-compatible behaviour with the historical bridge.
    pub strict_file_names: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            downloads_dir: None,
            sdk_version_override: None,
            strict_file_names: true,
        }
    }
}
