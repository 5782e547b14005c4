// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability B — direct filesystem writes into the public Downloads
// directory (legacy OS versions and desktop builds).

use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use paperdrop_core::error::{PaperdropError, Result};

use crate::traits::{DownloadTarget, StorageBackend};

/// Writes files straight into a resolved Downloads directory.
pub struct DirectFsBackend {
    downloads_dir: PathBuf,
    strict_file_names: bool,
}

impl DirectFsBackend {
    pub fn new(downloads_dir: PathBuf, strict_file_names: bool) -> Self {
        Self {
            downloads_dir,
            strict_file_names,
        }
    }

    /// Reject names that would escape the Downloads directory once joined.
    ///
    /// The historical bridge joined the caller-supplied name as-is; strict
    /// mode (the default) closes that hole. Lenient mode reproduces the
    /// old behaviour for deployments that relied on it.
    fn check_file_name(&self, file_name: &str) -> Result<()> {
        if !self.strict_file_names {
            return Ok(());
        }
        let has_separator =
            file_name.contains('/') || file_name.contains('\\') || file_name.contains('\0');
        let has_parent = Path::new(file_name)
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if has_separator || has_parent {
            return Err(PaperdropError::InvalidArgument(format!(
                "unsafe file name: {file_name}"
            )));
        }
        Ok(())
    }
}

impl StorageBackend for DirectFsBackend {
    fn open_download(&self, file_name: &str, _mime_type: &str) -> Result<DownloadTarget> {
        self.check_file_name(file_name)?;

        // Best effort: a Downloads directory that already exists is the
        // normal case, absence is not an error.
        if !self.downloads_dir.exists() {
            fs::create_dir_all(&self.downloads_dir)?;
            debug!(dir = %self.downloads_dir.display(), "created Downloads directory");
        }

        let target_path = self.downloads_dir.join(file_name);
        debug!(path = %target_path.display(), "opening direct download target");

        // File::create truncates an existing file of the same name, which
        // is the silent-overwrite contract of this backend.
        let file = File::create(&target_path)?;

        Ok(DownloadTarget {
            stream: Box::new(file),
            uri: format!("file://{}", target_path.display()),
            path: target_path.display().to_string(),
        })
    }
}
