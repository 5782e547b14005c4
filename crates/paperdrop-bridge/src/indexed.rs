// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability A — registration in the platform's shared media index, then a
// streamed write through the returned handle (modern OS versions).

use tracing::debug;

use paperdrop_core::error::{PaperdropError, Result};
use paperdrop_core::types::DOWNLOADS_COLLECTION;

use crate::traits::{DownloadTarget, MediaIndex, StorageBackend};

/// Indexed-storage backend over any [`MediaIndex`] implementation.
///
/// The display name is passed to the index untouched — the index performs
/// its own normalization, so the strict file-name rules of the direct
/// backend do not apply here.
pub struct MediaIndexBackend<I> {
    index: I,
}

impl<I: MediaIndex> MediaIndexBackend<I> {
    pub fn new(index: I) -> Self {
        Self { index }
    }
}

impl<I: MediaIndex> StorageBackend for MediaIndexBackend<I> {
    fn open_download(&self, file_name: &str, mime_type: &str) -> Result<DownloadTarget> {
        let entry = self
            .index
            .insert(file_name, mime_type)?
            .ok_or(PaperdropError::StorageRegistrationFailed)?;
        debug!(uri = %entry.uri, "registered media index entry");

        let stream = self.index.open_output(&entry)?;

        Ok(DownloadTarget {
            stream,
            uri: entry.uri,
            path: format!("{DOWNLOADS_COLLECTION}/{file_name}"),
        })
    }
}
