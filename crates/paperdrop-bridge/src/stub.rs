// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub media index for desktop/CI builds where the platform has no shared
// media index. The direct filesystem backend still works on these builds;
// only the indexed capability is unavailable.

use std::io::Write;

use paperdrop_core::error::{PaperdropError, Result};

use crate::traits::{MediaEntry, MediaIndex};

/// No-op media index returned on non-Android platforms.
pub struct StubMediaIndex;

impl MediaIndex for StubMediaIndex {
    fn insert(&self, _display_name: &str, _mime_type: &str) -> Result<Option<MediaEntry>> {
        tracing::warn!("MediaIndex::insert called on stub index");
        Err(PaperdropError::PlatformUnavailable)
    }

    fn open_output(&self, _entry: &MediaEntry) -> Result<Box<dyn Write>> {
        Err(PaperdropError::PlatformUnavailable)
    }
}
