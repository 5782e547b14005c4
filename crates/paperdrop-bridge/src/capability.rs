// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OS-version-gated capability selection.

/// Lowest SDK level at which the shared media index is used for Downloads.
/// Below this the bridge writes through the filesystem directly.
pub const MEDIA_INDEX_MIN_SDK: u32 = 29;

/// The two mutually exclusive storage-write strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Capability A — register in the shared media index, then stream.
    MediaIndex,
    /// Capability B — resolve the Downloads directory and write directly.
    DirectFs,
}

impl Capability {
    /// Pure function of the SDK level. Platforms without an SDK level
    /// (desktop builds) get the direct strategy.
    pub fn for_sdk_version(sdk: Option<u32>) -> Self {
        match sdk {
            Some(version) if version >= MEDIA_INDEX_MIN_SDK => Self::MediaIndex,
            _ => Self::DirectFs,
        }
    }
}
