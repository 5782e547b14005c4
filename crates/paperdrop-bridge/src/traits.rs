// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the storage capabilities.
//
// The OS version gate splits storage access into two strategies. Both are
// expressed as implementations of a single `StorageBackend` seam so the
// writer above never touches an OS API directly.

use std::io::Write;

use paperdrop_core::error::Result;

/// A single writable target inside the Downloads location.
///
/// The stream is a scoped resource: dropping it closes the underlying
/// handle, which is how closure is guaranteed on every exit path.
pub struct DownloadTarget {
    /// Open write stream positioned at the start of the (empty) file.
    pub stream: Box<dyn Write>,
    /// Addressable identifier: media-index entry URI or `file://` URI.
    pub uri: String,
    /// Human-readable location reported back to the host.
    pub path: String,
}

impl std::fmt::Debug for DownloadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadTarget")
            .field("uri", &self.uri)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// One storage-write strategy for the Downloads location.
///
/// Exactly one implementation is consulted per save; there is no fallback
/// between them.
pub trait StorageBackend {
    /// Open a writable target for a new download entry.
    ///
    /// An existing file with the same name may be silently replaced —
    /// collision handling is deliberately not provided.
    fn open_download(&self, file_name: &str, mime_type: &str) -> Result<DownloadTarget>;
}

/// An entry registered in the platform's shared media index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    /// Opaque URI under which the platform addresses the entry.
    pub uri: String,
}

/// The platform's shared media index (modern OS versions).
///
/// This is the narrow seam under Capability A: the real implementation
/// goes through the OS content resolver, tests substitute an in-memory
/// index.
pub trait MediaIndex {
    /// Register a new entry in the Downloads collection.
    ///
    /// Returns `Ok(None)` when the platform accepted the call but produced
    /// no usable handle — the caller maps that to a registration failure.
    fn insert(&self, display_name: &str, mime_type: &str) -> Result<Option<MediaEntry>>;

    /// Open a write stream on a previously registered entry.
    fn open_output(&self, entry: &MediaEntry) -> Result<Box<dyn Write>>;
}

impl<M: MediaIndex + ?Sized> MediaIndex for Box<M> {
    fn insert(&self, display_name: &str, mime_type: &str) -> Result<Option<MediaEntry>> {
        (**self).insert(display_name, mime_type)
    }

    fn open_output(&self, entry: &MediaEntry) -> Result<Box<dyn Write>> {
        (**self).open_output(entry)
    }
}
