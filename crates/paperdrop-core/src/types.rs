// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Paperdrop downloads bridge.

use serde::{Deserialize, Serialize};

/// MIME type declared for every saved payload. The bytes themselves are
/// opaque — no validation that they actually form a PDF is performed.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Well-known relative path of the public Downloads collection. This is
/// the value the platform media index uses for its Downloads bucket.
pub const DOWNLOADS_COLLECTION: &str = "Download";

/// One save invocation, as received from the host UI layer.
///
/// Both fields are required. The payload stays base64 text until
/// `DownloadWriter::save` decodes it; no lifecycle beyond the single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Base64-encoded file content.
    #[serde(rename = "base64Data")]
    pub payload: String,
    /// Display name of the target file, e.g. `receipt.pdf`.
    #[serde(rename = "fileName")]
    pub file_name: String,
}

impl SaveRequest {
    pub fn new(payload: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            file_name: file_name.into(),
        }
    }
}

/// Descriptor of a successfully written file, returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResult {
    /// Always `true` — failures are reported as rejections, never as a
    /// result with `success = false`.
    pub success: bool,
    /// Opaque addressable identifier: a media-index entry URI on the
    /// indexed path, a `file://` URI on the direct path.
    pub uri: String,
    /// Human-readable location: `Download/<name>` on the indexed path,
    /// an absolute path on the direct path.
    pub path: String,
}
