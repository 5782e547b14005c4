// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Paperdrop.
//
// Every save attempt resolves to exactly one of these variants. The plugin
// boundary converts each into a rejection message via `Display`, so the
// host caller always receives a definite outcome.

use thiserror::Error;

/// Top-level error type for all Paperdrop operations.
#[derive(Debug, Error)]
pub enum PaperdropError {
    /// A required input was missing or empty. Failed fast, no side effect.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The payload was not valid base64. Nothing was written.
    #[error("invalid base64 payload: {0}")]
    Decode(String),

    /// The media index accepted the insert but returned no usable handle.
    /// No bytes were written.
    #[error("failed to create file in Downloads folder")]
    StorageRegistrationFailed,

    /// I/O failure during the write/flush sequence. Partial file content
    /// may remain on disk; no rollback is performed.
    #[error("error writing file: {0}")]
    Io(#[from] std::io::Error),

    /// The success payload could not be serialized for the host.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The indexed storage capability was invoked on a platform that has
    /// no media index (desktop/CI stub).
    #[error("feature not available on this platform")]
    PlatformUnavailable,

    /// Catch-all for anything not anticipated above, including panics
    /// caught at the plugin boundary.
    #[error("error saving file: {0}")]
    Unexpected(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PaperdropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_rejection_messages() {
        let err = PaperdropError::InvalidArgument("missing base64Data or fileName".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: missing base64Data or fileName"
        );

        assert_eq!(
            PaperdropError::StorageRegistrationFailed.to_string(),
            "failed to create file in Downloads folder"
        );
    }

    #[test]
    fn io_errors_convert_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PaperdropError = io.into();
        assert!(matches!(err, PaperdropError::Io(_)));
        assert!(err.to_string().starts_with("error writing file:"));
    }
}
