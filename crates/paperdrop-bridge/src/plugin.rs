// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-facing invocation surface.
//
// The host UI layer calls `savePdfToDownloads` with a JSON argument object
// and expects either a resolved `{ success, uri, path }` object or a
// rejection carrying a human-readable message. Nothing propagates uncaught
// past this boundary.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, error};

use paperdrop_core::error::PaperdropError;
use paperdrop_core::types::SaveRequest;

use crate::writer::DownloadWriter;

/// The single plugin method exposed to the host.
pub const SAVE_PDF_TO_DOWNLOADS: &str = "savePdfToDownloads";

/// Outcome of a plugin call, mirroring the host runtime's resolve/reject
/// pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginResponse {
    /// The call succeeded; the value is returned to the host verbatim.
    Resolved(Value),
    /// The call failed; the message is surfaced to the host as-is.
    Rejected(String),
}

/// Dispatch one host invocation to the writer.
///
/// Every failure, including a panic inside the save path, becomes a
/// rejection — the caller always receives a definite outcome.
pub fn handle_call(writer: &DownloadWriter, method: &str, args: &Value) -> PluginResponse {
    if method != SAVE_PDF_TO_DOWNLOADS {
        return PluginResponse::Rejected(format!("method not implemented: {method}"));
    }
    debug!(method, "plugin call received");

    let request = match parse_request(args) {
        Ok(request) => request,
        Err(err) => {
            error!(%err, "rejecting call before any side effect");
            return PluginResponse::Rejected(err.to_string());
        }
    };

    let outcome = catch_unwind(AssertUnwindSafe(|| writer.save(&request)))
        .unwrap_or_else(|panic| Err(PaperdropError::Unexpected(panic_message(&panic))));

    match outcome {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => PluginResponse::Resolved(value),
            Err(e) => PluginResponse::Rejected(PaperdropError::from(e).to_string()),
        },
        Err(err) => {
            error!(%err, "save failed");
            PluginResponse::Rejected(err.to_string())
        }
    }
}

/// Extract both required string fields, rejecting absent or non-string
/// values before anything touches storage.
fn parse_request(args: &Value) -> Result<SaveRequest, PaperdropError> {
    let payload = args.get("base64Data").and_then(Value::as_str);
    let file_name = args.get("fileName").and_then(Value::as_str);
    match (payload, file_name) {
        (Some(payload), Some(file_name)) => Ok(SaveRequest::new(payload, file_name)),
        _ => Err(PaperdropError::InvalidArgument(
            "missing base64Data or fileName".into(),
        )),
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in save path".to_string()
    }
}
