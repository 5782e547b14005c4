// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paperdrop — Native downloads bridge.
//
// This crate turns one host-runtime call (`savePdfToDownloads`) into one of
// two mutually exclusive OS storage sequences: registration in the shared
// media index on modern OS versions, or a direct write into the public
// Downloads directory on legacy ones. The seam between the two lives in
// `traits::StorageBackend`, so everything above it is testable without a
// real device.

pub mod capability;
pub mod direct;
pub mod indexed;
pub mod plugin;
pub mod traits;
pub mod writer;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

use paperdrop_core::error::{PaperdropError, Result};
use paperdrop_core::BridgeConfig;

use crate::capability::Capability;
use crate::direct::DirectFsBackend;
use crate::indexed::MediaIndexBackend;
use crate::writer::DownloadWriter;

/// Builds the download writer wired to this platform's storage facilities.
///
/// Capability selection happens here, once, from the configured or detected
/// SDK level. There is no fallback from one capability to the other at save
/// time.
pub fn platform_writer(config: &BridgeConfig) -> Result<DownloadWriter> {
    let sdk = config.sdk_version_override.or_else(detected_sdk_version);
    let capability = Capability::for_sdk_version(sdk);
    tracing::debug!(?sdk, ?capability, "selected storage capability");

    let downloads_dir = match &config.downloads_dir {
        Some(dir) => dir.clone(),
        None => default_downloads_dir().ok_or_else(|| {
            PaperdropError::Unexpected("no public Downloads directory on this platform".into())
        })?,
    };

    Ok(DownloadWriter::new(
        capability,
        Box::new(MediaIndexBackend::new(platform_media_index())),
        Box::new(DirectFsBackend::new(
            downloads_dir,
            config.strict_file_names,
        )),
    ))
}

/// SDK level of the running OS, if the platform exposes one.
fn detected_sdk_version() -> Option<u32> {
    #[cfg(target_os = "android")]
    {
        android::sdk_version().ok()
    }
    #[cfg(not(target_os = "android"))]
    {
        None
    }
}

/// Platform media index implementation behind Capability A.
fn platform_media_index() -> Box<dyn traits::MediaIndex> {
    #[cfg(target_os = "android")]
    {
        // Android: ContentResolver inserts into the MediaStore Downloads
        // collection through JNI.
        Box::new(android::AndroidMediaIndex::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: there is no media index; only the direct capability
        // can succeed here.
        Box::new(stub::StubMediaIndex)
    }
}

/// Public Downloads directory for the direct (legacy) backend.
fn default_downloads_dir() -> Option<std::path::PathBuf> {
    #[cfg(target_os = "android")]
    {
        android::downloads_dir().ok()
    }
    #[cfg(not(target_os = "android"))]
    {
        dirs::download_dir()
    }
}
