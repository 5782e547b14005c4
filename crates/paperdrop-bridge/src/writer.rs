// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DownloadWriter — decode the payload, pick the storage capability chosen
// at construction, write the bytes through a scoped stream.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info};

use paperdrop_core::error::{PaperdropError, Result};
use paperdrop_core::types::{SaveRequest, SaveResult, PDF_MIME_TYPE};

use crate::capability::Capability;
use crate::traits::StorageBackend;

/// Stateless writer holding one backend per capability.
///
/// Which backend runs is fixed at construction; a failing save never falls
/// back to the other strategy. Each call operates on entirely local data,
/// so concurrent invocations need no coordination.
pub struct DownloadWriter {
    capability: Capability,
    indexed: Box<dyn StorageBackend>,
    direct: Box<dyn StorageBackend>,
}

impl DownloadWriter {
    pub fn new(
        capability: Capability,
        indexed: Box<dyn StorageBackend>,
        direct: Box<dyn StorageBackend>,
    ) -> Self {
        Self {
            capability,
            indexed,
            direct,
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Decode the request payload and persist it under Downloads.
    ///
    /// Exactly one file is created or overwritten on success. On failure
    /// before the backend is consulted, no side effect has occurred; an
    /// I/O failure mid-write may leave partial content (no rollback).
    pub fn save(&self, request: &SaveRequest) -> Result<SaveResult> {
        if request.file_name.is_empty() {
            return Err(PaperdropError::InvalidArgument(
                "missing base64Data or fileName".into(),
            ));
        }

        let bytes = decode_payload(&request.payload)?;
        debug!(size = bytes.len(), file = %request.file_name, "decoded payload");

        let backend = match self.capability {
            Capability::MediaIndex => &self.indexed,
            Capability::DirectFs => &self.direct,
        };

        let target = backend.open_download(&request.file_name, PDF_MIME_TYPE)?;
        let uri = target.uri;
        let path = target.path;

        // Scope the stream so it is dropped (closed) on the error paths
        // below as well as on success.
        {
            let mut stream = target.stream;
            stream.write_all(&bytes)?;
            stream.flush()?;
        }

        info!(uri = %uri, bytes = bytes.len(), "file written to Downloads");
        Ok(SaveResult {
            success: true,
            uri,
            path,
        })
    }
}

/// Base64 decode with the standard alphabet.
///
/// ASCII whitespace is stripped first: the historical platform decoder
/// accepted payloads with embedded newlines, and JS callers routinely
/// produce them.
fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| PaperdropError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DownloadTarget;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    /// Backend that counts invocations and records written bytes.
    struct CountingBackend {
        calls: Rc<RefCell<u32>>,
        sink: Rc<RefCell<Vec<u8>>>,
        uri: &'static str,
        path: &'static str,
    }

    struct SinkWriter(Rc<RefCell<Vec<u8>>>);

    impl Write for SinkWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl StorageBackend for CountingBackend {
        fn open_download(&self, _file_name: &str, _mime_type: &str) -> Result<DownloadTarget> {
            *self.calls.borrow_mut() += 1;
            Ok(DownloadTarget {
                stream: Box::new(SinkWriter(Rc::clone(&self.sink))),
                uri: self.uri.to_string(),
                path: self.path.to_string(),
            })
        }
    }

    struct Harness {
        writer: DownloadWriter,
        indexed_calls: Rc<RefCell<u32>>,
        direct_calls: Rc<RefCell<u32>>,
        indexed_sink: Rc<RefCell<Vec<u8>>>,
        direct_sink: Rc<RefCell<Vec<u8>>>,
    }

    fn harness(capability: Capability) -> Harness {
        let indexed_calls = Rc::new(RefCell::new(0));
        let direct_calls = Rc::new(RefCell::new(0));
        let indexed_sink = Rc::new(RefCell::new(Vec::new()));
        let direct_sink = Rc::new(RefCell::new(Vec::new()));

        let writer = DownloadWriter::new(
            capability,
            Box::new(CountingBackend {
                calls: Rc::clone(&indexed_calls),
                sink: Rc::clone(&indexed_sink),
                uri: "content://media/downloads/1",
                path: "Download/out.pdf",
            }),
            Box::new(CountingBackend {
                calls: Rc::clone(&direct_calls),
                sink: Rc::clone(&direct_sink),
                uri: "file:///sdcard/Download/out.pdf",
                path: "/sdcard/Download/out.pdf",
            }),
        );

        Harness {
            writer,
            indexed_calls,
            direct_calls,
            indexed_sink,
            direct_sink,
        }
    }

    fn request(payload: &str, name: &str) -> SaveRequest {
        SaveRequest::new(payload, name)
    }

    #[test]
    fn modern_capability_uses_index_exactly_once() {
        let h = harness(Capability::MediaIndex);
        let result = h
            .writer
            .save(&request("JVBERi0xLjQ=", "out.pdf"))
            .expect("save");

        assert!(result.success);
        assert_eq!(result.uri, "content://media/downloads/1");
        assert_eq!(result.path, "Download/out.pdf");
        assert_eq!(*h.indexed_calls.borrow(), 1);
        assert_eq!(*h.direct_calls.borrow(), 0);
        assert_eq!(&*h.indexed_sink.borrow(), b"%PDF-1.4");
    }

    #[test]
    fn legacy_capability_uses_filesystem_only() {
        let h = harness(Capability::DirectFs);
        let result = h
            .writer
            .save(&request("JVBERi0xLjQ=", "out.pdf"))
            .expect("save");

        assert_eq!(result.uri, "file:///sdcard/Download/out.pdf");
        assert_eq!(*h.indexed_calls.borrow(), 0);
        assert_eq!(*h.direct_calls.borrow(), 1);
        assert_eq!(&*h.direct_sink.borrow(), b"%PDF-1.4");
    }

    #[test]
    fn empty_file_name_fails_without_side_effects() {
        let h = harness(Capability::MediaIndex);
        let err = h
            .writer
            .save(&request("JVBERi0xLjQ=", ""))
            .expect_err("must fail");

        assert!(matches!(err, PaperdropError::InvalidArgument(_)));
        assert_eq!(*h.indexed_calls.borrow(), 0);
        assert_eq!(*h.direct_calls.borrow(), 0);
    }

    #[test]
    fn malformed_base64_fails_without_side_effects() {
        let h = harness(Capability::DirectFs);
        let err = h
            .writer
            .save(&request("not-valid-b64!!", "out.pdf"))
            .expect_err("must fail");

        assert!(matches!(err, PaperdropError::Decode(_)));
        assert_eq!(*h.direct_calls.borrow(), 0);
    }

    #[test]
    fn empty_payload_writes_zero_length_file() {
        // Empty string is valid base64 for zero bytes.
        let h = harness(Capability::DirectFs);
        let result = h.writer.save(&request("", "empty.pdf")).expect("save");

        assert!(result.success);
        assert!(h.direct_sink.borrow().is_empty());
        assert_eq!(*h.direct_calls.borrow(), 1);
    }

    #[test]
    fn payload_with_newlines_decodes() {
        let h = harness(Capability::DirectFs);
        h.writer
            .save(&request("JVBE\nRi0x\r\nLjQ=", "out.pdf"))
            .expect("save");
        assert_eq!(&*h.direct_sink.borrow(), b"%PDF-1.4");
    }

    #[test]
    fn write_failure_surfaces_as_io_error() {
        struct FailingBackend;
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl StorageBackend for FailingBackend {
            fn open_download(&self, _: &str, _: &str) -> Result<DownloadTarget> {
                Ok(DownloadTarget {
                    stream: Box::new(FailingWriter),
                    uri: "file:///x".into(),
                    path: "/x".into(),
                })
            }
        }

        let writer = DownloadWriter::new(
            Capability::DirectFs,
            Box::new(FailingBackend),
            Box::new(FailingBackend),
        );
        let err = writer
            .save(&request("JVBERi0xLjQ=", "out.pdf"))
            .expect_err("must fail");
        assert!(matches!(err, PaperdropError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn legacy_overwrite_is_silent() {
        use crate::direct::DirectFsBackend;

        let tmp = tempfile::tempdir().expect("tempdir");
        let writer = DownloadWriter::new(
            Capability::DirectFs,
            Box::new(DirectFsBackend::new(tmp.path().to_path_buf(), true)),
            Box::new(DirectFsBackend::new(tmp.path().to_path_buf(), true)),
        );

        // base64("AAA") then base64("BBB") to the same name.
        writer.save(&request("QUFB", "same.pdf")).expect("first");
        writer.save(&request("QkJC", "same.pdf")).expect("second");

        let content = std::fs::read(tmp.path().join("same.pdf")).expect("read");
        assert_eq!(content, b"BBB");
    }

    #[test]
    fn direct_round_trip_is_byte_identical() {
        use crate::direct::DirectFsBackend;

        let original: Vec<u8> = (0u8..=255).collect();
        let payload = STANDARD.encode(&original);

        let tmp = tempfile::tempdir().expect("tempdir");
        let writer = DownloadWriter::new(
            Capability::DirectFs,
            Box::new(DirectFsBackend::new(tmp.path().to_path_buf(), true)),
            Box::new(DirectFsBackend::new(tmp.path().to_path_buf(), true)),
        );

        let result = writer.save(&request(&payload, "bytes.pdf")).expect("save");
        assert!(result.success);

        let read_back = std::fs::read(tmp.path().join("bytes.pdf")).expect("read");
        assert_eq!(read_back, original);
    }
}
