// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output capture for a running process.
//!
//! ```text
//! stdout task: read chunk --> canceled? drop : OutputBuffer.append
//!                                            + broadcast to subscribers
//! stderr task: read_to_end
//! both tasks end at EOF; the buffer is handed back through the JoinHandle
//! ```

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

const CHUNK_SIZE: usize = 8192;

/// Append-only stdout accumulator owned by one in-flight invocation.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
    chunks: usize,
}

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        self.bytes.extend_from_slice(chunk);
        self.chunks += 1;
    }

    /// Number of non-empty chunks appended so far.
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.chunks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Finalizes the buffer; invalid UTF-8 is replaced.
    #[must_use]
    pub fn into_string(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

/// Reads stdout in chunks until EOF.
///
/// Once `token` is canceled, chunks are still read (so the child never
/// blocks on a full pipe) but no longer accumulated or forwarded.
pub(super) fn spawn_stdout_reader<R>(
    mut reader: R,
    token: CancellationToken,
    subscribers: broadcast::Sender<String>,
    pid: Option<u32>,
) -> JoinHandle<OutputBuffer>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buffer = OutputBuffer::new();
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            match reader.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    if token.is_cancelled() {
                        trace!(pid = ?pid, bytes = n, "stdout discarded after cancel");
                        continue;
                    }
                    let data = &chunk[..n];
                    trace!(pid = ?pid, bytes = n, "stdout");
                    buffer.append(data);
                    if subscribers.receiver_count() > 0 {
                        let _ = subscribers.send(String::from_utf8_lossy(data).into_owned());
                    }
                }
                Err(e) => {
                    warn!(pid = ?pid, error = %e, "error reading stdout");
                    break;
                }
            }
        }
        buffer
    })
}

/// Reads stderr to the end.
pub(super) fn spawn_stderr_reader<R>(mut reader: R, pid: Option<u32>) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut bytes = Vec::new();
        if let Err(e) = reader.read_to_end(&mut bytes).await {
            warn!(pid = ?pid, error = %e, "error reading stderr");
        }
        String::from_utf8_lossy(&bytes).into_owned()
    })
}
