//! Session implementation over a raw byte stream pair.
//!
//! Works against anything implementing tokio's `AsyncRead`/`AsyncWrite` —
//! a TCP connection to a console server, a PTY bridge, or an in-memory
//! duplex in tests. Reads are chunked into a [`PatternBuffer`] and matched
//! after every chunk; the per-operation timeout is this layer's own knob
//! and is fully overridable by the embedder.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use log::{debug, trace};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

use super::ansi::AnsiFilter;
use super::buffer::PatternBuffer;
use super::pattern::{Pattern, TerminatorSet};
use super::{ReadOutcome, Session, SessionFlags};
use crate::error::{Result, SessionError};

const READ_CHUNK: usize = 4096;

/// A [`Session`] over an `AsyncRead`/`AsyncWrite` pair.
pub struct StreamSession<R, W> {
    reader: R,
    writer: W,
    buffer: PatternBuffer,
    ansi: AnsiFilter,
    flags: SessionFlags,
    timeout: Duration,
    chunk: BytesMut,
}

impl<R, W> StreamSession<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Create a session with the default 30 second operation timeout.
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_timeout(reader, writer, Duration::from_secs(30))
    }

    /// Create a session with a specific operation timeout.
    pub fn with_timeout(reader: R, writer: W, timeout: Duration) -> Self {
        Self {
            reader,
            writer,
            buffer: PatternBuffer::new(),
            ansi: AnsiFilter::new(),
            flags: SessionFlags::default(),
            timeout,
            chunk: BytesMut::with_capacity(READ_CHUNK),
        }
    }

    /// Get the per-operation timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the per-operation timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Feed a chunk into the buffer, stripping escapes if the flag is set.
    fn ingest(&mut self, data: &[u8]) {
        if self.flags.ignore_escapes {
            let mut cleaned = Vec::with_capacity(data.len());
            self.ansi.filter(data, &mut cleaned);
            self.buffer.extend(&cleaned);
        } else {
            self.buffer.extend(data);
        }
    }

    /// Read one more chunk from the stream, honoring `deadline`.
    async fn fill(&mut self, deadline: Instant) -> Result<()> {
        let remaining = deadline.duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(SessionError::PatternTimeout(self.timeout).into());
        }

        self.chunk.clear();
        let n = tokio::time::timeout(remaining, self.reader.read_buf(&mut self.chunk))
            .await
            .map_err(|_| SessionError::PatternTimeout(self.timeout))?
            .map_err(SessionError::Io)?;

        if n == 0 {
            return Err(SessionError::Closed.into());
        }

        trace!("read {} bytes", n);
        let chunk = std::mem::take(&mut self.chunk);
        self.ingest(&chunk);
        self.chunk = chunk;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Session for StreamSession<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, text: &str) -> Result<()> {
        // Non-synchronous sessions do not retain output that arrived
        // between operations, mirroring the host environments this layer
        // stands in for.
        if !self.flags.synchronous {
            self.buffer.clear();
        }

        trace!("send {:?}", text);
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(SessionError::Io)?;
        self.writer.flush().await.map_err(SessionError::Io)?;
        Ok(())
    }

    async fn wait_for(&mut self, pattern: &Pattern) -> Result<()> {
        let deadline = Instant::now() + self.timeout;

        loop {
            if let Some((_, end)) = pattern.find(self.buffer.as_slice()) {
                self.buffer.discard(end);
                debug!("wait_for matched {:?}", pattern);
                return Ok(());
            }
            self.fill(deadline).await?;
        }
    }

    async fn read_until(&mut self, terminators: &TerminatorSet) -> Result<ReadOutcome> {
        let deadline = Instant::now() + self.timeout;

        loop {
            if let Some(m) = self.buffer.first_match(terminators) {
                let text = self.buffer.take_until(m);
                trace!("read_until matched member {} ({} bytes)", m.index, text.len());
                return Ok(ReadOutcome {
                    text,
                    matched: m.index,
                });
            }
            self.fill(deadline).await?;
        }
    }

    fn flags(&self) -> SessionFlags {
        self.flags
    }

    fn set_flags(&mut self, flags: SessionFlags) {
        self.flags = flags;
    }
}
