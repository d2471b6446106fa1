//! Pattern buffer for accumulating session output between matches.
//!
//! Unlike a scraper that keeps a whole response in memory, the capture
//! loop drains this buffer every time a terminator matches, so it only
//! ever holds the bytes of the line (or prompt) currently in flight.

use bytes::{Buf, BytesMut};

use super::pattern::{TerminatorMatch, TerminatorSet};

/// Accumulates incoming bytes and hands out slices up to a match.
#[derive(Debug, Default)]
pub struct PatternBuffer {
    buffer: BytesMut,
}

impl PatternBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
        }
    }

    /// Append incoming bytes.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Find the earliest terminator match in the buffered bytes.
    pub fn first_match(&self, terminators: &TerminatorSet) -> Option<TerminatorMatch> {
        terminators.first_match(&self.buffer)
    }

    /// Consume through `m`, returning the bytes that preceded the match.
    ///
    /// The matched text itself is discarded; bytes after the match stay
    /// buffered for the next read.
    pub fn take_until(&mut self, m: TerminatorMatch) -> Vec<u8> {
        let text = self.buffer[..m.start].to_vec();
        self.buffer.advance(m.end);
        text
    }

    /// Discard everything through `m`, including the bytes before it.
    pub fn discard_through(&mut self, m: TerminatorMatch) {
        self.buffer.advance(m.end);
    }

    /// Discard the first `n` buffered bytes.
    pub fn discard(&mut self, n: usize) {
        self.buffer.advance(n);
    }

    /// Get a view of the buffered bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Current buffered length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop all buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
