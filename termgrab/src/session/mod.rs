//! Session layer: the bidirectional terminal channel and its blocking
//! pattern primitives.
//!
//! Everything above this layer (prompt resolution, output capture) talks
//! to a [`Session`] and nothing else, so the state machines can be driven
//! against a live stream or a scripted fake interchangeably.

mod ansi;
mod buffer;
mod pattern;
mod scripted;
mod stream;

pub use ansi::AnsiFilter;
pub use buffer::PatternBuffer;
pub use pattern::{Pattern, TerminatorMatch, TerminatorSet};
pub use scripted::ScriptedSession;
pub use stream::StreamSession;

use std::ops::{Deref, DerefMut};

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of a [`Session::read_until`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Bytes consumed before the match. The matched text is not included.
    pub text: Vec<u8>,

    /// Index of the terminator-set member that matched.
    pub matched: usize,
}

/// Session flags mirroring the host terminal environment's read semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFlags {
    /// Retain output received between operations so pattern reads are
    /// deterministic. Without it, data arriving between calls is lost.
    pub synchronous: bool,

    /// Strip escape sequences from incoming data before matching.
    pub ignore_escapes: bool,
}

impl SessionFlags {
    /// The flags a capture run requires for the duration of the run.
    pub fn for_capture() -> Self {
        Self {
            synchronous: true,
            ignore_escapes: true,
        }
    }
}

/// An open bidirectional terminal session.
///
/// All operations are strictly sequential: each one is awaited to
/// completion before the next is issued, and a `read_until` consumes the
/// stream up to and including the matched terminator.
#[async_trait]
pub trait Session: Send {
    /// Write raw text into the session.
    async fn send(&mut self, text: &str) -> Result<()>;

    /// Block until `pattern` appears in the incoming stream, discarding
    /// everything up to and including the match.
    async fn wait_for(&mut self, pattern: &Pattern) -> Result<()>;

    /// Block until one member of `terminators` appears, returning the text
    /// consumed before the match and which member matched.
    async fn read_until(&mut self, terminators: &TerminatorSet) -> Result<ReadOutcome>;

    /// Current session flags.
    fn flags(&self) -> SessionFlags;

    /// Replace the session flags.
    fn set_flags(&mut self, flags: SessionFlags);
}

/// Scoped acquisition of the flags a capture run needs.
///
/// Enables synchronous and ignore-escapes mode on construction and
/// restores the previous flags when dropped, on every exit path.
pub struct FlagsGuard<'a, S: Session + ?Sized> {
    session: &'a mut S,
    prev: SessionFlags,
}

impl<'a, S: Session + ?Sized> FlagsGuard<'a, S> {
    /// Enable capture flags on `session`, remembering the previous state.
    pub fn acquire(session: &'a mut S) -> Self {
        let prev = session.flags();
        session.set_flags(SessionFlags::for_capture());
        Self { session, prev }
    }
}

impl<S: Session + ?Sized> Deref for FlagsGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.session
    }
}

impl<S: Session + ?Sized> DerefMut for FlagsGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.session
    }
}

impl<S: Session + ?Sized> Drop for FlagsGuard<'_, S> {
    fn drop(&mut self) {
        self.session.set_flags(self.prev);
    }
}
