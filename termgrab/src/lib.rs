//! # Termgrab
//!
//! Async capture of single-command output from network device terminal
//! sessions.
//!
//! Termgrab drives an already-open bidirectional terminal session to a
//! Cisco-style device: it detects the device's prompt and privilege
//! state, issues one operator-supplied command, and writes the command's
//! raw output to a file — cleanly separated from the command echo and the
//! trailing prompt.
//!
//! ## Features
//!
//! - Prompt and privilege bootstrap from an unstructured, echo-including
//!   stream, with automatic exit from nested configuration modes
//! - Pattern-delimited capture with ordered terminator sets and
//!   match-index disambiguation (line ending vs. reappearing prompt)
//! - Pagination disable/restore wrapping every capture
//! - Session abstraction with a stream-backed implementation and a
//!   scripted fake for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use termgrab::{OutputNaming, StreamSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), termgrab::Error> {
//!     // Any AsyncRead/AsyncWrite pair works; here, a console server.
//!     let stream = tokio::net::TcpStream::connect("10.0.0.5:2004").await?;
//!     let (reader, writer) = stream.into_split();
//!     let mut session = StreamSession::new(reader, writer);
//!
//!     let outcome =
//!         termgrab::run(&mut session, "show version", &OutputNaming::default()).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod error;
pub mod output;
pub mod prompt;
pub mod resolve;
mod run;
pub mod session;

// Re-export main types for convenience
pub use capture::{CaptureOptions, OutputCapturer};
pub use error::{CaptureError, Error, ResolveError, Result, SessionError};
pub use output::OutputNaming;
pub use prompt::{classify_prompt, PrivilegeMarker, Prompt, PromptClass};
pub use resolve::{PromptResolver, Resolution};
pub use run::{run, RunOutcome};
pub use session::{
    FlagsGuard, Pattern, ReadOutcome, ScriptedSession, Session, SessionFlags, StreamSession,
    TerminatorSet,
};
