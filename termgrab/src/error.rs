//! Error types for termgrab.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for termgrab operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Session operation errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Prompt bootstrap errors
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Output capture errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// I/O error on the output sink or filesystem
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Session layer errors (sends, pattern waits, reads).
#[derive(Error, Debug)]
pub enum SessionError {
    /// A blocking wait or read never matched its pattern
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(Duration),

    /// Session closed while a wait or read was pending
    #[error("Session closed")]
    Closed,

    /// Invalid regex pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A scripted session received a send its script did not expect
    #[error("Unexpected send {got:?} (script expected {want:?})")]
    UnexpectedSend {
        got: String,
        want: Option<String>,
    },

    /// I/O error on the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Prompt bootstrap errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The idle prompt line was empty or too short to classify
    #[error("Malformed prompt line: {line:?}")]
    MalformedPrompt { line: String },
}

/// Output capture errors.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The resolved prompt string was empty
    #[error("Prompt string is empty")]
    EmptyPrompt,

    /// The command was empty after trimming
    #[error("Command is empty")]
    EmptyCommand,
}

/// Result type alias using termgrab's Error.
pub type Result<T> = std::result::Result<T, Error>;
