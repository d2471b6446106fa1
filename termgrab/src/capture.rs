//! Command output capture with terminator disambiguation.
//!
//! Output boundaries in an unstructured stream cannot be found by
//! scanning for one fixed string: the device's own output contains line
//! endings, and only the reappearing prompt marks the end. The capture
//! loop therefore reads against an ordered two-member terminator set and
//! keys off WHICH member matched: line ending means "one more captured
//! line", prompt means "output finished".

use log::{debug, trace};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{CaptureError, Result};
use crate::prompt::Prompt;
use crate::session::{Pattern, Session, TerminatorSet};

/// Options for a capture run.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Canonical line ending, used both to terminate sends and to
    /// normalize captured lines at write time.
    pub line_ending: String,

    /// Directive that disables output pagination for the session.
    pub page_off_command: String,

    /// Directive that restores the device's default pagination.
    pub page_restore_command: String,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            line_ending: "\r\n".to_string(),
            page_off_command: "term length 0".to_string(),
            page_restore_command: "term length 24".to_string(),
        }
    }
}

/// Captures one command's raw output, delimited by the resolved prompt.
#[derive(Debug, Clone, Default)]
pub struct OutputCapturer {
    options: CaptureOptions,
}

impl OutputCapturer {
    /// Create a capturer with the default Cisco-style options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a capturer with specific options.
    pub fn with_options(options: CaptureOptions) -> Self {
        Self { options }
    }

    /// Send `command` and write its raw output to `sink`.
    ///
    /// The command is sent with the configured line ending appended; the
    /// device's echo of it is consumed and never written. Each captured
    /// line is written verbatim with the canonical line ending
    /// re-appended; the trailing prompt is not written. Pagination is
    /// disabled before the command and restored after it — the restore is
    /// required symmetry, not optional cleanup.
    ///
    /// A failure mid-loop leaves the sink truncated at the last complete
    /// line; closing the sink is the caller's responsibility on every
    /// path.
    pub async fn capture<S, W>(
        &self,
        session: &mut S,
        command: &str,
        prompt: &Prompt,
        sink: &mut W,
    ) -> Result<()>
    where
        S: Session + ?Sized,
        W: AsyncWrite + Unpin,
    {
        if prompt.raw.is_empty() {
            return Err(CaptureError::EmptyPrompt.into());
        }
        let command = command.trim();
        if command.is_empty() {
            return Err(CaptureError::EmptyCommand.into());
        }

        let le = &self.options.line_ending;
        let prompt_pattern = Pattern::literal(&prompt.raw);

        // Disabling pagination doubles as a resynchronization point: once
        // the prompt comes back we know the session is idle.
        session
            .send(&format!("{}\n", self.options.page_off_command))
            .await?;
        session.wait_for(&prompt_pattern).await?;

        debug!("capturing output of {:?} on {}", command, prompt.hostname);
        session.send(&format!("{command}{le}")).await?;

        // The device echoes what we typed; consume it so it never reaches
        // the sink.
        session
            .wait_for(&Pattern::literal(format!("{command}{le}")))
            .await?;

        let terminators = TerminatorSet::new(vec![Pattern::literal(le), prompt_pattern.clone()]);

        let mut lines = 0usize;
        loop {
            let out = session.read_until(&terminators).await?;
            match out.matched {
                0 => {
                    sink.write_all(&out.text).await?;
                    sink.write_all(le.as_bytes()).await?;
                    lines += 1;
                    trace!("captured line of {} bytes", out.text.len());
                }
                _ => break,
            }
        }
        sink.flush().await?;
        debug!("captured {} lines", lines);

        session
            .send(&format!("{}\n", self.options.page_restore_command))
            .await?;
        session.wait_for(&prompt_pattern).await?;

        Ok(())
    }
}
