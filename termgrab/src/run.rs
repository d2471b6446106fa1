//! One-shot capture runs: resolve, name, capture.

use std::path::PathBuf;

use chrono::Local;
use log::{info, warn};
use tokio::io::AsyncWriteExt;

use crate::capture::OutputCapturer;
use crate::error::Result;
use crate::output::OutputNaming;
use crate::resolve::{PromptResolver, Resolution};
use crate::session::{FlagsGuard, Session};

/// Outcome of a capture run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The device is not in an administrative mode; no command was sent.
    /// The embedder reports this to the operator.
    NotPrivileged {
        /// The prompt that was observed.
        prompt: String,
    },

    /// Output was captured to `path`.
    Saved {
        /// The file the output was written to.
        path: PathBuf,
    },
}

/// Run one capture against an open session.
///
/// Sequencing is strict: the prompt is resolved first and gates
/// everything else; on a non-privileged session the run ends before any
/// command is sent. The session's synchronous and ignore-escapes flags
/// are held for the duration of the run and restored afterwards, on every
/// exit path. The output file is closed on every exit path too — a
/// failure mid-capture leaves a truncated file behind, which is the
/// accepted outcome.
pub async fn run<S: Session + ?Sized>(
    session: &mut S,
    command: &str,
    naming: &OutputNaming,
) -> Result<RunOutcome> {
    let mut session = FlagsGuard::acquire(session);

    let prompt = match PromptResolver::new().resolve(&mut *session).await? {
        Resolution::Privileged(prompt) => prompt,
        Resolution::NotPrivileged { raw } => {
            warn!("session is not privileged ({:?}), aborting", raw);
            return Ok(RunOutcome::NotPrivileged { prompt: raw });
        }
    };

    let path = naming.output_path(&prompt.hostname, command, Local::now());
    let mut file = naming.create(&path).await?;

    let captured = OutputCapturer::new()
        .capture(&mut *session, command, &prompt, &mut file)
        .await;

    // Close the file whatever happened; a truncated capture stays on disk.
    let closed = file.shutdown().await;
    captured?;
    closed?;

    info!("saved capture to {}", path.display());
    Ok(RunOutcome::Saved { path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ScriptedSession, SessionFlags};

    fn naming_in(dir: &std::path::Path) -> OutputNaming {
        OutputNaming {
            save_dir: dir.to_path_buf(),
            ..OutputNaming::default()
        }
    }

    /// The concrete end-to-end scenario: a device sitting in config mode,
    /// normalized out of it, then one command captured to a file.
    #[tokio::test]
    async fn test_config_mode_device_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = ScriptedSession::new()
            .on_send("\n\n", b"\r\nrouter1(config)#\r\nrouter1(config)#")
            .on_send("end\n", b"end\r\nrouter1#")
            .on_send("term length 0\n", b"term length 0\r\nrouter1#")
            .on_send("show version\r\n", b"show version\r\nCisco IOS ...\r\nrouter1#")
            .on_send("term length 24\n", b"term length 24\r\nrouter1#");

        let outcome = run(&mut session, "show version", &naming_in(dir.path()))
            .await
            .unwrap();

        let path = match outcome {
            RunOutcome::Saved { path } => path,
            other => panic!("unexpected outcome: {other:?}"),
        };

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("router1-show_version-"));
        assert!(name.ends_with(".txt"));

        let contents = tokio::fs::read(&path).await.unwrap();
        assert_eq!(contents, b"Cisco IOS ...\r\n");

        assert!(session.script_exhausted());
        // Flags were restored after the run
        assert_eq!(session.flags(), SessionFlags::default());
    }

    #[tokio::test]
    async fn test_not_privileged_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = ScriptedSession::new().on_send("\n\n", b"\r\nrouter1>\r\nrouter1>");

        let outcome = run(&mut session, "show version", &naming_in(dir.path()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RunOutcome::NotPrivileged {
                prompt: "router1>".to_string()
            }
        );
        // Only the probe was sent, and no file was created
        assert_eq!(session.sent(), ["\n\n"]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_flags_restored_on_error() {
        let dir = tempfile::tempdir().unwrap();
        // Script ends after the probe, so the capture phase fails
        let mut session = ScriptedSession::new().on_send("\n\n", b"\r\nrouter1#\r\nrouter1#");

        let result = run(&mut session, "show version", &naming_in(dir.path())).await;

        assert!(result.is_err());
        assert_eq!(session.flags(), SessionFlags::default());
    }

    #[tokio::test]
    async fn test_truncated_file_remains_on_capture_error() {
        let dir = tempfile::tempdir().unwrap();
        // The command's output never reaches a prompt: the line is
        // written, then the loop fails on the missing terminator.
        let mut session = ScriptedSession::new()
            .on_send("\n\n", b"\r\nrouter1#\r\nrouter1#")
            .on_send("term length 0\n", b"term length 0\r\nrouter1#")
            .on_send("show version\r\n", b"show version\r\npartial line\r\n");

        let result = run(&mut session, "show version", &naming_in(dir.path())).await;
        assert!(result.is_err());

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let contents = std::fs::read(&entries[0]).unwrap();
        assert_eq!(contents, b"partial line\r\n");
    }
}
