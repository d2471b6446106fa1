//! Session bootstrap: force a fresh idle line, classify it, and normalize
//! out of configuration mode.
//!
//! The stream at bootstrap time is unstructured and includes the echo of
//! whatever we type, so the resolver sends two line endings: the first
//! echo marks a known point in the stream, and the text up to the second
//! echo is the device's idle prompt line.

use log::{debug, warn};

use crate::error::{ResolveError, Result};
use crate::prompt::{classify_prompt, Prompt, PromptClass};
use crate::session::{Pattern, Session, TerminatorSet};

/// Outcome of a prompt resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Session is in an administrative mode and ready for capture.
    Privileged(Prompt),

    /// Session is in a restricted (`>`) mode; nothing further is possible
    /// and no command may be sent.
    NotPrivileged {
        /// The raw prompt line that was observed.
        raw: String,
    },
}

/// Bootstraps a session by resolving its prompt and privilege state.
#[derive(Debug, Clone)]
pub struct PromptResolver {
    /// Command sent to leave a nested configuration mode.
    exit_config_command: String,
}

impl PromptResolver {
    /// Create a resolver with the standard `end` configuration-mode exit.
    pub fn new() -> Self {
        Self {
            exit_config_command: "end".to_string(),
        }
    }

    /// Override the configuration-mode exit command.
    pub fn with_exit_config_command(mut self, command: impl Into<String>) -> Self {
        self.exit_config_command = command.into();
        self
    }

    /// Resolve the device prompt.
    ///
    /// Sends two line endings to force a fresh idle line, reads and
    /// classifies it, and exits configuration mode if the device is in
    /// one. Returns [`Resolution::NotPrivileged`] for `>` prompts; that is
    /// a reportable condition, not an error.
    pub async fn resolve<S: Session + ?Sized>(&self, session: &mut S) -> Result<Resolution> {
        session.send("\n\n").await?;

        // First echoed line ending marks a known stream position; the text
        // up to the next one is the idle prompt line.
        let newline = Pattern::literal("\n");
        session.wait_for(&newline).await?;
        let line = session
            .read_until(&TerminatorSet::single(newline))
            .await?;

        let raw = String::from_utf8_lossy(&line.text);
        let raw = raw
            .trim_matches(|c: char| c.is_whitespace() || c.is_control())
            .to_string();
        debug!("idle prompt line: {:?}", raw);

        match classify_prompt(&raw) {
            PromptClass::Malformed => {
                warn!("malformed prompt line during bootstrap: {:?}", raw);
                Err(ResolveError::MalformedPrompt { line: raw }.into())
            }
            PromptClass::Unprivileged => Ok(Resolution::NotPrivileged { raw }),
            PromptClass::ConfigMode { hostname } => {
                // Drop back to the top-level administrative mode and wait
                // for its prompt to confirm the transition took.
                debug!("exiting configuration mode on {}", hostname);
                session
                    .send(&format!("{}\n", self.exit_config_command))
                    .await?;
                let prompt = Prompt::privileged(hostname);
                session.wait_for(&Pattern::literal(&prompt.raw)).await?;
                Ok(Resolution::Privileged(prompt))
            }
            PromptClass::Privileged { hostname } => Ok(Resolution::Privileged(Prompt {
                hostname,
                marker: crate::prompt::PrivilegeMarker::Privileged,
                raw,
            })),
        }
    }
}

impl Default for PromptResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::session::ScriptedSession;

    #[tokio::test]
    async fn test_resolve_privileged() {
        let mut session = ScriptedSession::new().on_send("\n\n", b"\r\nrouter1#\r\nrouter1#");

        let resolver = PromptResolver::new();
        let resolution = resolver.resolve(&mut session).await.unwrap();

        match resolution {
            Resolution::Privileged(prompt) => {
                assert_eq!(prompt.hostname, "router1");
                assert_eq!(prompt.raw, "router1#");
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
        // Nothing but the probe was sent
        assert_eq!(session.sent(), ["\n\n"]);
    }

    #[tokio::test]
    async fn test_resolve_not_privileged_sends_nothing_else() {
        let mut session = ScriptedSession::new().on_send("\n\n", b"\r\nrouter1>\r\nrouter1>");

        let resolution = PromptResolver::new().resolve(&mut session).await.unwrap();

        assert_eq!(
            resolution,
            Resolution::NotPrivileged {
                raw: "router1>".to_string()
            }
        );
        assert_eq!(session.sent(), ["\n\n"]);
    }

    #[tokio::test]
    async fn test_resolve_config_mode_normalizes() {
        let mut session = ScriptedSession::new()
            .on_send("\n\n", b"\r\nrouter1(config)#\r\nrouter1(config)#")
            .on_send("end\n", b"end\r\nrouter1#");

        let resolution = PromptResolver::new().resolve(&mut session).await.unwrap();

        match resolution {
            Resolution::Privileged(prompt) => {
                assert_eq!(prompt.hostname, "router1");
                assert_eq!(prompt.raw, "router1#");
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
        // Exactly one normalization send after the probe
        assert_eq!(session.sent(), ["\n\n", "end\n"]);
        assert!(session.script_exhausted());
    }

    #[tokio::test]
    async fn test_resolve_config_submode() {
        let mut session = ScriptedSession::new()
            .on_send("\n\n", b"\r\nsw9(config-if)#\r\nsw9(config-if)#")
            .on_send("end\n", b"end\r\nsw9#");

        let resolution = PromptResolver::new().resolve(&mut session).await.unwrap();
        match resolution {
            Resolution::Privileged(prompt) => assert_eq!(prompt.raw, "sw9#"),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_malformed_line() {
        // The device answered with a bare marker and nothing else
        let mut session = ScriptedSession::new().on_send("\n\n", b"\r\n#\r\n#");

        let err = PromptResolver::new().resolve(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Resolve(ResolveError::MalformedPrompt { .. })
        ));
    }

    #[tokio::test]
    async fn test_custom_exit_command() {
        let mut session = ScriptedSession::new()
            .on_send("\n\n", b"\r\nfw1(config)#\r\nfw1(config)#")
            .on_send("exit\n", b"exit\r\nfw1#");

        let resolver = PromptResolver::new().with_exit_config_command("exit");
        let resolution = resolver.resolve(&mut session).await.unwrap();
        assert!(matches!(resolution, Resolution::Privileged(_)));
    }
}
