//! Scripted fake session for tests and examples.
//!
//! The script is an ordered list of exchanges: the exact text the caller
//! is expected to send, and the bytes the "device" emits in response.
//! Sends are checked strictly against the script, so a test fails loudly
//! the moment the state machine under test issues anything unplanned.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use log::trace;

use super::buffer::PatternBuffer;
use super::pattern::{Pattern, TerminatorSet};
use super::{ReadOutcome, Session, SessionFlags};
use crate::error::{Result, SessionError};

/// A deterministic [`Session`] driven by a pre-recorded script.
#[derive(Default)]
pub struct ScriptedSession {
    script: VecDeque<Exchange>,
    buffer: PatternBuffer,
    flags: SessionFlags,
    sent: Vec<String>,
}

struct Exchange {
    expect: String,
    reply: Vec<u8>,
}

impl ScriptedSession {
    /// Create a session with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exchange: when `expect` is sent, emit `reply`.
    pub fn on_send(mut self, expect: impl Into<String>, reply: impl AsRef<[u8]>) -> Self {
        self.script.push_back(Exchange {
            expect: expect.into(),
            reply: reply.as_ref().to_vec(),
        });
        self
    }

    /// Queue device output that arrives without any send.
    pub fn push_output(&mut self, data: impl AsRef<[u8]>) {
        self.buffer.extend(data.as_ref());
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Check that every scripted exchange was consumed.
    pub fn script_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn send(&mut self, text: &str) -> Result<()> {
        let step = self.script.pop_front();
        match step {
            Some(step) if step.expect == text => {
                trace!("scripted send {:?}", text);
                self.sent.push(text.to_string());
                self.buffer.extend(&step.reply);
                Ok(())
            }
            step => Err(SessionError::UnexpectedSend {
                got: text.to_string(),
                want: step.map(|s| s.expect),
            }
            .into()),
        }
    }

    async fn wait_for(&mut self, pattern: &Pattern) -> Result<()> {
        match pattern.find(self.buffer.as_slice()) {
            Some((_, end)) => {
                self.buffer.discard(end);
                Ok(())
            }
            None => Err(SessionError::PatternTimeout(Duration::ZERO).into()),
        }
    }

    async fn read_until(&mut self, terminators: &TerminatorSet) -> Result<ReadOutcome> {
        match self.buffer.first_match(terminators) {
            Some(m) => Ok(ReadOutcome {
                text: self.buffer.take_until(m),
                matched: m.index,
            }),
            None => Err(SessionError::PatternTimeout(Duration::ZERO).into()),
        }
    }

    fn flags(&self) -> SessionFlags {
        self.flags
    }

    fn set_flags(&mut self, flags: SessionFlags) {
        self.flags = flags;
    }
}
