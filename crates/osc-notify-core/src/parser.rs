//! The notification parser: one instance per connection.
//!
//! Each call handles one complete invocation (`<metadata>;<payload>`):
//!
//! ```text
//! bytes → split at ';' → metadata → payload decode → session → outcome
//! ```
//!
//! Any structural, encoding or capacity error invalidates the parser. From
//! then on every call reports [`Error::ParserInvalid`] until the owner calls
//! [`Parser::reset`].

use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::error::{ConfigError, Error, ErrorKind, Result};
use crate::metadata::{IdentifierStatus, Metadata, PayloadRole, split_invocation};
use crate::notification::{Command, DropReason, Outcome};
use crate::payload;
use crate::session::{Reconciliation, Session};
use crate::sink::ScratchBuffer;

/// Whether the parser can still accept invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    Valid,
    Invalid,
}

/// Result of the accumulation phase, before anything is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Ignored(PayloadRole),
    Pending,
    Complete,
}

#[derive(Debug, Clone)]
pub struct Parser {
    state: ParserState,
    session: Session,
    /// Reused destination for base64 payloads
    decode_buf: Vec<u8>,
    identifier_capacity: usize,
    last_command: Option<Command>,
}

impl Parser {
    /// Build a parser from `config`, rejecting capacities it cannot honor.
    pub fn new(config: &ParserConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_validated(config))
    }

    fn with_validated(config: &ParserConfig) -> Self {
        Self {
            state: ParserState::Valid,
            session: Session::new(config.buffer_capacity, config.identifier_capacity),
            decode_buf: Vec::with_capacity(config.sink_capacity),
            identifier_capacity: config.identifier_capacity,
            last_command: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> ParserState {
        self.state
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state == ParserState::Valid
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The most recent command produced by a completed notification.
    #[must_use]
    pub fn last_command(&self) -> Option<&Command> {
        self.last_command.as_ref()
    }

    /// Reinitialize after a failure: clears the session, the last command
    /// and the invalid flag. Buffer storage is kept.
    pub fn reset(&mut self) {
        self.state = ParserState::Valid;
        self.session.reset();
        self.decode_buf.clear();
        self.last_command = None;
    }

    /// Handle the sentinel-terminated invocation held by `sink`.
    pub fn handle_sink(&mut self, sink: &ScratchBuffer) -> Outcome<'_> {
        if !self.is_valid() {
            return Outcome::Failed(Error::ParserInvalid);
        }
        match sink.invocation() {
            Ok(invocation) => self.handle_invocation(invocation),
            Err(err) => self.fail(err),
        }
    }

    /// Handle one invocation, sentinel already stripped.
    pub fn handle_invocation(&mut self, invocation: &[u8]) -> Outcome<'_> {
        if !self.is_valid() {
            return Outcome::Failed(Error::ParserInvalid);
        }
        let step = match self.accumulate(invocation) {
            Ok(step) => step,
            Err(err) => return self.fail(err),
        };
        match step {
            Step::Ignored(role) => {
                debug!(outcome = "ignored", role = role.as_str(), "notification invocation");
                Outcome::Dropped(DropReason::IgnoredRole(role))
            }
            Step::Pending => {
                debug!(
                    outcome = "pending",
                    title_len = self.session.title().len(),
                    body_len = self.session.body().len(),
                    "notification invocation"
                );
                Outcome::Pending
            }
            Step::Complete => self.complete(),
        }
    }

    fn accumulate(&mut self, invocation: &[u8]) -> Result<Step> {
        if invocation.is_empty() {
            return Err(Error::EmptyInvocation);
        }
        let (metadata, raw_payload) = split_invocation(invocation)?;
        let meta = Metadata::parse(metadata, self.identifier_capacity);

        // Ignored roles never reach the session, not even for identifier
        // matching, and their payload is not decoded.
        let Some(slot) = meta.role.slot() else {
            return Ok(Step::Ignored(meta.role));
        };

        let text = payload::decode(raw_payload, meta.encoded, &mut self.decode_buf)?;

        if let IdentifierStatus::Rejected(id) = meta.identifier {
            debug!(
                identifier_len = id.len(),
                "rejected notification identifier; treating invocation as id-less"
            );
        }
        let reconciliation = self.session.reconcile(meta.identifier.valid());
        if reconciliation != Reconciliation::Continued {
            tracing::trace!(?reconciliation, "notification session restarted");
        }

        self.session.append(slot, text)?;

        Ok(if meta.done {
            Step::Complete
        } else {
            Step::Pending
        })
    }

    fn complete(&mut self) -> Outcome<'_> {
        let Self {
            session,
            last_command,
            ..
        } = self;
        match session.finish() {
            Some(notification) => {
                debug!(
                    outcome = "emitted",
                    title_len = notification.title().len(),
                    body_len = notification.body().len(),
                    "notification invocation"
                );
                *last_command = Some(notification.to_command());
                Outcome::Emitted(notification)
            }
            None => {
                debug!(outcome = "empty", "notification invocation");
                Outcome::Dropped(DropReason::EmptyNotification)
            }
        }
    }

    fn fail(&mut self, err: Error) -> Outcome<'static> {
        if err.kind() == ErrorKind::Capacity {
            warn!(error = %err, "notification exceeds buffer capacity; invalidating parser");
        } else {
            debug!(outcome = "failed", error_kind = %err.kind(), error = %err, "notification invocation");
        }
        self.state = ParserState::Invalid;
        Outcome::Failed(err)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_validated(&ParserConfig::default())
    }
}
