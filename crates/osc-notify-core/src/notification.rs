//! Results produced by the notification parser.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::metadata::PayloadRole;

/// A finished notification, borrowed from the parser's session buffers.
///
/// The view is valid until the next call into the parser. Use
/// [`Notification::to_command`] to keep it longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

impl<'a> Notification<'a> {
    /// Build a notification from accumulated text.
    ///
    /// A notification with only a body is promoted: the body becomes the
    /// title and the body is left empty. Returns `None` when both are empty.
    #[must_use]
    pub fn assemble(title: &'a str, body: &'a str) -> Option<Self> {
        match (title.is_empty(), body.is_empty()) {
            (true, true) => None,
            (true, false) => Some(Self { title: body, body: "" }),
            _ => Some(Self { title, body }),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'a str {
        self.title
    }

    #[must_use]
    pub fn body(&self) -> &'a str {
        self.body
    }

    #[must_use]
    pub fn to_command(&self) -> Command {
        Command::ShowDesktopNotification {
            title: self.title.to_owned(),
            body: self.body.to_owned(),
        }
    }
}

/// Commands handed to downstream collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    ShowDesktopNotification { title: String, body: String },
}

/// Why an invocation finished without a result or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// `close`, `alive` or an unknown role; the session was not touched
    IgnoredRole(PayloadRole),
    /// Completion was signalled with nothing accumulated
    EmptyNotification,
}

/// What a single invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Bytes were accumulated; waiting for more chunks
    Pending,
    /// Intentionally a no-op
    Dropped(DropReason),
    /// A finished notification
    Emitted(Notification<'a>),
    /// The parser is now invalid
    Failed(Error),
}

impl<'a> Outcome<'a> {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }

    #[must_use]
    pub fn notification(&self) -> Option<Notification<'a>> {
        match self {
            Self::Emitted(notification) => Some(*notification),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(Error::kind)
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dropped(DropReason::IgnoredRole(_)) => "ignored",
            Self::Dropped(DropReason::EmptyNotification) => "empty",
            Self::Emitted(_) => "emitted",
            Self::Failed(_) => "failed",
        }
    }
}
