//! Identifier-scoped accumulation of notification title and body bytes.
//!
//! A [`Session`] is owned by exactly one parser. It is created empty,
//! mutated in place by every non-ignored invocation, and reset whenever a
//! session restarts, completes with nothing to show, or emits a result.
//! Reset never frees or reallocates storage.

use crate::bounded::BoundedBuf;
use crate::error::{BufferSlot, Error, Result};
use crate::notification::Notification;

/// Default capacity of the title and body buffers.
pub const DEFAULT_BUFFER_CAPACITY: usize = 2048;

/// How an incoming identifier related to the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Same identifier on an active session
    Continued,
    /// A different identifier, or none was active
    Restarted,
    /// No usable identifier; id-less invocations always start over
    RestartedAnonymous,
}

#[derive(Debug, Clone)]
pub struct Session {
    active: bool,
    identifier: BoundedBuf,
    title: BoundedBuf,
    body: BoundedBuf,
}

impl Session {
    /// Create an inactive session.
    ///
    /// `buffer_capacity` bounds each of title and body (one byte is held in
    /// reserve, see [`BoundedBuf`]); identifiers up to
    /// `identifier_capacity` bytes are retained.
    ///
    /// # Panics
    ///
    /// Panics if `buffer_capacity` is zero. Use [`crate::Parser::new`] to
    /// build a session from an unchecked [`crate::ParserConfig`].
    #[must_use]
    pub fn new(buffer_capacity: usize, identifier_capacity: usize) -> Self {
        Self {
            active: false,
            identifier: BoundedBuf::new(identifier_capacity.saturating_add(1)),
            title: BoundedBuf::new(buffer_capacity),
            body: BoundedBuf::new(buffer_capacity),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn identifier(&self) -> &[u8] {
        self.identifier.as_slice()
    }

    #[must_use]
    pub fn title(&self) -> &[u8] {
        self.title.as_slice()
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        self.body.as_slice()
    }

    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.title.capacity()
    }

    /// Clear lengths, identifier and the active flag.
    pub fn reset(&mut self) {
        self.active = false;
        self.identifier.clear();
        self.title.clear();
        self.body.clear();
    }

    /// Match the incoming identifier against the session, restarting it
    /// when they differ.
    pub fn reconcile(&mut self, identifier: Option<&[u8]>) -> Reconciliation {
        match identifier {
            Some(id) if self.active && self.identifier == *id => Reconciliation::Continued,
            Some(id) => {
                self.reset();
                self.active = true;
                if self.identifier.replace(id).is_err() {
                    // Too long to retain; nothing can continue this session.
                    tracing::debug!(
                        identifier_len = id.len(),
                        "notification identifier exceeds capacity"
                    );
                    return Reconciliation::RestartedAnonymous;
                }
                Reconciliation::Restarted
            }
            None => {
                self.reset();
                self.active = true;
                Reconciliation::RestartedAnonymous
            }
        }
    }

    /// Append decoded payload text to the selected buffer.
    ///
    /// Fails without appending anything if the buffer would reach its
    /// capacity; text from earlier appends is kept.
    pub fn append(&mut self, slot: BufferSlot, text: &str) -> Result<()> {
        let buf = match slot {
            BufferSlot::Title => &mut self.title,
            BufferSlot::Body => &mut self.body,
        };
        buf.append(text.as_bytes()).map_err(|err| Error::CapacityExceeded {
            slot,
            len: err.len,
            additional: err.additional,
            capacity: err.capacity,
        })
    }

    /// Finalize the session and reset it.
    ///
    /// Returns `None` when nothing was accumulated. The returned view borrows
    /// the retained storage and stays valid until the session is mutated.
    pub fn finish(&mut self) -> Option<Notification<'_>> {
        self.active = false;
        self.identifier.clear();
        Notification::assemble(
            buffered_text(self.title.take()),
            buffered_text(self.body.take()),
        )
    }
}

// Title and body only ever receive whole `&str` appends, so they always hold
// complete UTF-8 sequences.
fn buffered_text(bytes: &[u8]) -> &str {
    let text = std::str::from_utf8(bytes);
    debug_assert!(text.is_ok(), "session buffer holds invalid UTF-8");
    text.unwrap_or_default()
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            DEFAULT_BUFFER_CAPACITY,
            crate::metadata::DEFAULT_IDENTIFIER_CAPACITY,
        )
    }
}
