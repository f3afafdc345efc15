//! Metadata decoding for notification invocations.
//!
//! An invocation has the shape `<metadata>;<payload>`. The metadata is a
//! `:`-separated list of `key=value` pairs:
//!
//! | key | meaning                  | default |
//! |-----|--------------------------|---------|
//! | `p` | payload role             | `title` |
//! | `d` | done (`0` or `1`)        | `1`     |
//! | `e` | base64 encoded (`0`/`1`) | `0`     |
//! | `i` | session identifier       | none    |
//!
//! Malformed segments, unknown keys, unknown roles and invalid identifiers
//! never fail the invocation; each degrades to a named fallback so callers
//! can see exactly what was dropped.

use crate::error::{BufferSlot, Error, Result};

/// Longest identifier accepted by default.
pub const DEFAULT_IDENTIFIER_CAPACITY: usize = 64;

/// What the payload of an invocation contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PayloadRole {
    #[default]
    Title,
    Body,
    /// `p=close`: a control ping, never touches the session
    Close,
    /// `p=alive`: a control ping, never touches the session
    Alive,
    /// Any other value of `p`
    Unrecognized,
}

impl PayloadRole {
    #[must_use]
    pub fn from_value(value: &[u8]) -> Self {
        match value {
            b"title" => Self::Title,
            b"body" => Self::Body,
            b"close" => Self::Close,
            b"alive" => Self::Alive,
            _ => Self::Unrecognized,
        }
    }

    /// Roles that drop the invocation without any session effect.
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Close | Self::Alive | Self::Unrecognized)
    }

    /// The accumulation buffer this role appends to.
    #[must_use]
    pub const fn slot(self) -> Option<BufferSlot> {
        match self {
            Self::Title => Some(BufferSlot::Title),
            Self::Body => Some(BufferSlot::Body),
            Self::Close | Self::Alive | Self::Unrecognized => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::Close => "close",
            Self::Alive => "alive",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Outcome of looking at the `i` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierStatus<'a> {
    /// No `i` key, or an empty value
    #[default]
    Absent,
    /// A well-formed identifier
    Accepted(&'a [u8]),
    /// Present but malformed or too long; the invocation is treated as id-less
    Rejected(&'a [u8]),
}

impl<'a> IdentifierStatus<'a> {
    /// The identifier usable for session matching, if any.
    #[must_use]
    pub const fn valid(self) -> Option<&'a [u8]> {
        match self {
            Self::Accepted(id) => Some(id),
            Self::Absent | Self::Rejected(_) => None,
        }
    }
}

/// One `:`-delimited piece of metadata, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Nothing between two delimiters
    Empty,
    /// No `=` in the segment
    MissingEquals(&'a [u8]),
    /// `=` with nothing before it
    EmptyKey,
    Role(PayloadRole),
    Done(bool),
    Encoded(bool),
    Identifier(IdentifierStatus<'a>),
    UnknownKey(&'a [u8]),
}

impl Segment<'_> {
    /// Whether the segment was dropped rather than applied.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::MissingEquals(_) | Self::EmptyKey | Self::UnknownKey(_)
        )
    }
}

/// Decoded metadata for a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata<'a> {
    pub role: PayloadRole,
    pub done: bool,
    pub encoded: bool,
    pub identifier: IdentifierStatus<'a>,
}

impl Default for Metadata<'_> {
    fn default() -> Self {
        Self {
            role: PayloadRole::Title,
            done: true,
            encoded: false,
            identifier: IdentifierStatus::Absent,
        }
    }
}

impl<'a> Metadata<'a> {
    /// Decode a metadata string. Later duplicates of a key win.
    #[must_use]
    pub fn parse(metadata: &'a [u8], max_identifier_len: usize) -> Self {
        let mut result = Self::default();
        for segment in segments(metadata, max_identifier_len) {
            match segment {
                Segment::Role(role) => result.role = role,
                Segment::Done(done) => result.done = done,
                Segment::Encoded(encoded) => result.encoded = encoded,
                Segment::Identifier(status) => result.identifier = status,
                skipped => {
                    tracing::trace!(segment = ?skipped, "skipping notification metadata segment");
                }
            }
        }
        result
    }
}

/// Split an invocation at its first `;` into `(metadata, payload)`.
pub fn split_invocation(invocation: &[u8]) -> Result<(&[u8], &[u8])> {
    let idx = memchr::memchr(b';', invocation).ok_or(Error::MissingSeparator)?;
    Ok((&invocation[..idx], &invocation[idx + 1..]))
}

/// Iterate over the classified segments of a metadata string.
pub fn segments(
    metadata: &[u8],
    max_identifier_len: usize,
) -> impl Iterator<Item = Segment<'_>> + '_ {
    // `split` on an empty slice yields one empty item; skip it so empty
    // metadata yields nothing at all.
    let source = if metadata.is_empty() { None } else { Some(metadata) };
    source
        .into_iter()
        .flat_map(|m| m.split(|&b| b == b':'))
        .map(move |segment| classify_segment(segment, max_identifier_len))
}

fn classify_segment(segment: &[u8], max_identifier_len: usize) -> Segment<'_> {
    if segment.is_empty() {
        return Segment::Empty;
    }
    let Some(eq) = memchr::memchr(b'=', segment) else {
        return Segment::MissingEquals(segment);
    };
    let (key, value) = (&segment[..eq], &segment[eq + 1..]);
    match key {
        b"" => Segment::EmptyKey,
        b"p" => Segment::Role(PayloadRole::from_value(value)),
        b"d" => Segment::Done(parse_flag(value, true)),
        b"e" => Segment::Encoded(parse_flag(value, false)),
        b"i" => Segment::Identifier(classify_identifier(value, max_identifier_len)),
        _ => Segment::UnknownKey(key),
    }
}

/// Only the first byte of a flag is significant.
fn parse_flag(value: &[u8], default: bool) -> bool {
    match value.first() {
        Some(b'0') => false,
        Some(b'1') => true,
        _ => default,
    }
}

fn classify_identifier(value: &[u8], max_len: usize) -> IdentifierStatus<'_> {
    if value.is_empty() {
        IdentifierStatus::Absent
    } else if value.len() <= max_len && value.iter().copied().all(is_identifier_byte) {
        IdentifierStatus::Accepted(value)
    } else {
        IdentifierStatus::Rejected(value)
    }
}

#[must_use]
pub const fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'+' | b'.' | b':')
}
