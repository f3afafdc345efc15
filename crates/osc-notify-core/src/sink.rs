//! Byte sink shared with the upstream escape-sequence tokenizer.
//!
//! The tokenizer pushes the raw bytes of one sequence into a
//! [`ScratchBuffer`], then calls [`ScratchBuffer::terminate`] to append the
//! zero-byte sentinel. The parser reads the bytes back through
//! [`ScratchBuffer::invocation`], which strips the sentinel again; nothing
//! past this module ever sees it.

use crate::error::{Error, Result};

/// Marker byte placed after the last byte of an invocation.
pub const SENTINEL: u8 = 0;

/// Default capacity of a scratch buffer, sentinel included.
pub const DEFAULT_SINK_CAPACITY: usize = 4096;

/// Fixed-capacity scratch space for a single invocation.
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    buf: Vec<u8>,
    capacity: usize,
    terminated: bool,
    overflowed: bool,
}

impl ScratchBuffer {
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            terminated: false,
            overflowed: false,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes pushed so far, sentinel included once terminated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether any push was refused since the last clear.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Push one byte. Returns `false` and drops the byte when full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.terminated || self.buf.len() >= self.capacity {
            self.overflowed = true;
            return false;
        }
        self.buf.push(byte);
        true
    }

    /// Push a run of bytes, stopping at the first one that does not fit.
    /// Returns the number of bytes accepted.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().take_while(|&&b| self.push(b)).count()
    }

    /// Append the sentinel. Fails when there is no room left for it.
    pub fn terminate(&mut self) -> Result<()> {
        if self.terminated {
            return Ok(());
        }
        if !self.push(SENTINEL) {
            return Err(Error::MissingSentinel);
        }
        self.terminated = true;
        Ok(())
    }

    /// The invocation bytes with the sentinel stripped.
    pub fn invocation(&self) -> Result<&[u8]> {
        match self.buf.split_last() {
            Some((&SENTINEL, rest)) if self.terminated => Ok(rest),
            _ => Err(Error::MissingSentinel),
        }
    }

    /// Forget the current invocation. Storage is retained.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.terminated = false;
        self.overflowed = false;
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SINK_CAPACITY)
    }
}
