//! Fixed-capacity byte buffer with manual length tracking.
//!
//! Storage is allocated once when the buffer is created and is never grown
//! or reallocated afterwards. Clearing only resets the logical length, so the
//! bytes of the previous contents remain in place until they are overwritten
//! by a later append.
//!
//! The last byte of the capacity is always held in reserve: an append that
//! would make the length *reach* the capacity is refused, so at most
//! `capacity - 1` bytes are ever stored.

/// Rejected append, describing the buffer at the time of the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    pub len: usize,
    pub additional: usize,
    pub capacity: usize,
}

impl std::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} + {} bytes reaches capacity {}",
            self.len, self.additional, self.capacity
        )
    }
}

impl std::error::Error for CapacityError {}

/// A byte buffer that never reallocates.
///
/// # Example
///
/// ```
/// use osc_notify_core::bounded::{BoundedBuf, CapacityError};
///
/// # fn main() -> Result<(), CapacityError> {
/// let mut buf = BoundedBuf::new(8);
/// buf.append(b"kitty")?;
/// assert!(buf.append(b"cat").is_err()); // 5 + 3 reaches 8
/// assert_eq!(buf.take(), b"kitty");
/// assert!(buf.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BoundedBuf {
    storage: Box<[u8]>,
    len: usize,
}

impl BoundedBuf {
    /// Create a buffer with `capacity` bytes of backing storage.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Current logical length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the backing storage, including the reserved byte.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Largest number of bytes the buffer will hold.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.storage.len() - 1
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Append `bytes`, refusing the whole append if the resulting length
    /// would reach the capacity. An empty append always succeeds.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let new_len = self.len.saturating_add(bytes.len());
        if new_len >= self.storage.len() {
            return Err(CapacityError {
                len: self.len,
                additional: bytes.len(),
                capacity: self.storage.len(),
            });
        }
        self.storage[self.len..new_len].copy_from_slice(bytes);
        self.len = new_len;
        Ok(())
    }

    /// Replace the contents with `bytes`.
    ///
    /// On failure the buffer is left empty.
    pub fn replace(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        self.clear();
        self.append(bytes)
    }

    /// Reset the logical length. Storage is retained.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Reset the logical length and hand back a view of what was stored.
    ///
    /// The returned slice stays valid until the buffer is next mutated.
    pub fn take(&mut self) -> &[u8] {
        let len = std::mem::replace(&mut self.len, 0);
        &self.storage[..len]
    }
}

impl std::fmt::Debug for BoundedBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedBuf")
            .field("len", &self.len)
            .field("capacity", &self.storage.len())
            .field("contents", &String::from_utf8_lossy(self.as_slice()))
            .finish()
    }
}

impl PartialEq<[u8]> for BoundedBuf {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}
