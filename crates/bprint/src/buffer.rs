//! crates/bprint/src/buffer.rs
//! The [`PrintBuffer`] type: construction, growth, queries and finalisation.

use std::borrow::Cow;
use std::fmt;

use crate::error::BufferError;
use crate::storage::{Storage, StorageKind};

/// Inline capacity used by [`PrintBuffer::new`].
pub const DEFAULT_INLINE_CAPACITY: usize = 1000;

/// Ceiling meaning "grow without limit".
pub const SIZE_UNLIMITED: usize = usize::MAX;

/// Ceiling meaning "never leave the inline storage".
pub const SIZE_AUTOMATIC: usize = 1;

/// Ceiling meaning "store nothing, only count the logical length".
pub const SIZE_COUNT_ONLY: usize = 0;

/// Growable, bounded, NUL-terminated byte buffer.
///
/// The buffer starts in an inline array of `N` bytes embedded in the value and
/// moves to the heap the first time an append needs more room. Growth doubles
/// the capacity until the ceiling chosen at construction; after that, appends
/// keep counting the logical length but stop writing bytes.
///
/// # Invariants
///
/// - `capacity() <= capacity_max()`.
/// - The first `min(len(), capacity() - 1)` bytes are exactly the logical
///   content, followed by a zero byte whenever `capacity() > 0`.
/// - A non-empty buffer that is not [complete](Self::is_complete) never grows
///   again.
///
/// # Examples
///
/// ```
/// use bprint::PrintBuffer;
///
/// let mut buffer = PrintBuffer::<4>::with_inline(0, 16);
/// buffer.append_raw(b"hello");
/// buffer.append_raw(b"world!");
/// assert_eq!(buffer.as_bytes(), b"helloworld!");
/// assert!(buffer.is_complete());
///
/// buffer.append_raw(b"0123456789");
/// assert_eq!(buffer.as_bytes(), b"helloworld!0123");
/// assert_eq!(buffer.len(), 21);
/// assert!(!buffer.is_complete());
/// ```
pub struct PrintBuffer<'a, const N: usize = DEFAULT_INLINE_CAPACITY> {
    storage: Storage<'a, N>,
    len: usize,
    capacity: usize,
    capacity_max: usize,
}

impl PrintBuffer<'static> {
    /// Creates a buffer seeded with [`DEFAULT_INLINE_CAPACITY`] inline bytes.
    ///
    /// `size_init` pre-allocates when it exceeds the inline capacity;
    /// `size_max` is the ceiling, where [`SIZE_AUTOMATIC`] pins the buffer to
    /// its inline storage and [`SIZE_UNLIMITED`] removes the limit.
    #[must_use]
    pub fn new(size_init: usize, size_max: usize) -> Self {
        Self::with_inline(size_init, size_max)
    }

    /// Creates a buffer that never leaves its inline storage.
    #[must_use]
    pub fn automatic() -> Self {
        Self::new(0, SIZE_AUTOMATIC)
    }

    /// Creates a buffer without a ceiling.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(0, SIZE_UNLIMITED)
    }
}

impl<const N: usize> PrintBuffer<'static, N> {
    /// Creates a buffer with an explicit inline capacity of `N` bytes.
    #[must_use]
    pub fn with_inline(size_init: usize, size_max: usize) -> Self {
        let size_max = if size_max == SIZE_AUTOMATIC { N } else { size_max };
        let mut buffer = Self {
            storage: Storage::Inline([0; N]),
            len: 0,
            capacity: N.min(size_max),
            capacity_max: size_max,
        };
        if size_init > buffer.capacity {
            // A failed pre-allocation only means later appends grow lazily.
            let _ = buffer.grow(size_init - 1);
        }
        buffer
    }
}

impl<'a> PrintBuffer<'a, 0> {
    /// Wraps caller-provided storage. The buffer never grows past `buffer.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bprint::PrintBuffer;
    ///
    /// let mut storage = [0xffu8; 8];
    /// let mut buffer = PrintBuffer::for_buffer(&mut storage);
    /// buffer.append_raw(b"truncated");
    /// assert_eq!(buffer.as_bytes(), b"truncat");
    /// assert_eq!(buffer.len(), 9);
    /// drop(buffer);
    /// assert_eq!(&storage, b"truncat\0");
    /// ```
    #[must_use]
    pub fn for_buffer(buffer: &'a mut [u8]) -> Self {
        let capacity = buffer.len();
        if let Some(first) = buffer.first_mut() {
            *first = 0;
        }
        Self {
            storage: Storage::External(buffer),
            len: 0,
            capacity,
            capacity_max: capacity,
        }
    }
}

impl<const N: usize> PrintBuffer<'_, N> {
    /// Logical length: every byte ever appended, including the ones that did
    /// not fit.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing has been appended since the last clear.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current storage size, terminator slot included.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ceiling negotiated at construction.
    #[must_use]
    pub const fn capacity_max(&self) -> usize {
        self.capacity_max
    }

    /// Reports whether the stored bytes are the whole logical content.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.len < self.capacity
    }

    /// Where the bytes currently live.
    #[must_use]
    pub const fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    /// Stored content without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.content()[..self.stored_len()]
    }

    /// Stored content followed by its zero terminator. Empty for a
    /// count-only buffer.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.capacity == 0 {
            return &[];
        }
        &self.content()[..=self.stored_len()]
    }

    /// Mutable view of the stored content, used for in-place rewriting such
    /// as control character sanitisation.
    #[must_use]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let end = self.stored_len();
        &mut self.content_mut()[..end]
    }

    /// Stored content decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Last logical byte, available only while the buffer is complete.
    #[must_use]
    pub fn last_byte(&self) -> Option<u8> {
        if self.is_complete() && self.len > 0 {
            self.content().get(self.len - 1).copied()
        } else {
            None
        }
    }

    /// Enlarges the storage so that at least `room` more bytes fit.
    ///
    /// The new capacity is the larger of the doubled capacity and the size
    /// needed for the request, both capped at the ceiling. Inline content is
    /// copied into the new heap block on the first growth.
    pub fn grow(&mut self, room: usize) -> Result<(), BufferError> {
        if self.capacity == self.capacity_max {
            return Err(BufferError::CapacityExhausted);
        }
        // An empty buffer with no storage yet has lost nothing.
        if self.len > 0 && !self.is_complete() {
            return Err(BufferError::AlreadyTruncated);
        }

        let min_size = self.len.saturating_add(1).saturating_add(room);
        let mut new_size = if self.capacity > self.capacity_max / 2 {
            self.capacity_max
        } else {
            self.capacity * 2
        };
        if new_size < min_size {
            new_size = self.capacity_max.min(min_size);
        }

        self.reallocate(new_size)?;
        self.capacity = new_size;
        Ok(())
    }

    fn reallocate(&mut self, new_size: usize) -> Result<(), BufferError> {
        // Content and terminator fit in `len + 1`; zero-sized storage holds neither.
        let used = (self.len + 1).min(self.capacity);
        match &mut self.storage {
            Storage::Heap(block) => {
                block
                    .try_reserve_exact(new_size - block.len())
                    .map_err(|_| BufferError::AllocationFailure)?;
                block.resize(new_size, 0);
            }
            Storage::Inline(seed) => {
                let mut block = Vec::new();
                block
                    .try_reserve_exact(new_size)
                    .map_err(|_| BufferError::AllocationFailure)?;
                block.extend_from_slice(&seed[..used]);
                block.resize(new_size, 0);
                self.storage = Storage::Heap(block);
            }
            Storage::External(_) => return Err(BufferError::CapacityExhausted),
        }
        Ok(())
    }

    /// Resets the logical length to zero. Heap storage is kept for reuse.
    pub fn clear(&mut self) {
        if self.len > 0 {
            self.len = 0;
            self.terminate();
        }
    }

    /// Returns the free region after the content, growing first when it is
    /// smaller than `size`.
    ///
    /// The region may still be shorter than `size` once the ceiling is
    /// reached. Its last byte is the terminator slot. After writing, call
    /// [`commit`](Self::commit) with the number of bytes produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use bprint::PrintBuffer;
    ///
    /// let mut buffer = PrintBuffer::new(0, 64);
    /// let region = buffer.reserve_write_region(4);
    /// region[..4].copy_from_slice(b"data");
    /// buffer.commit(4);
    /// assert_eq!(buffer.as_bytes(), b"data");
    /// ```
    pub fn reserve_write_region(&mut self, size: usize) -> &mut [u8] {
        if size > self.room() {
            let _ = self.grow(size);
        }
        self.free_region()
    }

    /// Accounts for `written` bytes placed directly into the region returned
    /// by [`reserve_write_region`](Self::reserve_write_region).
    pub fn commit(&mut self, written: usize) {
        self.advance(written);
    }

    /// Ends the buffer's life.
    ///
    /// With `want_ownership` the stored content is returned as an exactly
    /// sized vector (the terminator is not included); heap blocks are shrunk
    /// in place, inline and external content is copied. Without it, storage is
    /// released and `Ok(None)` is returned.
    pub fn finalize(self, want_ownership: bool) -> Result<Option<Vec<u8>>, BufferError> {
        if !want_ownership {
            return Ok(None);
        }

        let used = self.stored_len();
        match self.storage {
            Storage::Heap(mut block) => {
                block.truncate(used);
                block.shrink_to_fit();
                Ok(Some(block))
            }
            storage => {
                let mut owned = Vec::new();
                owned
                    .try_reserve_exact(used)
                    .map_err(|_| BufferError::AllocationFailure)?;
                owned.extend_from_slice(&storage.bytes()[..used]);
                Ok(Some(owned))
            }
        }
    }

    /// Finalises the buffer and takes ownership of its content.
    pub fn into_bytes(self) -> Result<Vec<u8>, BufferError> {
        self.finalize(true).map(Option::unwrap_or_default)
    }

    /// Finalises the buffer into a `String`, replacing invalid UTF-8.
    pub fn into_string_lossy(self) -> Result<String, BufferError> {
        let bytes = self.into_bytes()?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// Finalises the buffer without keeping its content.
    pub fn dispose(self) {
        let _ = self.finalize(false);
    }

    pub(crate) fn room(&self) -> usize {
        self.capacity - self.len.min(self.capacity)
    }

    pub(crate) fn free_region(&mut self) -> &mut [u8] {
        let start = self.len.min(self.capacity);
        &mut self.content_mut()[start..]
    }

    /// Adds `extra` to the logical length and re-terminates.
    pub(crate) fn advance(&mut self, extra: usize) {
        self.len = self.len.saturating_add(extra);
        self.terminate();
    }

    fn terminate(&mut self) {
        if self.capacity > 0 {
            let end = self.stored_len();
            self.content_mut()[end] = 0;
        }
    }

    fn stored_len(&self) -> usize {
        self.len.min(self.capacity.saturating_sub(1))
    }

    fn content(&self) -> &[u8] {
        &self.storage.bytes()[..self.capacity]
    }

    fn content_mut(&mut self) -> &mut [u8] {
        let capacity = self.capacity;
        &mut self.storage.bytes_mut()[..capacity]
    }
}

impl<const N: usize> fmt::Debug for PrintBuffer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintBuffer")
            .field("content", &self.to_string_lossy())
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("capacity_max", &self.capacity_max)
            .field("storage", &self.storage_kind())
            .finish()
    }
}

impl<const N: usize> fmt::Display for PrintBuffer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Default for PrintBuffer<'static> {
    fn default() -> Self {
        Self::automatic()
    }
}
