#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `bprint` provides [`PrintBuffer`], a growable and bounded text buffer that
//! accumulates formatted output piece by piece. It is the building block the
//! `logging` crate uses to assemble log lines, but it has no knowledge of
//! logging itself.
//!
//! # Design
//!
//! A buffer starts in an inline array embedded in the value, moves to a heap
//! block the first time it needs more room and doubles from there until the
//! ceiling chosen at construction. A buffer may instead wrap a caller-provided
//! slice, in which case it never grows. Once the ceiling is reached, appends
//! keep counting the logical length while dropping the bytes that no longer
//! fit, so callers can still learn how large the full output would have been.
//!
//! # Invariants
//!
//! - Capacity never exceeds the ceiling.
//! - The stored bytes are always an exact prefix of the logical content and
//!   are followed by a zero byte whenever the capacity is non-zero.
//! - Length arithmetic saturates at `usize::MAX` instead of wrapping.
//!
//! # Errors
//!
//! Appends never fail. [`PrintBuffer::grow`] and [`PrintBuffer::finalize`]
//! report [`BufferError`] values for callers that manage growth explicitly.
//!
//! # Examples
//!
//! ```
//! use std::fmt::Write as _;
//!
//! use bprint::{PrintBuffer, StorageKind};
//!
//! let mut buffer = PrintBuffer::<16>::with_inline(0, 64);
//! write!(buffer, "{} items", 3).unwrap();
//! assert_eq!(buffer.storage_kind(), StorageKind::Inline);
//!
//! buffer.append_repeated_char(b'.', 20);
//! assert_eq!(buffer.storage_kind(), StorageKind::Heap);
//! assert_eq!(buffer.len(), 27);
//!
//! let owned = buffer.into_string_lossy().unwrap();
//! assert!(owned.starts_with("3 items...."));
//! ```

mod append;
mod buffer;
mod error;
mod storage;
mod timestamp;

pub use buffer::{
    DEFAULT_INLINE_CAPACITY, PrintBuffer, SIZE_AUTOMATIC, SIZE_COUNT_ONLY, SIZE_UNLIMITED,
};
pub use error::BufferError;
pub use storage::StorageKind;
pub use timestamp::TRUNCATION_MARKER;
