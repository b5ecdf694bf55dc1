//! crates/bprint/src/storage.rs
//! Backing storage variants for a print buffer.

/// Where the bytes of a [`PrintBuffer`](crate::PrintBuffer) currently live.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StorageKind {
    /// Fixed array embedded in the buffer value itself.
    Inline,
    /// Heap block owned by the buffer.
    Heap,
    /// Caller-provided slice; never grows.
    External,
}

/// Storage owned (or borrowed) by a buffer.
///
/// The inline array is only ever replaced by a heap block, never the other
/// way round. A heap block always has `len() == capacity`; bytes past the
/// terminator are unspecified.
pub(crate) enum Storage<'a, const N: usize> {
    Inline([u8; N]),
    Heap(Vec<u8>),
    External(&'a mut [u8]),
}

impl<const N: usize> Storage<'_, N> {
    pub(crate) const fn kind(&self) -> StorageKind {
        match self {
            Self::Inline(_) => StorageKind::Inline,
            Self::Heap(_) => StorageKind::Heap,
            Self::External(_) => StorageKind::External,
        }
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Self::Inline(seed) => seed,
            Self::Heap(block) => block,
            Self::External(slice) => slice,
        }
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Inline(seed) => seed,
            Self::Heap(block) => block,
            Self::External(slice) => slice,
        }
    }
}
