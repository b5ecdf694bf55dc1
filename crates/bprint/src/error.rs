//! crates/bprint/src/error.rs
//! Failure kinds reported when a [`PrintBuffer`](crate::PrintBuffer) cannot grow.

/// Reasons a buffer refused to grow or to hand out its content.
///
/// Appends never surface these values: they absorb the failure and leave the
/// buffer truncated instead. Only [`PrintBuffer::grow`](crate::PrintBuffer::grow)
/// and [`PrintBuffer::finalize`](crate::PrintBuffer::finalize) return them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum BufferError {
    /// The buffer already reached the ceiling negotiated at construction.
    #[error("print buffer reached its maximum capacity")]
    CapacityExhausted,

    /// The buffer silently dropped data earlier; growing it now would make the
    /// truncated content look complete.
    #[error("print buffer content is already truncated")]
    AlreadyTruncated,

    /// The allocator refused the storage request.
    #[error("print buffer allocation failed")]
    AllocationFailure,
}

impl BufferError {
    /// Reports whether the failure is a hard ceiling rather than a transient
    /// allocator refusal.
    #[must_use]
    pub const fn is_ceiling(self) -> bool {
        matches!(self, Self::CapacityExhausted | Self::AlreadyTruncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_lowercase_sentences() {
        assert_eq!(
            BufferError::CapacityExhausted.to_string(),
            "print buffer reached its maximum capacity"
        );
        assert_eq!(
            BufferError::AlreadyTruncated.to_string(),
            "print buffer content is already truncated"
        );
        assert_eq!(
            BufferError::AllocationFailure.to_string(),
            "print buffer allocation failed"
        );
    }

    #[test]
    fn ceiling_classification() {
        assert!(BufferError::CapacityExhausted.is_ceiling());
        assert!(BufferError::AlreadyTruncated.is_ceiling());
        assert!(!BufferError::AllocationFailure.is_ceiling());
    }
}
