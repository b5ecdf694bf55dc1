//! crates/logging/src/flags.rs
//! Bitfield of dispatcher behaviour switches.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Behaviour switches consulted on every log call.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LogFlags {
    bits: u32,
}

impl LogFlags {
    const fn new(bits: u32) -> Self {
        Self { bits }
    }

    /// No flags.
    pub const EMPTY: Self = Self::new(0);
    /// Collapse consecutive identical lines into a repeat counter.
    pub const SKIP_REPEATED: Self = Self::new(1 << 0);
    /// Prefix each line with `[level] `.
    pub const PRINT_LEVEL: Self = Self::new(1 << 1);

    const KNOWN_MASK: u32 = Self::SKIP_REPEATED.bits | Self::PRINT_LEVEL.bits;

    /// Builds a bitfield from raw bits, dropping unknown ones.
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self::new(bits & Self::KNOWN_MASK)
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns `true` when no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks whether every flag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Sets the flags in `other`.
    pub fn insert(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// Clears the flags in `other`.
    pub fn remove(&mut self, other: Self) {
        self.bits &= !other.bits;
    }

    /// Sets or clears `other` depending on `enabled`.
    pub fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl BitOr for LogFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.bits | rhs.bits)
    }
}

impl BitOrAssign for LogFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl BitAnd for LogFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::new(self.bits & rhs.bits)
    }
}

impl Not for LogFlags {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::new(!self.bits & Self::KNOWN_MASK)
    }
}

impl fmt::Debug for LogFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Self::SKIP_REPEATED) {
            set.entry(&"SKIP_REPEATED");
        }
        if self.contains(Self::PRINT_LEVEL) {
            set.entry(&"PRINT_LEVEL");
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_contains() {
        let flags = LogFlags::SKIP_REPEATED | LogFlags::PRINT_LEVEL;
        assert!(flags.contains(LogFlags::SKIP_REPEATED));
        assert!(flags.contains(LogFlags::PRINT_LEVEL));
        assert!(!LogFlags::EMPTY.contains(LogFlags::PRINT_LEVEL));
        assert!(LogFlags::default().is_empty());
    }

    #[test]
    fn insert_remove_and_set() {
        let mut flags = LogFlags::EMPTY;
        flags.insert(LogFlags::PRINT_LEVEL);
        flags.set(LogFlags::SKIP_REPEATED, true);
        assert_eq!(flags.bits(), 0b11);
        flags.remove(LogFlags::PRINT_LEVEL);
        assert_eq!(flags, LogFlags::SKIP_REPEATED);
        flags.set(LogFlags::SKIP_REPEATED, false);
        assert!(flags.is_empty());
    }

    #[test]
    fn truncate_drops_unknown_bits() {
        assert_eq!(LogFlags::from_bits_truncate(0xff).bits(), 0b11);
        assert_eq!(!LogFlags::PRINT_LEVEL, LogFlags::SKIP_REPEATED);
    }

    #[test]
    fn debug_lists_set_flags() {
        let rendered = format!("{:?}", LogFlags::SKIP_REPEATED | LogFlags::PRINT_LEVEL);
        assert_eq!(rendered, "{\"SKIP_REPEATED\", \"PRINT_LEVEL\"}");
    }
}
