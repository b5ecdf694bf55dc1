//! crates/logging/src/level.rs
//! Severity levels and their textual names.

use std::fmt;
use std::str::FromStr;

/// Severity of a log call.
///
/// Levels are plain integers spaced eight apart so that intermediate values
/// remain meaningful. For non-negative values the low byte is the severity
/// and the next byte an optional 256-color tint (see [`Level::with_tint`]).
/// Lower values are more severe.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Level(i32);

impl Level {
    /// Print nothing.
    pub const QUIET: Self = Self(-8);
    /// Something went wrong and the process is about to abort.
    pub const PANIC: Self = Self(0);
    /// Unrecoverable error.
    pub const FATAL: Self = Self(8);
    /// Recoverable error.
    pub const ERROR: Self = Self(16);
    /// Something looks wrong and may lead to problems.
    pub const WARNING: Self = Self(24);
    /// Standard information.
    pub const INFO: Self = Self(32);
    /// Detailed information.
    pub const VERBOSE: Self = Self(40);
    /// Information only useful to developers.
    pub const DEBUG: Self = Self(48);
    /// Extremely verbose debugging.
    pub const TRACE: Self = Self(56);
    /// Upper bound of the range left for caller-defined levels.
    pub const MAX_OFFSET: Self = Self(64);

    const NAMED: [(Self, &'static str); 9] = [
        (Self::QUIET, "quiet"),
        (Self::PANIC, "panic"),
        (Self::FATAL, "fatal"),
        (Self::ERROR, "error"),
        (Self::WARNING, "warning"),
        (Self::INFO, "info"),
        (Self::VERBOSE, "verbose"),
        (Self::DEBUG, "debug"),
        (Self::TRACE, "trace"),
    ];

    /// Wraps a raw level value.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw value, tint included.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns this level carrying a 256-color foreground tint.
    ///
    /// Negative levels cannot carry a tint and are returned unchanged.
    ///
    /// ```
    /// use logging::Level;
    ///
    /// let tinted = Level::ERROR.with_tint(202);
    /// assert_eq!(tinted.split(), (Level::ERROR, 202));
    /// ```
    #[must_use]
    pub const fn with_tint(self, tint: u8) -> Self {
        if self.0 < 0 {
            return self;
        }
        Self((self.0 & 0xff) | ((tint as i32) << 8))
    }

    /// Separates the severity from its tint.
    ///
    /// Negative levels have no tint. Bits above the tint byte are discarded.
    #[must_use]
    pub const fn split(self) -> (Self, u8) {
        if self.0 < 0 {
            return (self, 0);
        }
        (Self(self.0 & 0xff), ((self.0 >> 8) & 0xff) as u8)
    }

    /// Returns the name printed in the level tag, or `""` for levels
    /// between the named ones.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|(level, _)| *level == self)
            .map_or("", |&(_, name)| name)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            "" => write!(f, "{}", self.0),
            name => f.write_str(name),
        }
    }
}

/// Error returned when a level name cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown log level `{input}`")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts a level name (case-insensitive) or a decimal integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((level, _)) = Self::NAMED
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(*level);
        }
        trimmed.parse::<i32>().map(Self).map_err(|_| ParseLevelError {
            input: s.to_owned(),
        })
    }
}
