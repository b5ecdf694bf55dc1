//! crates/logging/src/color.rs
//! Terminal color capability detection and per-segment color selection.
//!
//! Every printed segment is looked up in a fixed table through a
//! [`ColorSlot`]: slots `0..8` are severity levels (`level / 8`), slots
//! `16..16 + Category::COUNT` are emitter categories. The resulting
//! [`ColorDirective`] is then written around the segment text.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::console::{self, ConsoleAttributes};
use crate::level::Level;
use crate::source::Category;

const LEVEL_SLOTS: usize = 8;
const CATEGORY_BASE: usize = 16;
const TABLE_LEN: usize = CATEGORY_BASE + Category::COUNT;

/// ANSI table: bits 16..24 hold the 256-color background, bits 8..16 the
/// 256-color foreground, the low byte `attribute << 4 | color` for 16 colors.
const ANSI_TABLE: [u32; TABLE_LEN] = [
    52 << 16 | 196 << 8 | 0x41,
    208 << 8 | 0x41,
    196 << 8 | 0x11,
    226 << 8 | 0x03,
    253 << 8 | 0x09,
    40 << 8 | 0x02,
    34 << 8 | 0x02,
    34 << 8 | 0x07,
    0,
    0,
    0,
    0,
    0,
    0,
    0,
    0,
    250 << 8 | 0x09,
    219 << 8 | 0x15,
    201 << 8 | 0x05,
    213 << 8 | 0x15,
    207 << 8 | 0x05,
    51 << 8 | 0x16,
    39 << 8 | 0x06,
    155 << 8 | 0x12,
    192 << 8 | 0x14,
    153 << 8 | 0x14,
    147 << 8 | 0x14,
    213 << 8 | 0x15,
    207 << 8 | 0x05,
    213 << 8 | 0x15,
    207 << 8 | 0x05,
    213 << 8 | 0x15,
    207 << 8 | 0x05,
];

/// Windows console foreground attributes.
const CONSOLE_TABLE: [u8; TABLE_LEN] = [
    12, 12, 12, 14, 7, 10, 10, 8, 0, 0, 0, 0, 0, 0, 0, 0, 7, 13, 5, 13, 5, 11, 3, 10, 9, 7, 7, 13,
    5, 13, 5, 13, 5,
];

/// Index into the color tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ColorSlot(usize);

impl ColorSlot {
    /// Slot of the uncategorised context tag; also used for out-of-range
    /// lookups.
    pub const DEFAULT: Self = Self(CATEGORY_BASE);

    const INFO: Self = Self(4);

    /// Slot of a severity level, clipped to the eight level slots.
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        let index = level.split().0.raw() >> 3;
        if index < 0 {
            Self(0)
        } else if index >= LEVEL_SLOTS as i32 {
            Self(LEVEL_SLOTS - 1)
        } else {
            Self(index as usize)
        }
    }

    /// Slot of an emitter category.
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        Self(CATEGORY_BASE + category.index())
    }

    /// Wraps a raw table index. Indices past the table and the unused slots
    /// between the level and category ranges resolve to
    /// [`ColorSlot::DEFAULT`] at lookup time.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    const fn table_index(self) -> usize {
        if self.0 < LEVEL_SLOTS || (self.0 >= CATEGORY_BASE && self.0 < TABLE_LEN) {
            self.0
        } else {
            Self::DEFAULT.0
        }
    }

    const fn ansi_entry(self) -> u32 {
        ANSI_TABLE[self.table_index()]
    }

    fn console_entry(self) -> u16 {
        u16::from(CONSOLE_TABLE[self.table_index()])
    }
}

/// User preference overriding terminal detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorChoice {
    /// Detect from the environment and the output stream.
    #[default]
    Auto,
    /// Never color.
    Never,
    /// Always color with the 16-color palette (upgraded to 256 colors when the
    /// terminal advertises it).
    Always,
    /// Always color with the 256-color palette.
    Always256,
}

impl ColorChoice {
    /// Lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Never => "never",
            Self::Always => "always",
            Self::Always256 => "always256",
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a color choice cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown color choice `{0}` (expected auto, never, always or always256)")]
pub struct ParseColorChoiceError(String);

impl FromStr for ColorChoice {
    type Err = ParseColorChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "always256" => Ok(Self::Always256),
            _ => Err(ParseColorChoiceError(s.to_owned())),
        }
    }
}

/// What the output stream can display.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ColorCapability {
    /// Plain text only.
    Off,
    /// ANSI 16-color escapes.
    Ansi16,
    /// ANSI 256-color escapes.
    Ansi256,
    /// Windows console text attributes.
    Console(ConsoleAttributes),
}

/// How one segment is to be written.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ColorDirective {
    /// No decoration.
    Plain,
    /// `ESC[{attribute};3{color}m`.
    Ansi16 {
        /// SGR attribute (bold, dim, ...).
        attribute: u8,
        /// Foreground color, 0 to 15.
        color: u8,
    },
    /// `ESC[48;5;{background}m ESC[38;5;{foreground}m`.
    Ansi256 {
        /// 256-color background.
        background: u8,
        /// 256-color foreground.
        foreground: u8,
    },
    /// Console attribute applied for the write and restored afterwards.
    Console {
        /// Attribute word used while writing.
        attribute: u16,
        /// Attribute word restored afterwards.
        restore: u16,
    },
}

impl ColorDirective {
    /// Writes `text` decorated according to the directive.
    pub fn write_to<W>(self, out: &mut W, text: &[u8]) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        match self {
            Self::Plain => out.write_all(text),
            Self::Ansi16 { attribute, color } => {
                write!(out, "\x1b[{attribute};3{color}m")?;
                out.write_all(text)?;
                out.write_all(b"\x1b[0m")
            }
            Self::Ansi256 {
                background,
                foreground,
            } => {
                write!(out, "\x1b[48;5;{background}m\x1b[38;5;{foreground}m")?;
                out.write_all(text)?;
                out.write_all(b"\x1b[0m")
            }
            Self::Console { attribute, restore } => {
                out.flush()?;
                console::set_attribute(attribute);
                let written = out.write_all(text).and_then(|()| out.flush());
                console::set_attribute(restore);
                written
            }
        }
    }
}

/// Maps color slots to directives for a detected capability.
///
/// ```
/// use logging::{ColorCapability, ColorDirective, ColorSelector, ColorSlot, Level};
///
/// let selector = ColorSelector::new(ColorCapability::Ansi16);
/// let directive = selector.select(ColorSlot::for_level(Level::ERROR), 0);
/// assert_eq!(directive, ColorDirective::Ansi16 { attribute: 1, color: 1 });
/// assert_eq!(
///     selector.select(ColorSlot::for_level(Level::INFO), 0),
///     ColorDirective::Plain
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ColorSelector {
    capability: ColorCapability,
}

impl ColorSelector {
    /// Uses a known capability.
    #[must_use]
    pub const fn new(capability: ColorCapability) -> Self {
        Self { capability }
    }

    /// Detected capability.
    #[must_use]
    pub const fn capability(&self) -> ColorCapability {
        self.capability
    }

    /// Detects the capability of standard error from the process environment.
    #[must_use]
    pub fn detect(choice: ColorChoice) -> Self {
        use is_terminal::IsTerminal;

        Self::detect_with(
            choice,
            |name| std::env::var_os(name).map(|value| value.to_string_lossy().into_owned()),
            io::stderr().is_terminal(),
            console::probe(),
        )
    }

    /// Detects the capability from an explicit environment.
    ///
    /// `env` looks up a variable, `is_terminal` reports whether the output is a
    /// terminal and `console` carries the console attributes when the output
    /// is a Windows console. The rules are:
    ///
    /// - `LOG_FORCE_NOCOLOR` disables color, `LOG_FORCE_COLOR` enables it;
    ///   otherwise color is on for a console, or for a terminal with `TERM` set.
    /// - `LOG_FORCE_256COLOR`, or a `TERM` containing `256color`, upgrades to
    ///   the 256-color palette.
    /// - A console takes the attribute path whenever color is on.
    ///
    /// [`ColorChoice`] values other than `Auto` replace the first rule.
    pub fn detect_with<E>(
        choice: ColorChoice,
        env: E,
        is_terminal: bool,
        console: Option<ConsoleAttributes>,
    ) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let term = env("TERM");
        let enabled = match choice {
            ColorChoice::Never => false,
            ColorChoice::Always | ColorChoice::Always256 => true,
            ColorChoice::Auto => {
                if env("LOG_FORCE_NOCOLOR").is_some() {
                    false
                } else if env("LOG_FORCE_COLOR").is_some() {
                    true
                } else if console.is_some() {
                    true
                } else {
                    term.is_some() && is_terminal
                }
            }
        };
        if !enabled {
            return Self::new(ColorCapability::Off);
        }
        if let Some(attributes) = console {
            return Self::new(ColorCapability::Console(attributes));
        }

        let wide = choice == ColorChoice::Always256
            || env("LOG_FORCE_256COLOR").is_some()
            || term.is_some_and(|term| term.contains("256color"));
        Self::new(if wide {
            ColorCapability::Ansi256
        } else {
            ColorCapability::Ansi16
        })
    }

    /// Chooses the directive for one segment.
    ///
    /// `tint` is a 256-color foreground that replaces the table foreground on
    /// 256-color terminals; `0` means no tint. The `info` level slot is never
    /// colored.
    #[must_use]
    pub fn select(&self, slot: ColorSlot, tint: u8) -> ColorDirective {
        if slot == ColorSlot::INFO {
            return ColorDirective::Plain;
        }
        let entry = slot.ansi_entry();
        match self.capability {
            ColorCapability::Off => ColorDirective::Plain,
            ColorCapability::Ansi16 => ColorDirective::Ansi16 {
                attribute: ((entry >> 4) & 15) as u8,
                color: (entry & 15) as u8,
            },
            ColorCapability::Ansi256 => ColorDirective::Ansi256 {
                background: ((entry >> 16) & 0xff) as u8,
                foreground: if tint == 0 {
                    ((entry >> 8) & 0xff) as u8
                } else {
                    tint
                },
            },
            ColorCapability::Console(attributes) => ColorDirective::Console {
                attribute: attributes.background() | slot.console_entry(),
                restore: attributes.original(),
            },
        }
    }
}

impl Default for ColorSelector {
    fn default() -> Self {
        Self::new(ColorCapability::Off)
    }
}
