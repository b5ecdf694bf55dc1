#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns `format!`-style calls into leveled console lines. Each call
//! carries an optional [`Source`] (a name and a [`Category`]), a [`Level`] and
//! the message arguments. Accepted calls are printed to standard error as
//! `[name] [level] message`, colored when the terminal supports it, with
//! consecutive identical lines collapsed into a repeat counter.
//!
//! # Design
//!
//! - [`LineFormatter`] renders a call into four [`LineSegments`] held in
//!   [`bprint::PrintBuffer`]s: a reserved segment, the context tag, the level
//!   tag and the body.
//! - [`ConsoleDispatcher`] owns the shared state (threshold, [`LogFlags`],
//!   repeat counter, color cache) and writes the segments through a
//!   [`ColorSelector`].
//! - [`Logger`] routes calls either to its dispatcher or to a replacement
//!   [`LogSink`]; [`global()`] is the process-wide instance behind the
//!   [`log!`] family of macros.
//! - [`LogConfig`] collects threshold, flags and color preference and can be
//!   read from the `LOG_LEVEL` and `LOG_COLOR` environment variables.
//!
//! # Invariants
//!
//! - Calls less severe than the threshold never take the dispatcher lock.
//! - Output of concurrent calls is never interleaved.
//! - Control bytes other than `\b`, `\t`, `\n`, `\v`, `\f` and `\r` are
//!   printed as `?`.
//! - Logging never fails: truncated lines are still printed and write errors
//!   are ignored.
//!
//! # Errors
//!
//! Only configuration parsing reports errors: [`ParseLevelError`],
//! [`ParseColorChoiceError`] and [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use std::io::{self, Write};
//! use std::sync::{Arc, Mutex};
//!
//! use logging::{ConsoleDispatcher, Level, LogConfig, LogFlags, Logger, Source};
//!
//! #[derive(Clone, Default)]
//! struct Shared(Arc<Mutex<Vec<u8>>>);
//!
//! impl Write for Shared {
//!     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
//!         self.0.lock().unwrap().write(buf)
//!     }
//!     fn flush(&mut self) -> io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let config = LogConfig {
//!     flags: LogFlags::PRINT_LEVEL,
//!     ..LogConfig::default()
//! };
//! let output = Shared::default();
//! let logger = Logger::with_dispatcher(ConsoleDispatcher::with_writer(&config, output.clone(), false));
//!
//! let source = Source::new("demux");
//! logger.log(Some(&source), Level::WARNING, format_args!("{} packets dropped\n", 3));
//! logger.log(Some(&source), Level::DEBUG, format_args!("not shown\n"));
//!
//! let text = String::from_utf8(output.0.lock().unwrap().clone()).unwrap();
//! assert_eq!(text, "[demux] [warning] 3 packets dropped\n");
//! ```
//!
//! # See also
//!
//! - [`bprint`] for the buffer used to assemble lines.
//! - `tracing_bridge` (feature `tracing`) to route `tracing` events here.

mod color;
mod config;
mod console;
mod dispatch;
mod flags;
mod format;
mod level;
mod logger;
mod macros;
mod sink;
mod source;
#[cfg(feature = "tracing")]
pub mod tracing_bridge;

pub use color::{
    ColorCapability, ColorChoice, ColorDirective, ColorSelector, ColorSlot, ParseColorChoiceError,
};
pub use config::{COLOR_ENV, ConfigError, LEVEL_ENV, LogConfig};
pub use console::ConsoleAttributes;
pub use dispatch::{ConsoleDispatcher, LINE_CAPACITY};
pub use flags::LogFlags;
pub use format::{
    BODY_CAPACITY_MAX, BODY_SEGMENT, CONTEXT_SEGMENT, LEVEL_SEGMENT, LineFormatter, LineSegments,
    RESERVED_SEGMENT, SEGMENT_COUNT, sanitize,
};
pub use level::{Level, ParseLevelError};
pub use logger::{Logger, global};
pub use sink::LogSink;
pub use source::{Category, Source};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{DispatchLayer, init_tracing, init_tracing_with_filter};
