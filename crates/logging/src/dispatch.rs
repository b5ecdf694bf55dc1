//! crates/logging/src/dispatch.rs
//! The default console sink: filtering, repeat suppression and colored output.
//!
//! A [`ConsoleDispatcher`] owns every piece of shared logging state. The
//! threshold and flags are atomics so that rejected calls never take the lock;
//! everything else (the output stream, the color cache, the repeat counter and
//! the `print_prefix` flag) lives behind one mutex held for the whole
//! format, compare and write sequence of a call. Output of concurrent callers
//! is therefore never interleaved.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bprint::PrintBuffer;

use crate::color::{ColorChoice, ColorSelector, ColorSlot};
use crate::config::LogConfig;
use crate::flags::LogFlags;
use crate::format::{BODY_SEGMENT, CONTEXT_SEGMENT, LEVEL_SEGMENT, LineFormatter, RESERVED_SEGMENT};
use crate::level::Level;
use crate::sink::LogSink;
use crate::source::{Category, Source};

/// Size of the flattened line used for repeat detection, terminator included.
pub const LINE_CAPACITY: usize = 1024;

enum Output {
    Stderr,
    Writer(Box<dyn Write + Send>),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr => io::stderr().lock().write(buf),
            Self::Writer(writer) => writer.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Stderr => io::stderr().lock().write_all(buf),
            Self::Writer(writer) => writer.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr => io::stderr().lock().flush(),
            Self::Writer(writer) => writer.flush(),
        }
    }
}

struct DispatchState {
    output: Output,
    is_terminal: Option<bool>,
    color_choice: ColorChoice,
    color: Option<ColorSelector>,
    print_prefix: bool,
    repeat_count: u64,
    previous: Vec<u8>,
}

impl DispatchState {
    fn new(output: Output, is_terminal: Option<bool>, color_choice: ColorChoice) -> Self {
        Self {
            output,
            is_terminal,
            color_choice,
            color: None,
            print_prefix: true,
            repeat_count: 0,
            previous: Vec::with_capacity(LINE_CAPACITY),
        }
    }

    fn is_terminal(&mut self) -> bool {
        *self.is_terminal.get_or_insert_with(|| {
            use is_terminal::IsTerminal;
            io::stderr().is_terminal()
        })
    }

    /// Detected once, on the first call that actually prints.
    fn color(&mut self) -> ColorSelector {
        if let Some(selector) = self.color {
            return selector;
        }
        let selector = if matches!(self.output, Output::Stderr) {
            ColorSelector::detect(self.color_choice)
        } else {
            let is_terminal = self.is_terminal();
            ColorSelector::detect_with(
                self.color_choice,
                |name| std::env::var_os(name).map(|value| value.to_string_lossy().into_owned()),
                is_terminal,
                None,
            )
        };
        self.color = Some(selector);
        selector
    }
}

/// Default log sink writing to standard error or an injected writer.
///
/// Each accepted call runs these steps under the dispatcher lock:
///
/// 1. format the four segments and flatten them into a [`LINE_CAPACITY`]
///    byte line;
/// 2. with [`LogFlags::SKIP_REPEATED`], a line identical to the
///    previous one (non-empty and not ending in `\r`) only bumps a counter,
///    echoed as `"    Last message repeated N times\r"` on terminals;
/// 3. otherwise a pending count is flushed as
///    `"    Last message repeated N times\n"`, the line is remembered, the
///    segments are sanitized and written with their colors.
///
/// Write errors are ignored: logging never fails.
///
/// ```
/// use std::io::{self, Write};
/// use std::sync::{Arc, Mutex};
///
/// use logging::{ConsoleDispatcher, Level, LogConfig, LogSink};
///
/// #[derive(Clone, Default)]
/// struct Shared(Arc<Mutex<Vec<u8>>>);
///
/// impl Write for Shared {
///     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
///         self.0.lock().unwrap().write(buf)
///     }
///     fn flush(&mut self) -> io::Result<()> {
///         Ok(())
///     }
/// }
///
/// let output = Shared::default();
/// let dispatcher = ConsoleDispatcher::with_writer(&LogConfig::default(), output.clone(), false);
/// dispatcher.log(None, Level::INFO, format_args!("ready\n"));
/// dispatcher.log(None, Level::DEBUG, format_args!("hidden\n"));
/// assert_eq!(output.0.lock().unwrap().as_slice(), b"ready\n");
/// ```
pub struct ConsoleDispatcher {
    threshold: AtomicI32,
    flags: AtomicU32,
    state: Mutex<DispatchState>,
}

impl ConsoleDispatcher {
    /// Creates a dispatcher writing to standard error.
    #[must_use]
    pub fn new(config: &LogConfig) -> Self {
        Self::from_parts(config, Output::Stderr, None)
    }

    /// Creates a dispatcher writing to `writer`.
    ///
    /// `is_terminal` decides whether repeat counters are echoed with `\r` and
    /// feeds color detection under [`ColorChoice::Auto`].
    #[must_use]
    pub fn with_writer<W>(config: &LogConfig, writer: W, is_terminal: bool) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_parts(config, Output::Writer(Box::new(writer)), Some(is_terminal))
    }

    fn from_parts(config: &LogConfig, output: Output, is_terminal: Option<bool>) -> Self {
        Self {
            threshold: AtomicI32::new(config.level.raw()),
            flags: AtomicU32::new(config.flags.bits()),
            state: Mutex::new(DispatchState::new(output, is_terminal, config.color)),
        }
    }

    /// Pins the color selector instead of detecting it on first output.
    #[must_use]
    pub fn with_color_selector(self, selector: ColorSelector) -> Self {
        self.lock().color = Some(selector);
        self
    }

    /// Current threshold; calls above it are dropped.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_raw(self.threshold.load(Ordering::Relaxed))
    }

    /// Replaces the threshold.
    pub fn set_level(&self, level: Level) {
        self.threshold.store(level.raw(), Ordering::Relaxed);
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> LogFlags {
        LogFlags::from_bits_truncate(self.flags.load(Ordering::Relaxed))
    }

    /// Replaces the flags.
    pub fn set_flags(&self, flags: LogFlags) {
        self.flags.store(flags.bits(), Ordering::Relaxed);
    }

    /// Replaces the color preference. Detection runs again on the next
    /// printed line.
    pub fn set_color_choice(&self, choice: ColorChoice) {
        let mut state = self.lock();
        state.color_choice = choice;
        state.color = None;
    }

    /// Formats and emits one call.
    pub fn dispatch(&self, source: Option<&Source<'_>>, level: Level, args: fmt::Arguments<'_>) {
        let (severity, tint) = level.split();
        if severity > self.level() {
            return;
        }

        let mut state = self.lock();
        let flags = self.flags();
        let mut segments =
            LineFormatter::new(flags).format(source, severity, args, &mut state.print_prefix);

        let mut storage = [0u8; LINE_CAPACITY];
        let mut line = PrintBuffer::for_buffer(&mut storage);
        segments.flatten_into(&mut line);
        let line = line.as_bytes();

        if state.print_prefix
            && flags.contains(LogFlags::SKIP_REPEATED)
            && !line.is_empty()
            && line.last() != Some(&b'\r')
            && line == state.previous.as_slice()
        {
            state.repeat_count += 1;
            if state.is_terminal() {
                let count = state.repeat_count;
                let _ = write!(state.output, "    Last message repeated {count} times\r");
                let _ = state.output.flush();
            }
            return;
        }

        if state.repeat_count > 0 {
            let count = state.repeat_count;
            let _ = writeln!(state.output, "    Last message repeated {count} times");
            state.repeat_count = 0;
        }
        state.previous.clear();
        state.previous.extend_from_slice(line);

        segments.sanitize();
        let selector = state.color();
        let context_slot = ColorSlot::for_category(source.map_or(Category::Na, Source::category));
        let level_slot = ColorSlot::for_level(severity);
        let plan = [
            (RESERVED_SEGMENT, ColorSlot::DEFAULT, 0),
            (CONTEXT_SEGMENT, context_slot, 0),
            (LEVEL_SEGMENT, level_slot, tint),
            (BODY_SEGMENT, level_slot, tint),
        ];
        for (index, slot, tint) in plan {
            let text = segments.segment(index);
            if text.is_empty() {
                continue;
            }
            let _ = selector.select(slot, tint).write_to(&mut state.output, text);
        }
        let _ = state.output.flush();
    }

    fn lock(&self) -> MutexGuard<'_, DispatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConsoleDispatcher {
    fn default() -> Self {
        Self::new(&LogConfig::default())
    }
}

impl fmt::Debug for ConsoleDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleDispatcher")
            .field("level", &self.level())
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}

impl LogSink for ConsoleDispatcher {
    fn log(&self, source: Option<&Source<'_>>, level: Level, args: fmt::Arguments<'_>) {
        self.dispatch(source, level, args);
    }
}
