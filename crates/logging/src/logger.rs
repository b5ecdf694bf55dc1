//! crates/logging/src/logger.rs
//! Front door of the crate: routes calls to the console dispatcher or to a
//! replacement sink.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::color::ColorChoice;
use crate::config::LogConfig;
use crate::dispatch::ConsoleDispatcher;
use crate::flags::LogFlags;
use crate::level::Level;
use crate::sink::LogSink;
use crate::source::Source;

/// Routes log calls to the active sink.
///
/// Without a replacement sink every call goes to the owned
/// [`ConsoleDispatcher`]. Threshold and flags always belong to that
/// dispatcher, so they survive a sink swap.
pub struct Logger {
    dispatcher: Arc<ConsoleDispatcher>,
    sink: RwLock<Option<Arc<dyn LogSink>>>,
}

impl Logger {
    /// Logger writing to standard error with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&LogConfig::default())
    }

    /// Logger writing to standard error with `config`.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        Self::with_dispatcher(ConsoleDispatcher::new(config))
    }

    /// Logger around an existing dispatcher.
    #[must_use]
    pub fn with_dispatcher(dispatcher: ConsoleDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            sink: RwLock::new(None),
        }
    }

    /// Sends one call to the active sink.
    pub fn log(&self, source: Option<&Source<'_>>, level: Level, args: fmt::Arguments<'_>) {
        match self.replacement() {
            Some(sink) => sink.log(source, level, args),
            None => self.dispatcher.dispatch(source, level, args),
        }
    }

    /// Logs at `initial` the first time `state` is seen unset, and at
    /// `subsequent` afterwards.
    ///
    /// ```
    /// use std::sync::atomic::AtomicBool;
    ///
    /// use logging::{Level, Logger};
    ///
    /// static WARNED: AtomicBool = AtomicBool::new(false);
    ///
    /// let logger = Logger::new();
    /// logger.set_level(Level::QUIET);
    /// for _ in 0..3 {
    ///     logger.log_once(None, Level::WARNING, Level::DEBUG, &WARNED, format_args!("deprecated\n"));
    /// }
    /// assert!(WARNED.load(std::sync::atomic::Ordering::Relaxed));
    /// ```
    pub fn log_once(
        &self,
        source: Option<&Source<'_>>,
        initial: Level,
        subsequent: Level,
        state: &AtomicBool,
        args: fmt::Arguments<'_>,
    ) {
        let level = if state.swap(true, Ordering::AcqRel) {
            subsequent
        } else {
            initial
        };
        self.log(source, level, args);
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.dispatcher.level()
    }

    /// Replaces the threshold.
    pub fn set_level(&self, level: Level) {
        self.dispatcher.set_level(level);
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> LogFlags {
        self.dispatcher.flags()
    }

    /// Replaces the flags.
    pub fn set_flags(&self, flags: LogFlags) {
        self.dispatcher.set_flags(flags);
    }

    /// Replaces the color preference of the console dispatcher.
    pub fn set_color_choice(&self, choice: ColorChoice) {
        self.dispatcher.set_color_choice(choice);
    }

    /// Routes every subsequent call to `sink` instead of the console.
    pub fn set_sink<S>(&self, sink: S)
    where
        S: LogSink + 'static,
    {
        self.set_shared_sink(Arc::new(sink));
    }

    /// Like [`Logger::set_sink`] for an already shared sink.
    pub fn set_shared_sink(&self, sink: Arc<dyn LogSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = Some(sink);
    }

    /// Restores the console dispatcher.
    pub fn reset_sink(&self) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The console dispatcher owned by this logger.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<ConsoleDispatcher> {
        &self.dispatcher
    }

    fn replacement(&self) -> Option<Arc<dyn LogSink>> {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("dispatcher", &self.dispatcher)
            .field("custom_sink", &self.replacement().is_some())
            .finish()
    }
}

impl LogSink for Logger {
    fn log(&self, source: Option<&Source<'_>>, level: Level, args: fmt::Arguments<'_>) {
        Self::log(self, source, level, args);
    }
}

/// Process-wide logger used by the logging macros.
///
/// Created on first use from [`LogConfig::from_env`]; an unparsable
/// environment falls back to the default configuration.
pub fn global() -> &'static Logger {
    static GLOBAL: OnceLock<Logger> = OnceLock::new();
    GLOBAL.get_or_init(|| Logger::from_config(&LogConfig::from_env().unwrap_or_default()))
}
