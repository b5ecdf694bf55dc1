//! crates/logging/src/sink.rs
//! Destination of formatted log calls.

use std::fmt;

use crate::level::Level;
use crate::source::Source;

/// Receives every log call a [`Logger`](crate::Logger) accepts.
///
/// Installing a sink with [`Logger::set_sink`](crate::Logger::set_sink)
/// replaces the console dispatcher entirely, threshold included: the sink
/// sees every call and decides what to keep. Closures with the matching
/// signature implement the trait.
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use logging::{Level, LogSink, Source};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = {
///     let seen = Arc::clone(&seen);
///     move |_: Option<&Source<'_>>, level: Level, args: std::fmt::Arguments<'_>| {
///         seen.lock().unwrap().push((level, args.to_string()));
///     }
/// };
/// sink.log(None, Level::DEBUG, format_args!("x={}", 1));
/// assert_eq!(seen.lock().unwrap()[0], (Level::DEBUG, "x=1".to_owned()));
/// ```
pub trait LogSink: Send + Sync {
    /// Handles one call. Must not fail.
    fn log(&self, source: Option<&Source<'_>>, level: Level, args: fmt::Arguments<'_>);
}

impl<F> LogSink for F
where
    F: Fn(Option<&Source<'_>>, Level, fmt::Arguments<'_>) + Send + Sync,
{
    fn log(&self, source: Option<&Source<'_>>, level: Level, args: fmt::Arguments<'_>) {
        self(source, level, args);
    }
}
