//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the dispatcher.
//!
//! This module provides a tracing subscriber layer that forwards tracing
//! events to a [`LogSink`], normally the process-wide [`Logger`]. It lets
//! libraries that only speak `tracing` share the console, threshold, repeat
//! suppression and colors of this crate.
//!
//! # Mapping
//!
//! - `ERROR` → [`Level::ERROR`], `WARN` → [`Level::WARNING`],
//!   `INFO` → [`Level::INFO`], `DEBUG` → [`Level::DEBUG`],
//!   `TRACE` → [`Level::TRACE`].
//! - The event target becomes the [`Source`] name, printed as `[target] `.
//! - The `message` field becomes the body, terminated by a newline.
//!
//! # Usage
//!
//! ```rust,no_run
//! logging::init_tracing().expect("no other subscriber installed");
//! tracing::warn!(target: "net", "link down");
//! ```

use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::level::Level;
use crate::logger::{Logger, global};
use crate::sink::LogSink;
use crate::source::Source;

/// A tracing layer that forwards events to a [`LogSink`].
#[derive(Clone)]
pub struct DispatchLayer {
    sink: Arc<dyn LogSink>,
}

impl DispatchLayer {
    /// Forwards events to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Forwards events to the process-wide [`Logger`].
    #[must_use]
    pub fn global() -> Self {
        Self::new(Arc::new(GlobalSink))
    }

    /// Map a tracing level to a dispatcher level.
    const fn map_level(level: tracing::Level) -> Level {
        match level {
            tracing::Level::ERROR => Level::ERROR,
            tracing::Level::WARN => Level::WARNING,
            tracing::Level::INFO => Level::INFO,
            tracing::Level::DEBUG => Level::DEBUG,
            tracing::Level::TRACE => Level::TRACE,
        }
    }
}

impl std::fmt::Debug for DispatchLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchLayer").finish_non_exhaustive()
    }
}

impl<S> Layer<S> for DispatchLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let source = Source::new(metadata.target());
        self.sink.log(
            Some(&source),
            Self::map_level(*metadata.level()),
            format_args!("{message}\n"),
        );
    }
}

/// Late-binding handle to [`global()`], so the logger is only created once an
/// event actually arrives.
struct GlobalSink;

impl LogSink for GlobalSink {
    fn log(&self, source: Option<&Source<'_>>, level: Level, args: std::fmt::Arguments<'_>) {
        Logger::log(global(), source, level, args);
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global tracing subscriber that forwards to [`global()`].
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(DispatchLayer::global())
        .try_init()
}

/// Like [`init_tracing`] with an extra filter layer in front, such as an
/// `EnvFilter`.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already set.
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(DispatchLayer::global())
        .try_init()
}
