//! crates/logging/src/macros.rs
//! Formatting macros targeting the process-wide logger.
//!
//! Every macro takes an optional leading `source: <Source>` argument followed
//! by `format!`-style arguments, and forwards to [`global()`](crate::global).

/// Logs at an explicit level.
///
/// ```
/// use logging::{Level, Source, log};
///
/// let source = Source::new("probe");
/// log!(Level::VERBOSE, "scanning {} entries\n", 3);
/// log!(source: source, Level::DEBUG, "done\n");
/// ```
#[macro_export]
macro_rules! log {
    (source: $source:expr, $level:expr, $($arg:tt)+) => {
        $crate::global().log(
            ::core::option::Option::Some(&$source),
            $level,
            ::core::format_args!($($arg)+),
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::global().log(
            ::core::option::Option::None,
            $level,
            ::core::format_args!($($arg)+),
        )
    };
}

/// Logs at [`Level::PANIC`](crate::Level::PANIC).
#[macro_export]
macro_rules! log_panic {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::PANIC, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::PANIC, $($arg)+)
    };
}

/// Logs at [`Level::FATAL`](crate::Level::FATAL).
#[macro_export]
macro_rules! log_fatal {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::FATAL, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::FATAL, $($arg)+)
    };
}

/// Logs at [`Level::ERROR`](crate::Level::ERROR).
#[macro_export]
macro_rules! log_error {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::ERROR, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::ERROR, $($arg)+)
    };
}

/// Logs at [`Level::WARNING`](crate::Level::WARNING).
#[macro_export]
macro_rules! log_warning {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::WARNING, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::WARNING, $($arg)+)
    };
}

/// Logs at [`Level::INFO`](crate::Level::INFO).
#[macro_export]
macro_rules! log_info {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::INFO, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::INFO, $($arg)+)
    };
}

/// Logs at [`Level::VERBOSE`](crate::Level::VERBOSE).
#[macro_export]
macro_rules! log_verbose {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::VERBOSE, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::VERBOSE, $($arg)+)
    };
}

/// Logs at [`Level::DEBUG`](crate::Level::DEBUG).
#[macro_export]
macro_rules! log_debug {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::DEBUG, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::DEBUG, $($arg)+)
    };
}

/// Logs at [`Level::TRACE`](crate::Level::TRACE).
#[macro_export]
macro_rules! log_trace {
    (source: $source:expr, $($arg:tt)+) => {
        $crate::log!(source: $source, $crate::Level::TRACE, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::TRACE, $($arg)+)
    };
}
