//! Integration tests for threshold filtering and the level tag.
//!
//! These tests verify that the dispatcher drops calls less severe than its
//! threshold and prints the `[level] ` tag only when asked to.

mod support;

use logging::{Level, LogConfig, LogFlags, Source};
use support::plain_dispatcher;

// ============================================================================
// Threshold Tests
// ============================================================================

/// Verifies the warning threshold hides info and debug but not error.
#[test]
fn warning_threshold_hides_info_and_debug() {
    let config = LogConfig {
        level: Level::WARNING,
        ..LogConfig::default()
    };
    let (dispatcher, captured) = plain_dispatcher(&config, false);

    dispatcher.dispatch(None, Level::INFO, format_args!("info\n"));
    dispatcher.dispatch(None, Level::DEBUG, format_args!("debug\n"));
    assert!(captured.bytes().is_empty());

    dispatcher.dispatch(None, Level::ERROR, format_args!("error\n"));
    assert_eq!(captured.text(), "error\n");
}

/// Verifies a call exactly at the threshold is printed.
#[test]
fn threshold_is_inclusive() {
    let config = LogConfig {
        level: Level::VERBOSE,
        ..LogConfig::default()
    };
    let (dispatcher, captured) = plain_dispatcher(&config, false);
    dispatcher.dispatch(None, Level::VERBOSE, format_args!("edge\n"));
    dispatcher.dispatch(None, Level::from_raw(41), format_args!("past\n"));
    assert_eq!(captured.text(), "edge\n");
}

/// Verifies the quiet threshold silences everything but quiet calls.
#[test]
fn quiet_threshold_silences_panic() {
    let config = LogConfig {
        level: Level::QUIET,
        ..LogConfig::default()
    };
    let (dispatcher, captured) = plain_dispatcher(&config, false);
    dispatcher.dispatch(None, Level::PANIC, format_args!("panic\n"));
    assert!(captured.bytes().is_empty());
}

/// Verifies lowering the threshold at runtime takes effect immediately.
#[test]
fn threshold_changes_apply_to_next_call() {
    let (dispatcher, captured) = plain_dispatcher(&LogConfig::default(), false);
    dispatcher.dispatch(None, Level::TRACE, format_args!("hidden\n"));
    dispatcher.set_level(Level::TRACE);
    dispatcher.dispatch(None, Level::TRACE, format_args!("shown\n"));
    assert_eq!(captured.text(), "shown\n");
}

// ============================================================================
// Prefix Tests
// ============================================================================

/// Verifies every named level prints its tag.
#[test]
fn level_tags_use_level_names() {
    let config = LogConfig {
        level: Level::MAX_OFFSET,
        flags: LogFlags::PRINT_LEVEL,
        ..LogConfig::default()
    };
    let (dispatcher, captured) = plain_dispatcher(&config, false);
    let levels = [
        Level::PANIC,
        Level::FATAL,
        Level::ERROR,
        Level::WARNING,
        Level::INFO,
        Level::VERBOSE,
        Level::DEBUG,
        Level::TRACE,
    ];
    for level in levels {
        dispatcher.dispatch(None, level, format_args!("x\n"));
    }
    assert_eq!(
        captured.text(),
        "[panic] x\n[fatal] x\n[error] x\n[warning] x\n[info] x\n[verbose] x\n[debug] x\n[trace] x\n"
    );
}

/// Verifies the context tag precedes the level tag.
#[test]
fn context_tag_precedes_level_tag() {
    let config = LogConfig {
        flags: LogFlags::PRINT_LEVEL,
        ..LogConfig::default()
    };
    let (dispatcher, captured) = plain_dispatcher(&config, false);
    let source = Source::new("h264");
    dispatcher.dispatch(Some(&source), Level::INFO, format_args!("frame {}\n", 12));
    assert_eq!(captured.text(), "[h264] [info] frame 12\n");
}

/// Verifies a partial line suppresses the prefix of its continuation.
#[test]
fn continuation_has_no_prefix() {
    let config = LogConfig {
        flags: LogFlags::PRINT_LEVEL,
        ..LogConfig::default()
    };
    let (dispatcher, captured) = plain_dispatcher(&config, false);
    let source = Source::new("probe");
    dispatcher.dispatch(Some(&source), Level::INFO, format_args!("streams:"));
    dispatcher.dispatch(Some(&source), Level::INFO, format_args!(" 2\n"));
    assert_eq!(captured.text(), "[probe] [info] streams: 2\n");
}

/// Verifies a hidden call does not disturb the prefix state.
#[test]
fn filtered_calls_do_not_touch_prefix_state() {
    let (dispatcher, captured) = plain_dispatcher(&LogConfig::default(), false);
    let source = Source::new("s");
    dispatcher.dispatch(Some(&source), Level::INFO, format_args!("begin "));
    dispatcher.dispatch(Some(&source), Level::DEBUG, format_args!("hidden\n"));
    dispatcher.dispatch(Some(&source), Level::INFO, format_args!("end\n"));
    assert_eq!(captured.text(), "[s] begin end\n");
}
