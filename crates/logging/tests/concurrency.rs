//! Integration tests for concurrent logging.

mod support;

use std::sync::Arc;
use std::thread;

use logging::{Level, LogConfig, LogFlags, Source};
use support::plain_dispatcher;

/// Verifies lines from many threads are never interleaved.
#[test]
fn concurrent_lines_stay_whole() {
    let config = LogConfig {
        flags: LogFlags::PRINT_LEVEL,
        ..LogConfig::default()
    };
    let (dispatcher, captured) = plain_dispatcher(&config, false);
    let dispatcher = Arc::new(dispatcher);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let dispatcher = Arc::clone(&dispatcher);
            thread::spawn(move || {
                let name = format!("worker{worker}");
                let source = Source::new(&name);
                for step in 0..100 {
                    dispatcher.dispatch(
                        Some(&source),
                        Level::WARNING,
                        format_args!("step {step} of {}\n", 100),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let text = captured.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 800);
    for line in lines {
        let rest = line
            .strip_prefix("[worker")
            .and_then(|rest| rest.split_once("] [warning] step "))
            .map(|(_, rest)| rest);
        let rest = rest.unwrap_or_else(|| panic!("malformed line {line:?}"));
        assert!(rest.ends_with(" of 100"), "malformed line {line:?}");
    }
}

/// Verifies threshold changes from another thread are observed.
#[test]
fn threshold_updates_are_visible_across_threads() {
    let (dispatcher, captured) = plain_dispatcher(&LogConfig::default(), false);
    let dispatcher = Arc::new(dispatcher);

    let setter = Arc::clone(&dispatcher);
    thread::spawn(move || setter.set_level(Level::ERROR))
        .join()
        .unwrap();

    dispatcher.dispatch(None, Level::WARNING, format_args!("hidden\n"));
    assert!(captured.bytes().is_empty());
}
