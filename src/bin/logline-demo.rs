#![deny(unsafe_code)]

//! Prints one line per severity level through the process-wide logger.
//!
//! Each argument is applied as a configuration directive on top of
//! `LOG_LEVEL`/`LOG_COLOR`, e.g. `logline-demo -level color=never warning`.

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{env, process::ExitCode};

use bprint::PrintBuffer;
use logging::{COLOR_ENV, ConfigError, LEVEL_ENV, Level, LogConfig, LogFlags, Source, global, log};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const LEVELS: [(Level, &str); 9] = [
    (Level::QUIET, "LOG_QUIET"),
    (Level::PANIC, "LOG_PANIC"),
    (Level::FATAL, "LOG_FATAL"),
    (Level::ERROR, "LOG_ERROR"),
    (Level::WARNING, "LOG_WARNING"),
    (Level::INFO, "LOG_INFO"),
    (Level::VERBOSE, "LOG_VERBOSE"),
    (Level::DEBUG, "LOG_DEBUG"),
    (Level::TRACE, "LOG_TRACE"),
];

fn configure() -> Result<LogConfig, ConfigError> {
    let mut config = LogConfig {
        level: Level::MAX_OFFSET,
        flags: LogFlags::SKIP_REPEATED | LogFlags::PRINT_LEVEL,
        ..LogConfig::default()
    };
    if let Some(directive) = env::var_os(LEVEL_ENV) {
        config.apply_directive(&directive.to_string_lossy())?;
    }
    if let Some(color) = env::var_os(COLOR_ENV) {
        config.color = color.to_string_lossy().parse()?;
    }
    for directive in env::args().skip(1) {
        config.apply_directive(&directive)?;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let config = match configure() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("logline-demo: {error}");
            return ExitCode::from(2);
        }
    };

    let logger = global();
    logger.set_level(config.level);
    logger.set_flags(config.flags);
    logger.set_color_choice(config.color);

    let mut stamp = PrintBuffer::new(0, 64);
    stamp.append_time_formatted(&Rfc3339, &OffsetDateTime::now_utc());
    let source = Source::new("demo");
    log!(source: source, Level::VERBOSE, "started at {stamp}\n");

    for (level, name) in LEVELS {
        log!(level, "{name}\n");
    }
    // Collapsed into a single repeat counter.
    for _ in 0..3 {
        log!(source: source, Level::WARNING, "repeated warning\n");
    }
    log!(source: source, Level::INFO, "done\n");
    ExitCode::SUCCESS
}
