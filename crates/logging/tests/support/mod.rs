//! Shared helpers for the logging integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use logging::{ColorCapability, ColorSelector, ConsoleDispatcher, LogConfig, Logger};

/// In-memory writer whose contents stay readable after it was moved into a
/// dispatcher.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Dispatcher without colors writing into a fresh capture.
pub fn plain_dispatcher(config: &LogConfig, is_terminal: bool) -> (ConsoleDispatcher, Captured) {
    colored_dispatcher(config, is_terminal, ColorCapability::Off)
}

/// Dispatcher with a pinned color capability writing into a fresh capture.
pub fn colored_dispatcher(
    config: &LogConfig,
    is_terminal: bool,
    capability: ColorCapability,
) -> (ConsoleDispatcher, Captured) {
    let captured = Captured::default();
    let dispatcher = ConsoleDispatcher::with_writer(config, captured.clone(), is_terminal)
        .with_color_selector(ColorSelector::new(capability));
    (dispatcher, captured)
}

/// Logger without colors writing into a fresh capture.
pub fn plain_logger(config: &LogConfig) -> (Logger, Captured) {
    let (dispatcher, captured) = plain_dispatcher(config, false);
    (Logger::with_dispatcher(dispatcher), captured)
}
