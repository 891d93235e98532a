//! Minimal stderr backend for the `log` facade.

use log::{LevelFilter, Log, Metadata, Record};

/// Setting this variable to any value turns on trace output.
pub const DEBUG_ENV: &str = "LOOM_DEBUG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

pub fn level_from_env(value: Option<std::ffi::OsString>) -> LevelFilter {
    match value {
        Some(_) => LevelFilter::Trace,
        None => LevelFilter::Warn,
    }
}

pub fn init() {
    // A logger installed earlier (tests) stays in place.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_from_env(std::env::var_os(DEBUG_ENV)));
    }
}
