//! Rolling Logger
//!
//! `log` backend that writes each record to the browser console (stderr
//! on native targets) and keeps the most recent lines in a circular
//! buffer, so they can be shown or exported after the fact.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub const DEFAULT_CAPACITY: usize = 500;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

pub struct RollingLogger {
    level: LevelFilter,
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            capacity: capacity.max(1),
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    fn push(&self, line: String) {
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.iter().cloned().collect()).unwrap_or_default()
    }
}

pub fn format_line(time: DateTime<Local>, level: Level, target: &str, message: &str) -> String {
    format!("[{}] {:<5} {}: {}", time.format("%H:%M:%S%.3f"), level, target, message)
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(Local::now(), record.level(), record.target(), &record.args().to_string());
        emit(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger. Later calls are no-ops.
pub fn init_logger(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(level, DEFAULT_CAPACITY));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

/// Recent lines of the global logger
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingLogger::lines).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_buffer_drops_oldest() {
        let logger = RollingLogger::new(LevelFilter::Info, 2);
        for i in 0..3 {
            logger.push(format!("line {}", i));
        }
        assert_eq!(logger.lines(), vec!["line 1".to_string(), "line 2".to_string()]);
    }

    #[rstest]
    #[case(LevelFilter::Info, Level::Debug, false)]
    #[case(LevelFilter::Info, Level::Warn, true)]
    #[case(LevelFilter::Off, Level::Error, false)]
    fn test_level_filter(#[case] filter: LevelFilter, #[case] level: Level, #[case] enabled: bool) {
        let logger = RollingLogger::new(filter, 4);
        let meta = Metadata::builder().level(level).target("test").build();
        assert_eq!(logger.enabled(&meta), enabled);
    }

    #[test]
    fn test_format_line() {
        let time = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        assert_eq!(
            format_line(time, Level::Warn, "inventory", "low stock"),
            "[09:05:07.000] WARN  inventory: low stock"
        );
    }

    #[test]
    fn test_global_logger_buffers_records() {
        init_logger(LevelFilter::Info);
        log::info!(target: "rolling_logger_test", "hello");
        assert!(recent_lines().iter().any(|l| l.ends_with("rolling_logger_test: hello")));
    }
}
