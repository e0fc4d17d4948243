//! Named emission handles.
//!
//! # Responsibilities
//! - Hold an ordered sink chain (the emission order for one record)
//! - Gate records on the logger threshold before fanning out
//! - Forward explicit pattern changes to every attached sink

use parking_lot::RwLock;

use crate::level::Level;
use crate::pattern::DEFAULT_PATTERN;
use crate::record::Record;
use crate::sink::SinkHandle;

/// A named, ordered chain of sinks with its own severity threshold.
#[derive(Debug)]
pub struct Logger {
    name: String,
    sinks: Vec<SinkHandle>,
    level: RwLock<Level>,
    pattern: RwLock<String>,
}

impl Logger {
    /// A logger emitting to exactly `sinks`, in the given order.
    pub fn new(name: impl Into<String>, sinks: Vec<SinkHandle>) -> Self {
        Self {
            name: name.into(),
            sinks,
            level: RwLock::new(Level::Info),
            pattern: RwLock::new(DEFAULT_PATTERN.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sinks(&self) -> &[SinkHandle] {
        &self.sinks
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    pub fn pattern(&self) -> String {
        self.pattern.read().clone()
    }

    /// Set this logger's pattern and forward it to every attached sink.
    pub fn set_pattern(&self, pattern: &str) {
        *self.pattern.write() = pattern.to_string();
        for sink in &self.sinks {
            sink.set_pattern(pattern);
        }
    }

    /// Record a pattern on the logger alone, leaving its sinks' own
    /// formatting untouched.
    pub(crate) fn set_pattern_local(&self, pattern: &str) {
        *self.pattern.write() = pattern.to_string();
    }

    pub fn should_log(&self, level: Level) -> bool {
        level != Level::Off && level >= self.level()
    }

    /// Emit one record through the sink chain, in order.
    pub fn log(&self, level: Level, message: &str) {
        if !self.should_log(level) {
            return;
        }
        let record = Record::for_logger(&self.name, level, message);
        for sink in &self.sinks {
            sink.log(&record);
        }
    }

    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }

    pub fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use crate::sink::{SinkSpec, ThreadMode};

    use super::*;

    fn file_sink(path: &Path) -> SinkHandle {
        SinkSpec::BasicFile {
            mode: ThreadMode::Multi,
            filename: path.to_path_buf(),
            truncate: false,
        }
        .build()
        .unwrap()
    }

    #[test]
    fn emits_to_sinks_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");

        let logger = Logger::new("app", vec![file_sink(&first), file_sink(&second)]);
        logger.set_level(Level::Trace);
        logger.set_pattern("%n %l %v");
        logger.info("started");
        logger.flush();

        assert_eq!(fs::read_to_string(&first).unwrap(), "app info started\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "app info started\n");
    }

    #[test]
    fn logger_threshold_gates_before_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gated.log");

        let logger = Logger::new("app", vec![file_sink(&path)]);
        logger.set_level(Level::Error);
        logger.set_pattern("%v");
        logger.info("dropped");
        logger.critical("kept");
        logger.flush();

        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn set_pattern_reaches_attached_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let sink = file_sink(&dir.path().join("x.log"));
        let logger = Logger::new("app", vec![sink.clone()]);

        logger.set_pattern("%v only");
        assert_eq!(sink.pattern(), "%v only");
        assert_eq!(logger.pattern(), "%v only");
    }

    #[test]
    fn local_pattern_leaves_sinks_alone() {
        let dir = tempfile::tempdir().unwrap();
        let sink = file_sink(&dir.path().join("x.log"));
        sink.set_pattern("%l|%v");

        let logger = Logger::new("app", vec![sink.clone()]);
        logger.set_pattern_local("%v");

        assert_eq!(logger.pattern(), "%v");
        assert_eq!(sink.pattern(), "%l|%v");
    }

    #[test]
    fn sinkless_logger_is_inert() {
        let logger = Logger::new("void", Vec::new());
        logger.info("goes nowhere");
        assert!(logger.sinks().is_empty());
    }
}
