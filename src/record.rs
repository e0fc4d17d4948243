//! A single in-flight log record.

use chrono::{DateTime, Local};

use crate::level::Level;

/// Borrowed view of one log record.
///
/// Assembled once per emission and shared, unchanged, across the owning
/// logger's whole sink chain.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    logger: Option<&'a str>,
    level: Level,
    message: &'a str,
    time: DateTime<Local>,
}

impl<'a> Record<'a> {
    /// A record with no originating logger name.
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            logger: None,
            level,
            message,
            time: Local::now(),
        }
    }

    /// A record stamped with the logger that emits it.
    pub fn for_logger(logger: &'a str, level: Level, message: &'a str) -> Self {
        Self {
            logger: Some(logger),
            level,
            message,
            time: Local::now(),
        }
    }

    /// Replace the capture timestamp.
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    pub fn logger(&self) -> Option<&str> {
        self.logger
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        self.message
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }
}
