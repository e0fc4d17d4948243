//! Severity levels and their textual forms.
//!
//! # Design Decisions
//! - Tokens are case-sensitive and closed; anything else is an error
//! - The inverse mapping (level to token) is total and used only for
//!   diagnostics and serialization, never for parsing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity threshold, ordered by increasing verbosity suppression.
///
/// `Trace` is the most verbose record level; `Off` as a threshold
/// suppresses everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    #[serde(rename = "err")]
    Error,
    Critical,
    Off,
}

impl Level {
    /// Every level, in threshold order.
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Critical,
        Level::Off,
    ];

    /// Canonical token for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "err",
            Level::Critical => "critical",
            Level::Off => "off",
        }
    }

    /// Single-letter form used by the `%L` pattern flag.
    pub fn short_str(&self) -> &'static str {
        match self {
            Level::Trace => "T",
            Level::Debug => "D",
            Level::Info => "I",
            Level::Warn => "W",
            Level::Error => "E",
            Level::Critical => "C",
            Level::Off => "O",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a token outside the severity table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid level string '{0}'")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "err" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            "off" => Ok(Level::Off),
            _ => Err(ParseLevelError(token.to_string())),
        }
    }
}
