//! Topology load errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::level::ParseLevelError;
use crate::sink::ParseSinkKindError;

/// Error type for topology loading. All variants are raised synchronously
/// at the point of detection and never retried internally.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `level` or `default_level` token is outside the severity table.
    #[error(transparent)]
    InvalidLevel(#[from] ParseLevelError),

    /// A sink `type` token is outside the sink-kind taxonomy.
    #[error(transparent)]
    InvalidSinkType(#[from] ParseSinkKindError),

    /// A sink document has no `type` field.
    #[error("sink '{sink}' has no 'type' field")]
    MissingSinkType { sink: String },

    /// A logger references a sink name that was never built.
    #[error("unknown sink '{sink}' referenced by logger '{logger}'")]
    UnknownSink { sink: String, logger: String },

    /// `default_logger` names a logger that was never built.
    #[error("cannot set default logger to '{0}', no such logger")]
    UnknownLogger(String),

    /// A file-backed sink could not be constructed.
    #[error("cannot construct sink '{sink}': {source}")]
    Sink { sink: String, source: io::Error },

    /// The configuration file could not be opened or read.
    #[error("cannot open configuration file '{}': {source}", .path.display())]
    OpenFile { path: PathBuf, source: io::Error },

    /// The default document could not be written to disk.
    #[error("cannot write default configuration to '{}': {source}", .path.display())]
    WriteFile { path: PathBuf, source: io::Error },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
