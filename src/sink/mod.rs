//! Output destinations.
//!
//! # Responsibilities
//! - Name the closed sink-kind taxonomy (`SinkKind`)
//! - Carry per-kind construction parameters (`SinkSpec`) and build live
//!   handles from them
//! - Apply a severity threshold and a compiled pattern per sink
//!
//! # Design Decisions
//! - The single/multi-threaded kind split is a caller-visible contract
//!   recorded on the handle; every handle is internally safe to share
//! - Adding a kind means one `SinkKind` variant, one token, and one arm in
//!   `SinkSpec::build` — all checked exhaustively
//! - Write failures are reported on stderr, never surfaced to the logging
//!   call site

mod console;
mod file;
mod rotating;

pub use console::ConsoleTarget;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::level::Level;
use crate::pattern::{PatternTemplate, DEFAULT_PATTERN};
use crate::record::Record;

use console::ConsoleWriter;
use file::FileWriter;
use rotating::{DailyWriter, RotatingWriter};

/// Shared handle to a constructed sink. Ownership is joint between the
/// topology's sink registry and every logger that references it.
pub type SinkHandle = Arc<Sink>;

/// Declared threading contract of a sink kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadMode {
    Single,
    Multi,
}

/// The closed sink-kind taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    StdoutSt,
    StdoutMt,
    StderrSt,
    StderrMt,
    StdoutColorSt,
    StdoutColorMt,
    StderrColorSt,
    StderrColorMt,
    BasicFileSt,
    BasicFileMt,
    DailyFileSt,
    DailyFileMt,
    RotatingFileSt,
    RotatingFileMt,
}

impl SinkKind {
    /// Canonical configuration token.
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::StdoutSt => "stdout_sink_st",
            SinkKind::StdoutMt => "stdout_sink_mt",
            SinkKind::StderrSt => "stderr_sink_st",
            SinkKind::StderrMt => "stderr_sink_mt",
            SinkKind::StdoutColorSt => "stdout_color_sink_st",
            SinkKind::StdoutColorMt => "stdout_color_sink_mt",
            SinkKind::StderrColorSt => "stderr_color_sink_st",
            SinkKind::StderrColorMt => "stderr_color_sink_mt",
            SinkKind::BasicFileSt => "basic_file_sink_st",
            SinkKind::BasicFileMt => "basic_file_sink_mt",
            SinkKind::DailyFileSt => "daily_file_sink_st",
            SinkKind::DailyFileMt => "daily_file_sink_mt",
            SinkKind::RotatingFileSt => "rotating_file_sink_st",
            SinkKind::RotatingFileMt => "rotating_file_sink_mt",
        }
    }

    pub fn thread_mode(&self) -> ThreadMode {
        match self {
            SinkKind::StdoutSt
            | SinkKind::StderrSt
            | SinkKind::StdoutColorSt
            | SinkKind::StderrColorSt
            | SinkKind::BasicFileSt
            | SinkKind::DailyFileSt
            | SinkKind::RotatingFileSt => ThreadMode::Single,
            _ => ThreadMode::Multi,
        }
    }

    /// Whether this kind may emit ANSI color codes.
    pub fn is_color(&self) -> bool {
        matches!(
            self,
            SinkKind::StdoutColorSt
                | SinkKind::StdoutColorMt
                | SinkKind::StderrColorSt
                | SinkKind::StderrColorMt
        )
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a token outside the sink-kind taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sink type '{0}'")]
pub struct ParseSinkKindError(String);

impl FromStr for SinkKind {
    type Err = ParseSinkKindError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "stdout_sink_st" => Ok(SinkKind::StdoutSt),
            "stdout_sink_mt" => Ok(SinkKind::StdoutMt),
            "stderr_sink_st" => Ok(SinkKind::StderrSt),
            "stderr_sink_mt" => Ok(SinkKind::StderrMt),
            "stdout_color_sink_st" => Ok(SinkKind::StdoutColorSt),
            "stdout_color_sink_mt" => Ok(SinkKind::StdoutColorMt),
            "stderr_color_sink_st" => Ok(SinkKind::StderrColorSt),
            "stderr_color_sink_mt" => Ok(SinkKind::StderrColorMt),
            "basic_file_sink_st" => Ok(SinkKind::BasicFileSt),
            "basic_file_sink_mt" => Ok(SinkKind::BasicFileMt),
            "daily_file_sink_st" => Ok(SinkKind::DailyFileSt),
            "daily_file_sink_mt" => Ok(SinkKind::DailyFileMt),
            "rotating_file_sink_st" => Ok(SinkKind::RotatingFileSt),
            "rotating_file_sink_mt" => Ok(SinkKind::RotatingFileMt),
            _ => Err(ParseSinkKindError(token.to_string())),
        }
    }
}

/// Construction parameters for one sink, tagged by kind family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkSpec {
    Stdout {
        mode: ThreadMode,
        color: bool,
    },
    Stderr {
        mode: ThreadMode,
        color: bool,
    },
    BasicFile {
        mode: ThreadMode,
        filename: PathBuf,
        truncate: bool,
    },
    DailyFile {
        mode: ThreadMode,
        base_filename: PathBuf,
        rotation_hour: u32,
        truncate: bool,
        max_files: u16,
    },
    RotatingFile {
        mode: ThreadMode,
        base_filename: PathBuf,
        max_size: u64,
        max_files: u64,
        rotate_on_open: bool,
    },
}

impl SinkSpec {
    /// The taxonomy member this spec constructs.
    pub fn kind(&self) -> SinkKind {
        match self {
            SinkSpec::Stdout { mode, color } => match (*mode, *color) {
                (ThreadMode::Single, false) => SinkKind::StdoutSt,
                (ThreadMode::Multi, false) => SinkKind::StdoutMt,
                (ThreadMode::Single, true) => SinkKind::StdoutColorSt,
                (ThreadMode::Multi, true) => SinkKind::StdoutColorMt,
            },
            SinkSpec::Stderr { mode, color } => match (*mode, *color) {
                (ThreadMode::Single, false) => SinkKind::StderrSt,
                (ThreadMode::Multi, false) => SinkKind::StderrMt,
                (ThreadMode::Single, true) => SinkKind::StderrColorSt,
                (ThreadMode::Multi, true) => SinkKind::StderrColorMt,
            },
            SinkSpec::BasicFile { mode, .. } => match mode {
                ThreadMode::Single => SinkKind::BasicFileSt,
                ThreadMode::Multi => SinkKind::BasicFileMt,
            },
            SinkSpec::DailyFile { mode, .. } => match mode {
                ThreadMode::Single => SinkKind::DailyFileSt,
                ThreadMode::Multi => SinkKind::DailyFileMt,
            },
            SinkSpec::RotatingFile { mode, .. } => match mode {
                ThreadMode::Single => SinkKind::RotatingFileSt,
                ThreadMode::Multi => SinkKind::RotatingFileMt,
            },
        }
    }

    /// Construct the live sink for this spec.
    ///
    /// The handle comes back with a `Trace` threshold and the built-in
    /// pattern; callers layer their own level and pattern on afterwards.
    pub fn build(self) -> io::Result<SinkHandle> {
        let kind = self.kind();
        let (writer, colored) = match self {
            SinkSpec::Stdout { color, .. } => {
                let writer = ConsoleWriter::new(ConsoleTarget::Stdout);
                let colored = color && writer.is_terminal();
                (SinkWriter::Console(writer), colored)
            }
            SinkSpec::Stderr { color, .. } => {
                let writer = ConsoleWriter::new(ConsoleTarget::Stderr);
                let colored = color && writer.is_terminal();
                (SinkWriter::Console(writer), colored)
            }
            SinkSpec::BasicFile {
                filename, truncate, ..
            } => (
                SinkWriter::File(FileWriter::new(&filename, truncate)?),
                false,
            ),
            SinkSpec::DailyFile {
                base_filename,
                rotation_hour,
                truncate,
                max_files,
                ..
            } => (
                SinkWriter::Daily(DailyWriter::new(
                    &base_filename,
                    rotation_hour,
                    truncate,
                    max_files,
                )?),
                false,
            ),
            SinkSpec::RotatingFile {
                base_filename,
                max_size,
                max_files,
                rotate_on_open,
                ..
            } => (
                SinkWriter::Rotating(RotatingWriter::new(
                    base_filename,
                    max_size,
                    max_files,
                    rotate_on_open,
                )?),
                false,
            ),
        };
        Ok(Arc::new(Sink {
            kind,
            colored,
            level: RwLock::new(Level::Trace),
            pattern: RwLock::new(PatternTemplate::compile(DEFAULT_PATTERN)),
            writer: Mutex::new(writer),
        }))
    }
}

#[derive(Debug)]
enum SinkWriter {
    Console(ConsoleWriter),
    File(FileWriter),
    Daily(DailyWriter),
    Rotating(RotatingWriter),
}

impl SinkWriter {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            SinkWriter::Console(writer) => writer.write_line(line),
            SinkWriter::File(writer) => writer.write_line(line),
            SinkWriter::Daily(writer) => writer.write_line(line),
            SinkWriter::Rotating(writer) => writer.write_line(line),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::Console(writer) => writer.flush(),
            SinkWriter::File(writer) => writer.flush(),
            SinkWriter::Daily(writer) => writer.flush(),
            SinkWriter::Rotating(writer) => writer.flush(),
        }
    }
}

/// A configured output destination, shared by every logger that lists it.
#[derive(Debug)]
pub struct Sink {
    kind: SinkKind,
    colored: bool,
    level: RwLock<Level>,
    pattern: RwLock<PatternTemplate>,
    writer: Mutex<SinkWriter>,
}

impl Sink {
    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn thread_mode(&self) -> ThreadMode {
        self.kind.thread_mode()
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    /// The template text this sink currently formats with.
    pub fn pattern(&self) -> String {
        self.pattern.read().source().to_string()
    }

    pub fn set_pattern(&self, pattern: &str) {
        *self.pattern.write() = PatternTemplate::compile(pattern);
    }

    pub fn should_log(&self, level: Level) -> bool {
        level != Level::Off && level >= self.level()
    }

    /// Format and write one record, if it passes this sink's threshold.
    pub fn log(&self, record: &Record<'_>) {
        if !self.should_log(record.level()) {
            return;
        }
        let line = self.pattern.read().render(record, self.colored);
        if let Err(err) = self.writer.lock().write_line(&line) {
            eprintln!("log sink write error ({}): {}", self.kind, err);
        }
    }

    pub fn flush(&self) {
        if let Err(err) = self.writer.lock().flush() {
            eprintln!("log sink flush error ({}): {}", self.kind, err);
        }
    }
}
