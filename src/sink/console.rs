//! Standard-stream writers.

use std::io::{self, IsTerminal, Write};

/// Which process stream a console sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

#[derive(Debug)]
pub(crate) struct ConsoleWriter {
    target: ConsoleTarget,
}

impl ConsoleWriter {
    pub(crate) fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    /// Whether the target stream is attached to a terminal. Color-capable
    /// kinds only emit escape codes when this holds.
    pub(crate) fn is_terminal(&self) -> bool {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().is_terminal(),
            ConsoleTarget::Stderr => io::stderr().is_terminal(),
        }
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self.target {
            ConsoleTarget::Stdout => {
                let mut stream = io::stdout().lock();
                stream.write_all(line.as_bytes())?;
                stream.write_all(b"\n")
            }
            ConsoleTarget::Stderr => {
                let mut stream = io::stderr().lock();
                stream.write_all(line.as_bytes())?;
                stream.write_all(b"\n")
            }
        }
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().lock().flush(),
            ConsoleTarget::Stderr => io::stderr().lock().flush(),
        }
    }
}
