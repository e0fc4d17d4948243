//! Plain (non-rotating) file writer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug)]
pub(crate) struct FileWriter {
    file: File,
}

impl FileWriter {
    pub(crate) fn new(path: &Path, truncate: bool) -> io::Result<Self> {
        Ok(Self {
            file: open_log_file(path, truncate)?,
        })
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Open `path` for logging, creating missing parent directories first.
pub(crate) fn open_log_file(path: &Path, truncate: bool) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if truncate {
        options.truncate(true);
    } else {
        options.append(true);
    }
    options.open(path)
}
