//! Rotating file writers: calendar-based (daily) and size-based.
//!
//! # Design Decisions
//! - The daily writer derives dated file names (`base_YYYY-MM-DD.ext`) and
//!   rotates the first time a write lands past the configured hour
//! - The size writer keeps an indexed series (`base.1.ext`, `base.2.ext`,
//!   ...) where index 1 is always the most recently rotated file
//! - Retention pruning failures are ignored; losing an old file must not
//!   break the active one

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::file::open_log_file;

#[derive(Debug)]
pub(crate) struct DailyWriter {
    base: PathBuf,
    rotation_time: NaiveTime,
    truncate: bool,
    max_files: u16,
    file: File,
    next_rotation: NaiveDateTime,
    history: VecDeque<PathBuf>,
}

impl DailyWriter {
    pub(crate) fn new(
        base: &Path,
        rotation_hour: u32,
        truncate: bool,
        max_files: u16,
    ) -> io::Result<Self> {
        let rotation_time = NaiveTime::from_hms_opt(rotation_hour, 0, 0).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("rotation hour {rotation_hour} is out of range 0..=23"),
            )
        })?;
        let now = Local::now().naive_local();
        let path = dated_path(base, now.date());
        let file = open_log_file(&path, truncate)?;
        let mut history = VecDeque::new();
        history.push_back(path);
        Ok(Self {
            base: base.to_path_buf(),
            rotation_time,
            truncate,
            max_files,
            file,
            next_rotation: next_rotation(now, rotation_time),
            history,
        })
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        let now = Local::now().naive_local();
        if now >= self.next_rotation {
            self.rotate(now)?;
        }
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn rotate(&mut self, now: NaiveDateTime) -> io::Result<()> {
        let path = dated_path(&self.base, now.date());
        self.file = open_log_file(&path, self.truncate)?;
        self.next_rotation = next_rotation(now, self.rotation_time);
        self.history.push_back(path);
        if self.max_files > 0 {
            while self.history.len() > usize::from(self.max_files) {
                if let Some(old) = self.history.pop_front() {
                    let _ = fs::remove_file(old);
                }
            }
        }
        Ok(())
    }
}

/// `base` with the date spliced in front of the extension.
fn dated_path(base: &Path, date: NaiveDate) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), ext.to_string_lossy()),
        None => format!("{}_{}", stem, date.format("%Y-%m-%d")),
    };
    base.with_file_name(name)
}

/// First instant strictly after `after` that falls on the rotation time.
fn next_rotation(after: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let mut next = after.date().and_time(at);
    if next <= after {
        next = next + Duration::days(1);
    }
    next
}

#[derive(Debug)]
pub(crate) struct RotatingWriter {
    base: PathBuf,
    max_size: u64,
    max_files: u64,
    file: Option<File>,
    current_size: u64,
}

impl RotatingWriter {
    pub(crate) fn new(
        base: PathBuf,
        max_size: u64,
        max_files: u64,
        rotate_on_open: bool,
    ) -> io::Result<Self> {
        let file = open_log_file(&base, false)?;
        let current_size = file.metadata()?.len();
        let mut writer = Self {
            base,
            max_size,
            max_files,
            file: Some(file),
            current_size,
        };
        if rotate_on_open && writer.current_size > 0 {
            writer.rotate()?;
        }
        Ok(writer)
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        let length = line.len() as u64 + 1;
        if self.current_size > 0 && self.current_size.saturating_add(length) > self.max_size {
            self.rotate()?;
        }
        let file = self.active_file()?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        self.current_size += length;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    fn active_file(&mut self) -> io::Result<&mut File> {
        match self.file {
            Some(ref mut file) => Ok(file),
            None => {
                let file = open_log_file(&self.base, false)?;
                Ok(self.file.insert(file))
            }
        }
    }

    /// Close the active file, shift the indexed series up by one, and start
    /// a fresh base file.
    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        if self.max_files == 0 {
            let _ = fs::remove_file(&self.base);
        } else {
            let mut highest = 0;
            while highest < self.max_files && indexed_path(&self.base, highest + 1).exists() {
                highest += 1;
            }
            if highest == self.max_files {
                let _ = fs::remove_file(indexed_path(&self.base, highest));
                highest -= 1;
            }
            for index in (1..=highest).rev() {
                let _ = fs::rename(
                    indexed_path(&self.base, index),
                    indexed_path(&self.base, index + 1),
                );
            }
            fs::rename(&self.base, indexed_path(&self.base, 1))?;
        }
        self.file = Some(open_log_file(&self.base, true)?);
        self.current_size = 0;
        Ok(())
    }
}

/// `base` with a rotation index spliced in front of the extension.
fn indexed_path(base: &Path, index: u64) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}.{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}.{}", stem, index),
    };
    base.with_file_name(name)
}
