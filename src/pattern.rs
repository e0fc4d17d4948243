//! Format-pattern templates.
//!
//! # Responsibilities
//! - Compile `%`-flag templates into segment lists, once per assignment
//! - Render a record into a single output line
//! - Wrap the `%^`..`%$` span in ANSI color on color-capable sinks
//!
//! # Design Decisions
//! - Compilation never fails: unknown flags pass through verbatim,
//!   matching the ignore-don't-reject posture of the config schema

use std::fmt::Write as _;
use std::mem;

use chrono::{Datelike, Timelike};

use crate::level::Level;
use crate::record::Record;

/// Built-in pattern applied wherever nothing else is configured.
pub const DEFAULT_PATTERN: &str = "[%H:%M:%S][%^%l%$] %v";

const COLOR_RESET: &str = "\x1b[0m";

/// A compiled format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTemplate {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    LevelFull,
    LevelShort,
    LoggerName,
    Message,
    ColorStart,
    ColorEnd,
}

impl PatternTemplate {
    /// Compile `source`. Recognized flags: `%Y %m %d %H %M %S %e %l %L %n
    /// %v %T %% %^ %$`; anything else stays literal.
    pub fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                None => literal.push('%'),
                Some('%') => literal.push('%'),
                Some(flag) => match flag_segments(flag) {
                    Some(parts) => {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(mem::take(&mut literal)));
                        }
                        segments.extend(parts);
                    }
                    None => {
                        literal.push('%');
                        literal.push(flag);
                    }
                },
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// The template text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render one record as a single line, without a trailing newline.
    pub fn render(&self, record: &Record<'_>, colored: bool) -> String {
        let time = record.time();
        let mut out = String::with_capacity(self.source.len() + record.message().len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Year => push_padded(&mut out, time.year().unsigned_abs(), 4),
                Segment::Month => push_padded(&mut out, time.month(), 2),
                Segment::Day => push_padded(&mut out, time.day(), 2),
                Segment::Hour => push_padded(&mut out, time.hour(), 2),
                Segment::Minute => push_padded(&mut out, time.minute(), 2),
                Segment::Second => push_padded(&mut out, time.second(), 2),
                Segment::Millis => push_padded(&mut out, time.timestamp_subsec_millis(), 3),
                Segment::LevelFull => out.push_str(record.level().as_str()),
                Segment::LevelShort => out.push_str(record.level().short_str()),
                Segment::LoggerName => {
                    if let Some(name) = record.logger() {
                        out.push_str(name);
                    }
                }
                Segment::Message => out.push_str(record.message()),
                Segment::ColorStart => {
                    if colored {
                        out.push_str(level_color(record.level()));
                    }
                }
                Segment::ColorEnd => {
                    if colored {
                        out.push_str(COLOR_RESET);
                    }
                }
            }
        }
        out
    }
}

fn flag_segments(flag: char) -> Option<Vec<Segment>> {
    let parts = match flag {
        'Y' => vec![Segment::Year],
        'm' => vec![Segment::Month],
        'd' => vec![Segment::Day],
        'H' => vec![Segment::Hour],
        'M' => vec![Segment::Minute],
        'S' => vec![Segment::Second],
        'e' => vec![Segment::Millis],
        'l' => vec![Segment::LevelFull],
        'L' => vec![Segment::LevelShort],
        'n' => vec![Segment::LoggerName],
        'v' => vec![Segment::Message],
        '^' => vec![Segment::ColorStart],
        '$' => vec![Segment::ColorEnd],
        'T' => vec![
            Segment::Hour,
            Segment::Literal(":".to_string()),
            Segment::Minute,
            Segment::Literal(":".to_string()),
            Segment::Second,
        ],
        _ => return None,
    };
    Some(parts)
}

fn push_padded(out: &mut String, value: u32, width: usize) {
    let _ = write!(out, "{value:0width$}");
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Trace => "\x1b[37m",
        Level::Debug => "\x1b[36m",
        Level::Info => "\x1b[32m",
        Level::Warn => "\x1b[33m\x1b[1m",
        Level::Error => "\x1b[31m\x1b[1m",
        Level::Critical => "\x1b[1m\x1b[41m",
        Level::Off => COLOR_RESET,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;

    fn record_at_noon<'a>(level: Level, message: &'a str) -> Record<'a> {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 12, 34, 56).unwrap();
        Record::for_logger("core", level, message).with_time(time)
    }

    #[test]
    fn default_pattern_renders() {
        let template = PatternTemplate::compile(DEFAULT_PATTERN);
        let line = template.render(&record_at_noon(Level::Info, "hello"), false);
        assert_eq!(line, "[12:34:56][info] hello");
    }

    #[test]
    fn date_and_name_flags() {
        let template = PatternTemplate::compile("%Y-%m-%d %n %L %v");
        let line = template.render(&record_at_noon(Level::Warn, "disk low"), false);
        assert_eq!(line, "2024-03-09 core W disk low");
    }

    #[test]
    fn unknown_flags_stay_literal() {
        let template = PatternTemplate::compile("%q 100%% %v");
        let line = template.render(&record_at_noon(Level::Info, "x"), false);
        assert_eq!(line, "%q 100% x");
    }

    #[test]
    fn color_markers_vanish_without_color() {
        let template = PatternTemplate::compile("%^%v%$");
        let line = template.render(&record_at_noon(Level::Error, "boom"), false);
        assert_eq!(line, "boom");
    }

    #[test]
    fn color_markers_wrap_span_with_color() {
        let template = PatternTemplate::compile("%^%l%$");
        let line = template.render(&record_at_noon(Level::Error, "boom"), true);
        assert!(line.starts_with("\x1b[31m"));
        assert!(line.ends_with(COLOR_RESET));
        assert!(line.contains("err"));
    }

    #[test]
    fn shorthand_time_flag_expands() {
        let full = PatternTemplate::compile("%T");
        let spelled = PatternTemplate::compile("%H:%M:%S");
        let record = record_at_noon(Level::Info, "x");
        assert_eq!(full.render(&record, false), spelled.render(&record, false));
    }

    #[test]
    fn source_is_preserved() {
        assert_eq!(PatternTemplate::compile("%v!").source(), "%v!");
    }
}
