//! Sink-document parameter extraction.

use std::path::PathBuf;

use serde_json::Value;

use crate::sink::{SinkKind, SinkSpec};

/// Read the kind-specific construction parameters for `kind` out of a sink
/// document. Absent (or differently-typed) parameters take their
/// documented fallbacks; file kinds derive `"<sink-name>.log"` from `name`.
pub(crate) fn parse_spec(kind: SinkKind, name: &str, doc: &Value) -> SinkSpec {
    let mode = kind.thread_mode();
    match kind {
        SinkKind::StdoutSt
        | SinkKind::StdoutMt
        | SinkKind::StdoutColorSt
        | SinkKind::StdoutColorMt => SinkSpec::Stdout {
            mode,
            color: kind.is_color(),
        },
        SinkKind::StderrSt
        | SinkKind::StderrMt
        | SinkKind::StderrColorSt
        | SinkKind::StderrColorMt => SinkSpec::Stderr {
            mode,
            color: kind.is_color(),
        },
        SinkKind::BasicFileSt | SinkKind::BasicFileMt => SinkSpec::BasicFile {
            mode,
            filename: path_field(doc, "filename", || format!("{name}.log")),
            truncate: bool_field(doc, "truncate", false),
        },
        SinkKind::DailyFileSt | SinkKind::DailyFileMt => SinkSpec::DailyFile {
            mode,
            base_filename: path_field(doc, "base_filename", || format!("{name}.log")),
            rotation_hour: u32_field(doc, "rotation_hour", 0),
            truncate: bool_field(doc, "truncate", false),
            max_files: u16_field(doc, "max_files", u16::MAX),
        },
        SinkKind::RotatingFileSt | SinkKind::RotatingFileMt => SinkSpec::RotatingFile {
            mode,
            // this kind has no "<name>.log" fallback; an absent
            // base_filename stays empty and fails at construction
            base_filename: path_field(doc, "base_filename", String::new),
            max_size: u64_field(doc, "max_size", u64::MAX),
            max_files: u64_field(doc, "max_files", u64::MAX),
            rotate_on_open: bool_field(doc, "rotate_on_open", false),
        },
    }
}

fn path_field(doc: &Value, key: &str, fallback: impl FnOnce() -> String) -> PathBuf {
    doc.get(key)
        .and_then(Value::as_str)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(fallback()))
}

fn bool_field(doc: &Value, key: &str, fallback: bool) -> bool {
    doc.get(key).and_then(Value::as_bool).unwrap_or(fallback)
}

fn u64_field(doc: &Value, key: &str, fallback: u64) -> u64 {
    doc.get(key).and_then(Value::as_u64).unwrap_or(fallback)
}

fn u32_field(doc: &Value, key: &str, fallback: u32) -> u32 {
    doc.get(key)
        .and_then(Value::as_u64)
        .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
        .unwrap_or(fallback)
}

fn u16_field(doc: &Value, key: &str, fallback: u16) -> u16 {
    doc.get(key)
        .and_then(Value::as_u64)
        .map(|value| u16::try_from(value).unwrap_or(u16::MAX))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::sink::ThreadMode;

    use super::*;

    #[test]
    fn basic_file_defaults_derive_from_sink_name() {
        let spec = parse_spec(SinkKind::BasicFileMt, "app", &json!({}));
        assert_eq!(
            spec,
            SinkSpec::BasicFile {
                mode: ThreadMode::Multi,
                filename: PathBuf::from("app.log"),
                truncate: false,
            }
        );
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let doc = json!({
            "filename": "custom/path.txt",
            "truncate": true
        });
        let spec = parse_spec(SinkKind::BasicFileSt, "ignored", &doc);
        assert_eq!(
            spec,
            SinkSpec::BasicFile {
                mode: ThreadMode::Single,
                filename: PathBuf::from("custom/path.txt"),
                truncate: true,
            }
        );
    }

    #[test]
    fn daily_defaults() {
        let spec = parse_spec(SinkKind::DailyFileSt, "daily", &json!({}));
        assert_eq!(
            spec,
            SinkSpec::DailyFile {
                mode: ThreadMode::Single,
                base_filename: PathBuf::from("daily.log"),
                rotation_hour: 0,
                truncate: false,
                max_files: u16::MAX,
            }
        );
    }

    #[test]
    fn rotating_base_filename_defaults_to_empty() {
        let spec = parse_spec(SinkKind::RotatingFileMt, "sized", &json!({}));
        assert_eq!(
            spec,
            SinkSpec::RotatingFile {
                mode: ThreadMode::Multi,
                base_filename: PathBuf::new(),
                max_size: u64::MAX,
                max_files: u64::MAX,
                rotate_on_open: false,
            }
        );
    }

    #[test]
    fn rotating_reads_all_parameters() {
        let doc = json!({
            "base_filename": "rot.log",
            "max_size": 1048576,
            "max_files": 5,
            "rotate_on_open": true
        });
        let spec = parse_spec(SinkKind::RotatingFileSt, "rot", &doc);
        assert_eq!(
            spec,
            SinkSpec::RotatingFile {
                mode: ThreadMode::Single,
                base_filename: PathBuf::from("rot.log"),
                max_size: 1_048_576,
                max_files: 5,
                rotate_on_open: true,
            }
        );
    }

    #[test]
    fn console_kinds_take_no_parameters() {
        let spec = parse_spec(
            SinkKind::StderrColorMt,
            "console",
            &json!({"filename": "ignored.log"}),
        );
        assert_eq!(
            spec,
            SinkSpec::Stderr {
                mode: ThreadMode::Multi,
                color: true,
            }
        );
    }
}
