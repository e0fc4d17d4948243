//! Topology loading and construction.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::sink::parse_spec;
use crate::level::Level;
use crate::logger::Logger;
use crate::pattern::DEFAULT_PATTERN;
use crate::registry::LoggerRegistry;
use crate::sink::{SinkHandle, SinkKind};

/// Builds a logging topology from a JSON document: named patterns, named
/// sinks, named loggers, and the default-logger selection, resolved in
/// that order.
///
/// Loads are additive. The builder keeps its own name→entity maps so that
/// later document sections can reference earlier ones; finished loggers
/// are also registered in the injected [`LoggerRegistry`], which is where
/// the rest of the application resolves them.
#[derive(Debug)]
pub struct TopologyBuilder {
    registry: Arc<LoggerRegistry>,
    patterns: HashMap<String, String>,
    sinks: HashMap<String, SinkHandle>,
    loggers: HashMap<String, Arc<Logger>>,
    default_pattern: String,
    default_level: Level,
}

impl TopologyBuilder {
    /// An empty builder writing into `registry`.
    ///
    /// The starting default pattern is [`DEFAULT_PATTERN`]; the starting
    /// default level is `debug` in debug builds and `info` otherwise.
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        let default_level = if cfg!(debug_assertions) {
            Level::Debug
        } else {
            Level::Info
        };
        Self {
            registry,
            patterns: HashMap::new(),
            sinks: HashMap::new(),
            loggers: HashMap::new(),
            default_pattern: DEFAULT_PATTERN.to_string(),
            default_level,
        }
    }

    /// Build and load from an in-memory JSON string.
    pub fn from_text(registry: Arc<LoggerRegistry>, text: &str) -> ConfigResult<Self> {
        let mut builder = Self::new(registry);
        builder.load_text(text)?;
        Ok(builder)
    }

    /// Build and load from a readable JSON stream.
    pub fn from_reader<R: io::Read>(registry: Arc<LoggerRegistry>, reader: R) -> ConfigResult<Self> {
        let mut builder = Self::new(registry);
        builder.load_reader(reader)?;
        Ok(builder)
    }

    /// Load a JSON document held in memory.
    pub fn load_text(&mut self, text: &str) -> ConfigResult<()> {
        let doc: Value = serde_json::from_str(text)?;
        self.load_value(&doc)
    }

    /// Load a JSON document from a readable stream.
    pub fn load_reader<R: io::Read>(&mut self, reader: R) -> ConfigResult<()> {
        let doc: Value = serde_json::from_reader(reader)?;
        self.load_value(&doc)
    }

    /// Load a JSON document from a file.
    ///
    /// A missing or unreadable path fails with [`ConfigError::OpenFile`],
    /// distinct from the parse error an unreadable document raises.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_text(&text)
    }

    /// Load `path`, first writing the built-in default document there when
    /// nothing exists at the path yet — a first run leaves an editable
    /// configuration file behind.
    pub fn load_file_or_init(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if path.exists() {
            return self.load_file(path);
        }
        let text = Self::default_document_string();
        fs::write(path, &text).map_err(|source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_text(&text)
    }

    /// Load an already-parsed document.
    ///
    /// Sections are processed in a fixed order — defaults, patterns,
    /// sinks, loggers, default logger — so each section may reference the
    /// ones before it. On failure, entities built earlier in the pass stay
    /// in place.
    pub fn load_value(&mut self, doc: &Value) -> ConfigResult<()> {
        if let Some(pattern) = doc.get("default_pattern").and_then(Value::as_str) {
            self.default_pattern = pattern.to_string();
        }

        if let Some(token) = doc.get("default_level").and_then(Value::as_str) {
            self.default_level = token.parse()?;
        }

        if let Some(patterns) = doc.get("patterns").and_then(Value::as_object) {
            for (name, template) in patterns {
                if let Some(template) = template.as_str() {
                    self.patterns.insert(name.clone(), template.to_string());
                }
            }
        }

        if let Some(sinks) = doc.get("sinks").and_then(Value::as_object) {
            for (name, sink_doc) in sinks {
                let sink = self.build_sink(name, sink_doc)?;
                self.sinks.insert(name.clone(), sink);
            }
        }

        if let Some(loggers) = doc.get("loggers").and_then(Value::as_object) {
            for (name, logger_doc) in loggers {
                let logger = self.build_logger(name, logger_doc)?;
                self.registry.register(Arc::clone(&logger));
                self.loggers.insert(name.clone(), logger);
            }
        }

        if let Some(name) = doc.get("default_logger").and_then(Value::as_str) {
            match self.loggers.get(name) {
                Some(logger) => self.registry.set_default(Arc::clone(logger)),
                None => return Err(ConfigError::UnknownLogger(name.to_string())),
            }
        }

        Ok(())
    }

    /// Construct one sink: kind and rotation parameters first, then the
    /// severity threshold, then the pattern — the latter two touch the
    /// already-built handle.
    fn build_sink(&self, name: &str, doc: &Value) -> ConfigResult<SinkHandle> {
        let kind = match doc.get("type").and_then(Value::as_str) {
            Some(token) => token.parse::<SinkKind>()?,
            None => {
                return Err(ConfigError::MissingSinkType {
                    sink: name.to_string(),
                })
            }
        };

        let spec = parse_spec(kind, name, doc);
        let sink = spec.build().map_err(|source| ConfigError::Sink {
            sink: name.to_string(),
            source,
        })?;

        match doc.get("level").and_then(Value::as_str) {
            Some(token) => sink.set_level(token.parse()?),
            None => sink.set_level(self.default_level),
        }

        match doc.get("pattern").and_then(Value::as_str) {
            Some(raw) => sink.set_pattern(&self.resolve_pattern(raw)),
            None => sink.set_pattern(&self.default_pattern),
        }

        Ok(sink)
    }

    /// Construct one logger from its ordered sink references.
    fn build_logger(&self, name: &str, doc: &Value) -> ConfigResult<Arc<Logger>> {
        let mut sinks = Vec::new();
        if let Some(references) = doc.get("sinks").and_then(Value::as_array) {
            for reference in references {
                let Some(sink_name) = reference.as_str() else {
                    continue;
                };
                match self.sinks.get(sink_name) {
                    Some(sink) => sinks.push(Arc::clone(sink)),
                    None => {
                        return Err(ConfigError::UnknownSink {
                            sink: sink_name.to_string(),
                            logger: name.to_string(),
                        })
                    }
                }
            }
        }

        let logger = Logger::new(name, sinks);

        match doc.get("level").and_then(Value::as_str) {
            Some(token) => logger.set_level(token.parse()?),
            None => logger.set_level(self.default_level),
        }

        // An explicit pattern propagates to the referenced sinks; an
        // absent one is recorded on the logger only, leaving each sink's
        // own pattern in place.
        match doc.get("pattern").and_then(Value::as_str) {
            Some(raw) => logger.set_pattern(&self.resolve_pattern(raw)),
            None => logger.set_pattern_local(&self.default_pattern),
        }

        Ok(Arc::new(logger))
    }

    /// A pattern value is first treated as a name in the pattern registry;
    /// with no such name it is used verbatim as a template.
    fn resolve_pattern(&self, raw: &str) -> String {
        self.patterns
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    /// The registry this builder writes loggers into.
    pub fn registry(&self) -> &Arc<LoggerRegistry> {
        &self.registry
    }

    /// Look up a sink built by this builder.
    pub fn sink(&self, name: &str) -> Option<SinkHandle> {
        self.sinks.get(name).cloned()
    }

    /// Look up a logger built by this builder.
    pub fn logger(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.get(name).cloned()
    }

    /// Look up a named pattern template.
    pub fn pattern(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    pub fn default_level(&self) -> Level {
        self.default_level
    }

    pub fn default_pattern(&self) -> &str {
        &self.default_pattern
    }

    /// The literal built-in default document: one named pattern, a
    /// truncating application log file, a truncating renderer log file, a
    /// color console sink, and two loggers wired to them.
    ///
    /// This is the fallback persisted and loaded when no usable
    /// configuration file exists; loading it never fails.
    pub fn default_document() -> Value {
        let mut doc = serde_json::json!({
            "default_logger": "default_logger",
            "default_pattern": DEFAULT_PATTERN,
            "patterns": {
                "default_pattern": DEFAULT_PATTERN
            },
            "sinks": {
                "basic_file": {
                    "type": "basic_file_sink_mt",
                    "filename": "output.log",
                    "pattern": "default_pattern",
                    "truncate": true
                },
                "renderer_file": {
                    "type": "basic_file_sink_mt",
                    "filename": "renderer.log",
                    "pattern": "default_pattern",
                    "truncate": true
                },
                "console_stdout": {
                    "type": "stdout_color_sink_mt"
                }
            },
            "loggers": {
                "default_logger": {
                    "pattern": "default_pattern",
                    "sinks": ["console_stdout", "basic_file"]
                },
                "renderer": {
                    "level": "info",
                    "pattern": "default_pattern",
                    "sinks": ["console_stdout", "renderer_file"]
                }
            }
        });
        let default_level = if cfg!(debug_assertions) {
            Level::Debug
        } else {
            Level::Info
        };
        doc["default_level"] = Value::from(default_level.as_str());
        doc
    }

    /// The default document rendered with 4-space indentation, ready to be
    /// written to disk as an editable starting point.
    pub fn default_document_string() -> String {
        let doc = Self::default_document();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        match doc.serialize(&mut serializer) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => doc.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> TopologyBuilder {
        TopologyBuilder::new(Arc::new(LoggerRegistry::new()))
    }

    #[test]
    fn default_state_before_any_load() {
        let builder = fresh();
        assert_eq!(builder.default_pattern(), DEFAULT_PATTERN);
        if cfg!(debug_assertions) {
            assert_eq!(builder.default_level(), Level::Debug);
        } else {
            assert_eq!(builder.default_level(), Level::Info);
        }
    }

    #[test]
    fn patterns_load_verbatim() {
        let mut builder = fresh();
        builder
            .load_text(r#"{"patterns": {"brief": "%v", "other": "brief"}}"#)
            .unwrap();
        assert_eq!(builder.pattern("brief"), Some("%v"));
        // one level of indirection only: a template equal to another
        // pattern's name is not chased
        assert_eq!(builder.pattern("other"), Some("brief"));
    }

    #[test]
    fn default_overrides_apply_before_entities() {
        let mut builder = fresh();
        builder
            .load_text(
                r#"{
                    "default_level": "warn",
                    "default_pattern": "%v",
                    "sinks": {"console": {"type": "stdout_sink_mt"}}
                }"#,
            )
            .unwrap();
        let sink = builder.sink("console").unwrap();
        assert_eq!(sink.level(), Level::Warn);
        assert_eq!(sink.pattern(), "%v");
    }

    #[test]
    fn invalid_default_level_token_fails() {
        let mut builder = fresh();
        let err = builder
            .load_text(r#"{"default_level": "loud"}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel(_)));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn missing_type_field_is_reported() {
        let mut builder = fresh();
        let err = builder
            .load_text(r#"{"sinks": {"untyped": {"level": "info"}}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSinkType { .. }));
        assert!(err.to_string().contains("untyped"));
    }

    #[test]
    fn default_document_shape() {
        let doc = TopologyBuilder::default_document();
        for key in [
            "default_logger",
            "default_pattern",
            "default_level",
            "patterns",
            "sinks",
            "loggers",
        ] {
            assert!(doc.get(key).is_some(), "missing key {key}");
        }
        assert!(doc["sinks"].as_object().unwrap().len() >= 3);
        assert!(doc["loggers"].as_object().unwrap().len() >= 2);
    }

    #[test]
    fn default_document_string_uses_four_space_indent() {
        let text = TopologyBuilder::default_document_string();
        assert!(text.contains("\n    \""));
        assert!(serde_json::from_str::<Value>(&text).is_ok());
    }
}
