//! `log` facade adapter.
//!
//! Lets `log::info!`-style macros emit through a registry's default
//! logger, so code written against the facade picks up whatever topology
//! was loaded. There is no facade-side `critical`; `log::Level::Error` is
//! the most severe level that arrives here.

use std::sync::Arc;

use crate::level::Level;
use crate::registry::LoggerRegistry;

/// Forwards `log` crate records to a registry's default logger.
#[derive(Debug)]
pub struct LogBridge {
    registry: Arc<LoggerRegistry>,
}

impl LogBridge {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.registry
            .default_logger()
            .map(|logger| logger.should_log(metadata.level().into()))
            .unwrap_or(false)
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Some(logger) = self.registry.default_logger() {
            logger.log(record.level().into(), &record.args().to_string());
        }
    }

    fn flush(&self) {
        if let Some(logger) = self.registry.default_logger() {
            logger.flush();
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

/// Install a bridge over `registry` as the `log` crate's global logger.
///
/// Fails if something else already claimed the facade.
pub fn install(registry: Arc<LoggerRegistry>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(registry)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use log::Log as _;

    use crate::logger::Logger;
    use crate::sink::{SinkSpec, ThreadMode};

    use super::*;

    #[test]
    fn facade_levels_map_onto_severity_table() {
        assert_eq!(Level::from(log::Level::Error), Level::Error);
        assert_eq!(Level::from(log::Level::Warn), Level::Warn);
        assert_eq!(Level::from(log::Level::Info), Level::Info);
        assert_eq!(Level::from(log::Level::Debug), Level::Debug);
        assert_eq!(Level::from(log::Level::Trace), Level::Trace);
    }

    #[test]
    fn bridge_forwards_to_default_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridged.log");
        let sink = SinkSpec::BasicFile {
            mode: ThreadMode::Multi,
            filename: path.clone(),
            truncate: false,
        }
        .build()
        .unwrap();
        sink.set_pattern("%n %l %v");

        let registry = Arc::new(LoggerRegistry::new());
        let logger = Arc::new(Logger::new("facade", vec![sink]));
        logger.set_level(Level::Trace);
        registry.register(logger.clone());
        registry.set_default(logger);

        let bridge = LogBridge::new(registry);
        bridge.log(
            &log::Record::builder()
                .args(format_args!("over the bridge"))
                .level(log::Level::Warn)
                .build(),
        );
        bridge.flush();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "facade warn over the bridge\n"
        );
    }

    #[test]
    fn bridge_without_default_logger_is_disabled() {
        let bridge = LogBridge::new(Arc::new(LoggerRegistry::new()));
        let metadata = log::Metadata::builder().level(log::Level::Error).build();
        assert!(!bridge.enabled(&metadata));
    }
}
