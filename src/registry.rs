//! Name-keyed logger lookup.
//!
//! # Design Decisions
//! - The registry is an explicit handle, injected into whatever builds
//!   loggers, so tests can run against private instances
//! - `global()` provides the conventional process-wide table for
//!   applications that resolve loggers by name at call sites
//! - Entries persist for process lifetime; there is no unregister

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::logger::Logger;

/// Lookup table mapping logger names to live handles, plus the single
/// default-logger slot.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    default: RwLock<Option<Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the logger's own name. Re-registering a name replaces
    /// the previous entry.
    pub fn register(&self, logger: Arc<Logger>) {
        self.loggers
            .write()
            .insert(logger.name().to_string(), logger);
    }

    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).cloned()
    }

    /// Repoint the default-logger slot.
    pub fn set_default(&self, logger: Arc<Logger>) {
        *self.default.write() = Some(logger);
    }

    pub fn default_logger(&self) -> Option<Arc<Logger>> {
        self.default.read().clone()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.loggers.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    pub fn flush_all(&self) {
        for logger in self.loggers.read().values() {
            logger.flush();
        }
    }
}

/// The process-wide registry instance.
pub fn global() -> &'static Arc<LoggerRegistry> {
    static GLOBAL: OnceLock<Arc<LoggerRegistry>> = OnceLock::new();
    GLOBAL.get_or_init(|| Arc::new(LoggerRegistry::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_get() {
        let registry = LoggerRegistry::new();
        registry.register(Arc::new(Logger::new("net", Vec::new())));

        assert!(registry.get("net").is_some());
        assert!(registry.get("disk").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reregistering_a_name_replaces() {
        let registry = LoggerRegistry::new();
        let first = Arc::new(Logger::new("app", Vec::new()));
        let second = Arc::new(Logger::new("app", Vec::new()));

        registry.register(first.clone());
        registry.register(second.clone());

        let resolved = registry.get("app").unwrap();
        assert!(Arc::ptr_eq(&resolved, &second));
        assert!(!Arc::ptr_eq(&resolved, &first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn default_slot_starts_empty() {
        let registry = LoggerRegistry::new();
        assert!(registry.default_logger().is_none());

        let logger = Arc::new(Logger::new("main", Vec::new()));
        registry.set_default(logger.clone());
        assert!(Arc::ptr_eq(&registry.default_logger().unwrap(), &logger));
    }

    #[test]
    fn global_is_one_instance() {
        assert!(Arc::ptr_eq(global(), global()));
    }
}
