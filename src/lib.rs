//! Declarative logging topology built from JSON documents.
//!
//! A configuration document names reusable format patterns, output sinks,
//! and loggers; [`config::TopologyBuilder`] resolves the references between
//! them in one pass and registers the finished loggers in a
//! [`registry::LoggerRegistry`] for the rest of the application to look up
//! by name.
//!
//! ```text
//! JSON document ──▶ TopologyBuilder ──registers──▶ LoggerRegistry
//!                        │ builds                       │ resolves by name
//!                        ▼                              ▼
//!                 pattern ─▶ sink ◀── ordered chain ── logger
//! ```

// Topology resolution
pub mod config;

// Backend: the things the topology is made of
pub mod level;
pub mod logger;
pub mod pattern;
pub mod record;
pub mod registry;
pub mod sink;

// Cross-cutting adapters
pub mod bridge;

pub use config::{ConfigError, ConfigResult, TopologyBuilder};
pub use level::Level;
pub use logger::Logger;
pub use pattern::{PatternTemplate, DEFAULT_PATTERN};
pub use record::Record;
pub use registry::LoggerRegistry;
pub use sink::{Sink, SinkHandle, SinkKind, SinkSpec, ThreadMode};
