//! Topology configuration subsystem.
//!
//! # Data Flow
//! ```text
//! JSON text (string / reader / file)
//!     → serde_json (parse into Value)
//!     → TopologyBuilder::load_value
//!         defaults → patterns → sinks → loggers → default logger
//!     → live handles, registered in the injected LoggerRegistry
//! ```
//!
//! # Design Decisions
//! - One top-to-bottom pass: later sections may reference entities built
//!   in earlier sections, never the reverse
//! - Registries mutate incrementally; a mid-load failure leaves earlier
//!   entities in place (no rollback)
//! - Unrecognized document fields are ignored, not rejected

mod builder;
mod error;
mod sink;

pub use builder::TopologyBuilder;
pub use error::{ConfigError, ConfigResult};
