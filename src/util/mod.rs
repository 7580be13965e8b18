//! Utility modules for apkscan

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
