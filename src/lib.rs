//! apkscan - Retrofit and OkHttp3 surface extraction from smali disassembly
//!
//! Walks an apktool-decoded application, pulls out Retrofit HTTP verb
//! annotations and OkHttp3-typed fields with textual pattern matching, and
//! renders them as a plain-text report or a Postman collection.
//!
//! # Example Usage
//!
//! ```no_run
//! use apkscan::{ApiSurfaceAnalyzer, OutputFormat, OutputFormatter, RealFileSystem};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let fs = RealFileSystem::new();
//! let result = ApiSurfaceAnalyzer::new(&fs).analyze(Path::new("decoded-app"))?;
//!
//! let report = OutputFormatter::new(OutputFormat::Postman).format(&result)?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`collector`]: lazy walk over `.smali` files
//! - [`extract`]: annotation and client-field extractors
//! - [`aggregate`]: ordered accumulation of matches
//! - [`analyzer`]: the scan pipeline tying the above together
//! - [`output`]: text and Postman renderers, artifact writing
//! - [`decompile`]: apktool invocation behind the [`Decompiler`] trait

pub mod aggregate;
pub mod analyzer;
pub mod cli;
pub mod collector;
pub mod config;
pub mod decompile;
pub mod extract;
pub mod fs;
pub mod output;
pub mod util;

pub use aggregate::{Aggregator, ExtractionResult};
pub use analyzer::{AnalyzerConfig, ApiSurfaceAnalyzer};
pub use collector::{CollectorError, DisassembledUnit, FileCollector, TraversalOrder};
pub use config::{ApkscanConfig, ConfigError};
pub use decompile::{ApktoolDecompiler, DecompileError, Decompiler};
pub use extract::{
    AnnotationExtractor, ClientFieldExtractor, ClientFieldMatch, Extractor, HttpAnnotationMatch,
    HttpVerb,
};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use output::{OutputError, OutputFormat, OutputFormatter};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_apkscan() {
        assert_eq!(NAME, "apkscan");
    }
}
