pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, OutputFormatArg};
pub use handlers::{handle_scan, resolve_config, resolve_input, run, ScanInput};
