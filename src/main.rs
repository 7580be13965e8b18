use apkscan::cli::{handle_scan, CliArgs};
use apkscan::util::{init_logging, LoggingConfig};
use apkscan::{ApkscanConfig, VERSION};

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();

    let config = match ApkscanConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    init_logging(LoggingConfig::from_args(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        &config.log_level,
    ));

    debug!("apkscan v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_scan(&args, config);
    std::process::exit(exit_code);
}
