//! MetaSpec CLI - generate spec-driven toolkits from meta-specs.
//!
//! Main entry point for the `metaspec` binary.

use std::process::ExitCode;

use clap::Parser;
use metaspec_common_log::{LogConfig, LogLevel};

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;
use error::CliError;

fn main() -> ExitCode {
    // `.env` may set METASPEC_CONFIG, so it must be loaded before parsing.
    metaspec_common_config::load_dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    let format = cli.format;
    let verbose = cli.verbose > 0;

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    error::handle_result(runtime.block_on(run(cli)), format, verbose)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config).await
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }

    if let Err(e) = metaspec_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
