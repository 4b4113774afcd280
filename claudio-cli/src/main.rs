// claudio-cli/src/main.rs
//
// Entry point for the `claudio` binary.
//
// Responsibilities include:
// - Parsing command-line arguments.
// - Setting up logging to the console and, optionally, a file.
// - Building the core configuration and conversion runner.
// - Dispatching to the selected command.
// - Mapping the outcome to the process exit code.

use clap::Parser;
use claudio_cli::error::CliResult;
use claudio_cli::output::{OutputMode, StatusRenderer};
use claudio_cli::{Cli, Commands, logging, run_check, run_convert, run_watch};
use claudio_core::{ConversionRunner, ConversionStatus, CoreConfig};

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = CoreConfig::new(cli.ffmpeg);
    config.validate()?;
    let mut renderer = StatusRenderer::new(OutputMode::from_json_flag(cli.json));

    match cli.command {
        Commands::Check => {
            run_check(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Convert(args) => {
            let runner = Arc::new(ConversionRunner::new(config)?);
            match run_convert(&runner, args, &mut renderer)? {
                ConversionStatus::Completed => Ok(ExitCode::SUCCESS),
                _ => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Watch => {
            let runner = Arc::new(ConversionRunner::new(config)?);
            run_watch(&runner, io::BufReader::new(io::stdin()), &mut renderer)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    log::debug!("Parsed arguments: {:?}", cli);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
