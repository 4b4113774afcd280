// ============================================================================
// claudio-cli/src/logging.rs
// ============================================================================
//
// LOGGING: fern dispatcher setup for the CLI
//
// The console shows warnings and errors by default (debug with --verbose) so
// log lines do not crowd the status output. An optional log file always
// receives debug output, which includes the ffmpeg command line and whatever
// ffmpeg printed.

use crate::error::{CliErrorContext, CliResult};
use claudio_core::CoreError;

use log::LevelFilter;
use std::path::Path;

/// Returns the current local timestamp formatted for log lines.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Console level for the given verbosity.
pub fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the global logger.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> CliResult<()> {
    let console = fern::Dispatch::new()
        .level(console_level(verbose))
        .chain(std::io::stderr());

    let mut root = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                get_timestamp(),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Debug)
        .chain(console);

    if let Some(path) = log_file {
        let file = fern::log_file(path)
            .cli_with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        root = root.chain(fern::Dispatch::new().level(LevelFilter::Debug).chain(file));
    }

    root.apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to initialize logging: {e}")))?;

    log::debug!("Logger initialized (console level: {})", console_level(verbose));
    Ok(())
}
