//! Implementation of the 'check' subcommand.

use crate::error::CliResult;

use claudio_core::{CoreConfig, check_dependency};
use owo_colors::OwoColorize;

/// Verifies that the configured ffmpeg binary can be started.
pub fn run_check(config: &CoreConfig) -> CliResult<()> {
    check_dependency(&config.ffmpeg_path)?;
    println!(
        "{} ffmpeg available at {}",
        "✓".green().bold(),
        config.ffmpeg_path.display()
    );
    Ok(())
}
