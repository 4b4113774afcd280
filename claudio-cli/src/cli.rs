// claudio-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use claudio_core::config::DEFAULT_FFMPEG_PATH;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Claudio: FLAC to ALAC converter",
    long_about = "Converts a FLAC file to ALAC, writing an .m4a next to the original using ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on the console.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Optional: Also write the log to this file
    #[arg(long, global = true, value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// ffmpeg binary to run. Can also be set via the CLAUDIO_FFMPEG environment variable.
    #[arg(
        long,
        global = true,
        value_name = "FFMPEG_PATH",
        env = "CLAUDIO_FFMPEG",
        default_value = DEFAULT_FFMPEG_PATH
    )]
    pub ffmpeg: PathBuf,

    /// Print each status change as a JSON line instead of a label
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts one .flac file to an .m4a in the same directory
    Convert(ConvertArgs),

    /// Reads dropped paths from stdin, one per line, converting each in turn
    Watch,

    /// Checks that the configured ffmpeg can be started
    Check,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// The .flac file to convert
    #[arg(value_name = "FILE")]
    pub input_path: PathBuf,
}
