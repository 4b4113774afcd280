//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Checks that ffmpeg can be started.
pub mod check;

/// Converts a single file given on the command line.
pub mod convert;

/// Treats each line of stdin as a dropped file.
pub mod watch;
