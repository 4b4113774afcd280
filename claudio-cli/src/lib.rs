// claudio-cli/src/lib.rs
//
// Library portion of the Claudio CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConvertArgs};
pub use commands::check::run_check;
pub use commands::convert::run_convert;
pub use commands::watch::run_watch;
pub use output::StatusRenderer;

// Re-exported for the `cli_error!` macro.
#[doc(hidden)]
pub use claudio_core;
