// ============================================================================
// claudio-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Conversion Classifications and Operational Errors
//
// Two kinds of failure live here. `ConversionError` is the classification a
// finished conversion attempt carries in its `Failed` status; it is never
// returned through `Result`. `CoreError` covers everything an API call can
// fail with directly, such as a request arriving while another conversion is
// still running.

use serde::Serialize;
use std::io;
use thiserror::Error;

/// Classification of an unsuccessful conversion attempt.
///
/// Each variant maps to one fixed sentence shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionError {
    /// The input path does not have the `flac` extension.
    #[error("Expected FLAC file")]
    UnexpectedFiletype,

    /// ffmpeg ran but exited with a non-zero status.
    #[error("ffmpeg exited with error")]
    TaskFailed,

    /// ffmpeg could not be started at all (missing binary, permissions).
    #[error("ffmpeg could not be started")]
    LaunchFailed,
}

/// Errors returned directly from claudio-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("A conversion is already in progress; rejected '{0}'")]
    ConversionInProgress(String),

    #[error("Required external command '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed while waiting for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to spawn conversion worker: {0}")]
    ThreadSpawn(#[source] io::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for claudio-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub(crate) fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub(crate) fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}
