// ============================================================================
// claudio-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Command-Line Tool
//
// This module encapsulates every interaction with the external transcoder.
// Spawning goes through the `FfmpegSpawner` trait so the runner can be driven
// by a mock in tests; the default implementation uses ffmpeg-sidecar.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess traits and the sidecar implementation
// - ALAC command construction as a plain argument vector
// - Dependency checking

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for spawning ffmpeg processes
pub mod ffmpeg_executor;

/// Mock spawner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, build_alac_command,
    command_args,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if an external command is available and executable.
///
/// Runs `<cmd> -version` with output discarded. Only failure to start the
/// command counts as an error; its exit status is not inspected.
///
/// # Returns
///
/// * `Ok(())` - The command could be started
/// * `Err(CoreError::DependencyNotFound)` - The command does not exist
/// * `Err(CoreError::CommandStart)` - The command exists but could not be started
pub fn check_dependency(cmd: &Path) -> CoreResult<()> {
    let result = Command::new(cmd)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd.display());
            Err(CoreError::DependencyNotFound(cmd.display().to_string()))
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                cmd.display(),
                e
            );
            Err(CoreError::CommandStart(cmd.display().to_string(), e))
        }
    }
}
