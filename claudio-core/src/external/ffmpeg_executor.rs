// ============================================================================
// claudio-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active ffmpeg process
// - FfmpegSpawner: Trait for creating new ffmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
//
// The command is always built as a program plus discrete arguments. Nothing
// passes through a shell, so paths with spaces or quotes reach ffmpeg as-is.

use crate::config::AUDIO_CODEC;
use crate::error::{CoreResult, command_start_error, command_wait_error};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::ExitStatus;
use std::thread;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess: Send {
    /// Reads stdout to the end and returns it. Stderr is drained alongside and
    /// logged, so neither pipe can fill up and stall the process.
    fn drain_output(&mut self) -> CoreResult<String>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner: Send + Sync {
    type Process: FfmpegProcess;

    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Command Construction ---

/// Builds `<ffmpeg> -i <input> -acodec alac <output> -y`.
pub fn build_alac_command(ffmpeg_path: &Path, input: &Path, output: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new_with_path(ffmpeg_path);
    cmd.arg("-i")
        .arg(input)
        .arg("-acodec")
        .arg(AUDIO_CODEC)
        .arg(output)
        .arg("-y");
    cmd
}

/// Argument vector of a built command, lossily converted for logging and tests.
pub fn command_args(cmd: &mut FfmpegCommand) -> Vec<String> {
    cmd.as_inner()
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(FfmpegChild);

impl FfmpegProcess for SidecarProcess {
    fn drain_output(&mut self) -> CoreResult<String> {
        // ffmpeg never reads from us; closing stdin keeps it from waiting on keys.
        drop(self.0.take_stdin());

        let stderr_reader = self.0.take_stderr().map(|stderr| {
            thread::spawn(move || {
                for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                    log::debug!("ffmpeg: {}", line);
                }
            })
        });

        let mut captured = Vec::new();
        if let Some(mut stdout) = self.0.take_stdout() {
            stdout.read_to_end(&mut captured)?;
        }

        if let Some(handle) = stderr_reader {
            if handle.join().is_err() {
                log::warn!("ffmpeg stderr reader thread panicked");
            }
        }

        Ok(String::from_utf8_lossy(&captured).into_owned())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}
