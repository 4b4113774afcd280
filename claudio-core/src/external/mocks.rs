// claudio-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for this crate's own tests and, through the "test-mocks" feature,
// for downstream test suites.

use super::{FfmpegProcess, FfmpegSpawner, command_args};
use crate::error::{CoreError, CoreResult};

use ffmpeg_sidecar::command::FfmpegCommand;

use std::io;
use std::process::ExitStatus;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of FfmpegProcess.
pub struct MockFfmpegProcess {
    /// Text returned from `drain_output`.
    pub stdout: String,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
    /// When set, `wait` blocks until the paired `Sender` fires or is dropped.
    pub gate: Option<Receiver<()>>,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn drain_output(&mut self) -> CoreResult<String> {
        Ok(self.stdout.clone())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        if let Some(gate) = self.gate.take() {
            // A dropped sender releases the process too.
            let _ = gate.recv();
        }
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawn consumes the first expectation whose pattern is contained in
/// one of the command's arguments. Every received argument vector is recorded.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Arc<Mutex<Vec<MockFfmpegExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(&self, arg_pattern: &str, result: CoreResult<MockFfmpegProcess>) {
        lock(&self.expectations).push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
        });
    }

    pub fn add_success_expectation(&self, arg_pattern: &str) {
        self.add_exit_expectation(arg_pattern, 0);
    }

    pub fn add_exit_expectation(&self, arg_pattern: &str, exit_code: i32) {
        let process = MockFfmpegProcess {
            stdout: String::new(),
            exit_status: exit_status(exit_code),
            gate: None,
        };
        self.add_expectation(arg_pattern, Ok(process));
    }

    /// Adds an expectation whose process does not exit until the returned
    /// sender is used or dropped.
    pub fn add_gated_expectation(&self, arg_pattern: &str, exit_code: i32) -> Sender<()> {
        let (release, gate) = mpsc::channel();
        let process = MockFfmpegProcess {
            stdout: String::new(),
            exit_status: exit_status(exit_code),
            gate: Some(gate),
        };
        self.add_expectation(arg_pattern, Ok(process));
        release
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str) {
        let error = CoreError::CommandStart(
            "ffmpeg".to_string(),
            io::Error::new(io::ErrorKind::NotFound, "mock: ffmpeg not found"),
        );
        self.add_expectation(arg_pattern, Err(error));
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        lock(&self.received_calls).clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args = command_args(&mut cmd);
        lock(&self.received_calls).push(args.clone());

        let mut expectations = lock(&self.expectations);
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        match found_index {
            Some(index) => {
                let expectation = expectations.remove(index);
                log::info!(
                    "MockFfmpegSpawner: Matched expectation with pattern '{}'",
                    expectation.arg_pattern
                );
                expectation.result
            }
            None => {
                log::error!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
                panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
            }
        }
    }
}
