// ============================================================================
// claudio-core/src/runner.rs
// ============================================================================
//
// CONVERSION RUNNER: FLAC to ALAC Conversion Lifecycle
//
// The runner validates a path, derives the .m4a output path, launches ffmpeg
// through an `FfmpegSpawner`, waits for it, and publishes each step to its
// `StatusPublisher`:
//
//   not .flac          -> Failed(UnexpectedFiletype), nothing launched
//   .flac              -> InProgress(filename) -> Completed
//                                              -> Failed(TaskFailed)
//                                              -> Failed(LaunchFailed)
//
// Only one conversion runs at a time. A request that arrives while another is
// running is rejected with `CoreError::ConversionInProgress` and leaves the
// published status untouched.
//
// `convert` blocks the calling thread until ffmpeg exits. Front ends that own
// an interactive thread use `spawn_convert`, which runs the same work on a
// dedicated worker thread.

use crate::config::CoreConfig;
use crate::error::{ConversionError, CoreError, CoreResult};
use crate::external::{FfmpegProcess, FfmpegSpawner, SidecarSpawner, build_alac_command, command_args};
use crate::paths;
use crate::publisher::StatusPublisher;
use crate::status::ConversionStatus;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

/// Clears the busy flag when the conversion holding it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs conversions and owns the observable status.
pub struct ConversionRunner<S: FfmpegSpawner = SidecarSpawner> {
    config: CoreConfig,
    spawner: S,
    publisher: StatusPublisher,
    busy: AtomicBool,
}

impl ConversionRunner<SidecarSpawner> {
    /// Creates a runner that launches the real ffmpeg binary.
    pub fn new(config: CoreConfig) -> CoreResult<Self> {
        Self::with_spawner(config, SidecarSpawner)
    }
}

impl<S: FfmpegSpawner> ConversionRunner<S> {
    pub fn with_spawner(config: CoreConfig, spawner: S) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            spawner,
            publisher: StatusPublisher::new(),
            busy: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Current status snapshot.
    pub fn status(&self) -> ConversionStatus {
        self.publisher.current()
    }

    /// Receiver for every status transition from now on.
    pub fn subscribe(&self) -> Receiver<ConversionStatus> {
        self.publisher.subscribe()
    }

    pub fn publisher(&self) -> &StatusPublisher {
        &self.publisher
    }

    /// True while a conversion holds the runner.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Converts one file on the calling thread.
    ///
    /// The outcome is reported through the status, not the return value. The
    /// only error returned is `CoreError::ConversionInProgress`.
    pub fn convert(&self, path: &Path) -> CoreResult<()> {
        self.try_claim(path)?;
        let _guard = BusyGuard(&self.busy);
        self.run(path);
        Ok(())
    }

    /// Converts one file on a new worker thread.
    ///
    /// The runner is claimed before this returns, so a second call made
    /// while the worker is still running is rejected immediately.
    pub fn spawn_convert(self: &Arc<Self>, path: PathBuf) -> CoreResult<JoinHandle<()>>
    where
        S: 'static,
    {
        self.try_claim(&path)?;

        let runner = Arc::clone(self);
        thread::Builder::new()
            .name("claudio-convert".to_string())
            .spawn(move || {
                let _guard = BusyGuard(&runner.busy);
                runner.run(&path);
            })
            .map_err(|e| {
                self.busy.store(false, Ordering::Release);
                CoreError::ThreadSpawn(e)
            })
    }

    fn try_claim(&self, path: &Path) -> CoreResult<()> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| {
                log::warn!(
                    "Rejected '{}': a conversion is already in progress",
                    path.display()
                );
                CoreError::ConversionInProgress(path.display().to_string())
            })
    }

    fn run(&self, input: &Path) {
        let status = match self.execute(input) {
            Ok(()) => ConversionStatus::Completed,
            Err(error) => ConversionStatus::failed(error),
        };
        self.publisher.publish(status);
    }

    fn execute(&self, input: &Path) -> Result<(), ConversionError> {
        if !paths::is_flac(input) {
            log::warn!("Rejected '{}': not a .flac file", input.display());
            return Err(ConversionError::UnexpectedFiletype);
        }

        let output = paths::output_path_for(input);
        let mut cmd = build_alac_command(&self.config.ffmpeg_path, input, &output);
        log::debug!(
            "Running: {} {:?}",
            self.config.ffmpeg_path.display(),
            command_args(&mut cmd)
        );

        self.publisher
            .publish(ConversionStatus::in_progress(paths::source_filename(input)));

        let mut process = self.spawner.spawn(cmd).map_err(|e| {
            log::error!("Could not launch ffmpeg for '{}': {}", input.display(), e);
            ConversionError::LaunchFailed
        })?;

        match process.drain_output() {
            Ok(stdout) if !stdout.trim().is_empty() => {
                log::debug!("ffmpeg stdout:\n{}", stdout.trim_end());
            }
            Ok(_) => {}
            Err(e) => log::warn!("Failed to read ffmpeg output: {}", e),
        }

        let exit = process.wait().map_err(|e| {
            log::error!("Lost track of ffmpeg for '{}': {}", input.display(), e);
            ConversionError::TaskFailed
        })?;

        if !exit.success() {
            log::warn!("ffmpeg failed for '{}': {}", input.display(), exit);
            return Err(ConversionError::TaskFailed);
        }

        log::info!("Converted '{}' -> '{}'", input.display(), output.display());
        Ok(())
    }
}
