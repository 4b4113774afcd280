//! Implementation of the 'convert' subcommand.
//!
//! Hands one path to the runner, which converts it on a worker thread, and
//! renders every status change on this thread until the attempt ends.

use crate::cli::ConvertArgs;
use crate::cli_error;
use crate::error::CliResult;
use crate::output::StatusRenderer;

use claudio_core::external::FfmpegSpawner;
use claudio_core::{ConversionRunner, ConversionStatus};

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Converts one file and returns the final status.
pub fn run_convert<S>(
    runner: &Arc<ConversionRunner<S>>,
    args: ConvertArgs,
    renderer: &mut StatusRenderer,
) -> CliResult<ConversionStatus>
where
    S: FfmpegSpawner + 'static,
{
    if !args.input_path.exists() {
        log::warn!("Input '{}' does not exist", args.input_path.display());
    }

    let updates = runner.subscribe();
    let worker = runner.spawn_convert(args.input_path)?;
    follow_worker(&updates, worker, renderer)?;

    Ok(runner.status())
}

/// Renders updates until the worker has finished and every update is shown.
pub(crate) fn follow_worker(
    updates: &Receiver<ConversionStatus>,
    worker: JoinHandle<()>,
    renderer: &mut StatusRenderer,
) -> CliResult<()> {
    loop {
        match updates.recv_timeout(POLL_INTERVAL) {
            Ok(status) => renderer.render(&status),
            Err(RecvTimeoutError::Timeout) if worker.is_finished() => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    for status in updates.try_iter() {
        renderer.render(&status);
    }

    worker
        .join()
        .map_err(|_| cli_error!("Conversion worker panicked"))
}
