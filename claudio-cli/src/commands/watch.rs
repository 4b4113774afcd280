//! Implementation of the 'watch' subcommand.
//!
//! Every line read from stdin counts as one dropped file. Terminals paste a
//! dragged file either quoted or with backslash-escaped spaces, so both forms
//! are accepted. Conversions run on the runner's worker thread while this
//! thread keeps reading drops and rendering status changes. A drop that
//! arrives while a conversion is running is reported and ignored.

use crate::cli_error;
use crate::error::CliResult;
use crate::output::StatusRenderer;

use claudio_core::external::FfmpegSpawner;
use claudio_core::{ConversionRunner, ConversionStatus, CoreError};

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

enum WatchEvent {
    Dropped(PathBuf),
    Status(ConversionStatus),
    InputClosed,
}

/// Turns one line of input into a path, or `None` for a blank line.
pub fn parse_dropped_path(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    for quote in ['\'', '"'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return Some(PathBuf::from(&trimmed[1..trimmed.len() - 1]));
        }
    }

    Some(PathBuf::from(trimmed.replace("\\ ", " ")))
}

fn spawn_reader<R>(input: R, events: Sender<WatchEvent>) -> CliResult<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("claudio-stdin".to_string())
        .spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => {
                        if let Some(path) = parse_dropped_path(&line) {
                            if events.send(WatchEvent::Dropped(path)).is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!("Stopped reading input: {}", e);
                        break;
                    }
                }
            }
            let _ = events.send(WatchEvent::InputClosed);
        })
        .map_err(CoreError::ThreadSpawn)
}

/// Runs until `input` is exhausted and the last conversion has finished.
pub fn run_watch<S, R>(
    runner: &Arc<ConversionRunner<S>>,
    input: R,
    renderer: &mut StatusRenderer,
) -> CliResult<()>
where
    S: FfmpegSpawner + 'static,
    R: BufRead + Send + 'static,
{
    let (tx, events) = mpsc::channel();

    let status_tx = tx.clone();
    runner
        .publisher()
        .add_observer(Arc::new(move |status: &ConversionStatus| {
            let _ = status_tx.send(WatchEvent::Status(status.clone()));
        }));

    renderer.render(&runner.status());
    let reader = spawn_reader(input, tx)?;

    let mut worker: Option<JoinHandle<()>> = None;
    for event in events.iter() {
        match event {
            WatchEvent::Dropped(path) => match runner.spawn_convert(path) {
                Ok(handle) => worker = Some(handle),
                Err(e @ CoreError::ConversionInProgress(_)) => renderer.render_rejection(&e),
                Err(e) => return Err(e),
            },
            WatchEvent::Status(status) => renderer.render(&status),
            WatchEvent::InputClosed => break,
        }
    }

    if let Some(handle) = worker.take() {
        handle
            .join()
            .map_err(|_| cli_error!("Conversion worker panicked"))?;
    }
    for event in events.try_iter() {
        if let WatchEvent::Status(status) = event {
            renderer.render(&status);
        }
    }

    if reader.join().is_err() {
        log::warn!("Input reader thread panicked");
    }
    Ok(())
}
