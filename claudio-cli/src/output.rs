//! Terminal rendering of conversion status.
//!
//! Labels go to stdout. While a conversion is running a spinner is drawn on
//! stderr; indicatif hides it automatically when stderr is not a terminal.

use claudio_core::{ConversionStatus, CoreError};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// How status changes are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable label per status.
    Text,
    /// One JSON object per status, one per line.
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Renders each status the runner publishes.
pub struct StatusRenderer {
    mode: OutputMode,
    spinner: Option<ProgressBar>,
}

impl StatusRenderer {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            spinner: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn render(&mut self, status: &ConversionStatus) {
        self.finish_spinner();
        match self.mode {
            OutputMode::Json => println!("{}", status_json(status)),
            OutputMode::Text => match status {
                ConversionStatus::InProgress { .. } => self.start_spinner(&status.to_string()),
                ConversionStatus::Completed => println!("{}", status.green().bold()),
                ConversionStatus::Failed { .. } => println!("{}", status.red().bold()),
                ConversionStatus::Idle => println!("{}", status.dimmed()),
            },
        }
    }

    /// Reports a drop that was turned away because a conversion is running.
    pub fn render_rejection(&mut self, error: &CoreError) {
        let message = error.to_string();
        match self.mode {
            OutputMode::Json => println!(
                "{}",
                serde_json::json!({ "state": "rejected", "message": message })
            ),
            OutputMode::Text => match &self.spinner {
                Some(spinner) => spinner.println(format!("{}", message.yellow())),
                None => println!("{}", message.yellow()),
            },
        }
    }

    fn start_spinner(&mut self, message: &str) {
        // The label is printed as well so it survives in non-terminal output.
        println!("{message}");
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(pb);
    }

    fn finish_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for StatusRenderer {
    fn drop(&mut self) {
        self.finish_spinner();
    }
}

/// JSON line for one status.
pub fn status_json(status: &ConversionStatus) -> String {
    serde_json::to_string(status).unwrap_or_else(|e| {
        log::error!("Failed to serialize status {:?}: {}", status, e);
        format!("{{\"state\":\"unknown\",\"label\":{:?}}}", status.to_string())
    })
}
