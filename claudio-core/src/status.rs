//! Conversion status model.
//!
//! A `ConversionStatus` describes where the most recent conversion attempt
//! stands. Transitions are strictly sequential:
//! `Idle | Failed | Completed -> InProgress -> Failed | Completed`, plus the
//! direct `-> Failed(UnexpectedFiletype)` when the extension check rejects a
//! path before anything is launched.

use crate::error::ConversionError;
use serde::Serialize;
use std::fmt;

/// Lifecycle state of one conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversionStatus {
    /// No conversion has been requested yet.
    #[default]
    Idle,

    /// ffmpeg is running for the file with this name (last path component only).
    InProgress { filename: String },

    /// The most recent attempt ended unsuccessfully.
    Failed { error: ConversionError },

    /// The most recent attempt succeeded.
    Completed,
}

impl ConversionStatus {
    pub fn in_progress(filename: impl Into<String>) -> Self {
        Self::InProgress {
            filename: filename.into(),
        }
    }

    pub fn failed(error: ConversionError) -> Self {
        Self::Failed { error }
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress { .. })
    }

    /// True for the two states an attempt can end in.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Completed)
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Drop FLAC here"),
            Self::InProgress { filename } => write!(f, "Converting {filename}"),
            Self::Failed { error } => write!(f, "{error}"),
            Self::Completed => f.write_str("Done"),
        }
    }
}
