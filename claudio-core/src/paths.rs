//! Path checks and derivation for conversion requests.

use crate::config::{OUTPUT_EXTENSION, SOURCE_EXTENSION};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Returns true when the final extension is exactly `flac`.
///
/// The comparison is case-sensitive, so `song.FLAC` is not accepted.
#[must_use]
pub fn is_flac(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(SOURCE_EXTENSION))
}

/// Derives the output path: same directory and stem, final extension `m4a`.
///
/// Only the last extension is replaced, so `song.flac.flac` becomes
/// `song.flac.m4a`.
#[must_use]
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Last path component, as reported in the in-progress status.
#[must_use]
pub fn source_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
