// ============================================================================
// claudio-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// The conversion itself is fixed (FLAC in, ALAC in an .m4a container out), so
// the only runtime setting is where the ffmpeg binary lives. Consumers such as
// claudio-cli build a `CoreConfig` and hand it to the `ConversionRunner`.

use crate::error::{CoreError, CoreResult};

use std::path::PathBuf;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Extension an input file must carry (compared case-sensitively).
pub const SOURCE_EXTENSION: &str = "flac";

/// Extension given to the converted file.
pub const OUTPUT_EXTENSION: &str = "m4a";

/// Audio codec passed to ffmpeg.
pub const AUDIO_CODEC: &str = "alac";

/// ffmpeg is looked up on `PATH` unless configured otherwise.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the claudio-core library.
///
/// # Examples
///
/// ```rust
/// use claudio_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("/opt/homebrew/bin/ffmpeg"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Program used to run the transcoder.
    pub ffmpeg_path: PathBuf,
}

impl CoreConfig {
    pub fn new(ffmpeg_path: PathBuf) -> Self {
        Self { ffmpeg_path }
    }

    /// Checks the configuration before a runner is built from it.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config(
                "ffmpeg path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_FFMPEG_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_ffmpeg_from_path() {
        let config = CoreConfig::default();
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_ffmpeg_path_is_rejected() {
        let config = CoreConfig::new(PathBuf::new());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
