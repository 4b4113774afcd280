//! Core library for converting FLAC files to ALAC (.m4a) with ffmpeg.
//!
//! A front end hands a path to a [`ConversionRunner`] and watches the
//! [`ConversionStatus`] it publishes. The runner accepts only `.flac` paths,
//! writes the result next to the input, and reports one of three failure
//! classifications when something goes wrong.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use claudio_core::{ConversionRunner, CoreConfig};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let runner = Arc::new(ConversionRunner::new(CoreConfig::default()).unwrap());
//! let updates = runner.subscribe();
//!
//! let worker = runner
//!     .spawn_convert(PathBuf::from("/music/my song.flac"))
//!     .unwrap();
//!
//! for status in updates.iter() {
//!     println!("{status}");
//!     if status.is_terminal() {
//!         break;
//!     }
//! }
//! worker.join().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod paths;
pub mod publisher;
pub mod runner;
pub mod status;

// Re-exports for public API
pub use config::CoreConfig;
pub use error::{ConversionError, CoreError, CoreResult};
pub use external::check_dependency;
pub use paths::{is_flac, output_path_for, source_filename};
pub use publisher::{StatusObserver, StatusPublisher};
pub use runner::ConversionRunner;
pub use status::ConversionStatus;
