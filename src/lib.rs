//! mp3snip - Trim MP3 files without re-encoding
//!
//! Removes a leading and/or trailing time span from an MPEG audio stream in a
//! single forward pass. Frames are copied verbatim; ID3 tags always pass
//! through.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod mpeg;
#[cfg(feature = "cli")]
pub mod output;
pub mod report;
pub mod source;
pub mod trim;

// Core traits (source → trim → sink)
pub use source::{ScriptedSource, Unit, UnitSource};

// Stream units
pub use mpeg::{Frame, FrameHeader, MpegReader, SummaryHeader, Tag, TagKind};

// Trimming
pub use trim::{PredictionPolicy, RunEvent, RunStats, Snipper, TrimState, TrimWindow};

// Reporting
pub use report::SnipReport;

// Error handling
pub use error::{Result, SnipError};

// Config
pub use config::{Config, ReportFormat};

/// Version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when the git hash was available at build time,
/// `"0.1.0"` otherwise.
pub fn version_string() -> &'static str {
    env!("MP3SNIP_VERSION")
}
