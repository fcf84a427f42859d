//! Default configuration constants for mp3snip.
//!
//! Shared between the config file, the CLI and the library so that the
//! defaults live in one place.

/// Name used for the config directory and environment variable prefix.
pub const APP_NAME: &str = "mp3snip";

/// Buffer capacity for the input reader and output writer.
///
/// 64 KiB comfortably holds the largest MPEG audio frame (free-format
/// excluded) many times over.
pub const IO_BUFFER_BYTES: usize = 64 * 1024;

/// Environment variable overriding the frame-count prediction policy.
pub const ENV_PREDICTION: &str = "MP3SNIP_PREDICTION";

/// Environment variable overriding the summary report format.
pub const ENV_REPORT_FORMAT: &str = "MP3SNIP_REPORT_FORMAT";

/// Horizontal rule printed around the text summary.
pub const RULE: &str =
    "------------------------------------------------------------------------------------";
