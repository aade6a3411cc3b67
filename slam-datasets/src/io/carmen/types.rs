//! Options, counters, and line diagnostics for the CARMEN reader.

use serde::{Deserialize, Serialize};

use crate::core::types::LaserSource;
use crate::error::{Error, Result};

/// Frame label used when none is configured.
pub const DEFAULT_FRAME_ID: &str = "laser";

/// Field of view assumed for FLASER/RLASER lines (SICK LMS class scanners).
pub const DEFAULT_FOV_DEG: f64 = 180.0;

/// Reader configuration, fixed at open time.
///
/// Loaded from the `[reader]` table of the CLI config file:
///
/// ```toml
/// [reader]
/// scan_frame_id = "front_laser"
/// assume_fov_deg = 180.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Value copied into every record's `frame_id`
    pub scan_frame_id: String,
    /// Field of view in degrees assumed when a line carries no angular bounds
    pub assume_fov_deg: f64,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            scan_frame_id: DEFAULT_FRAME_ID.to_string(),
            assume_fov_deg: DEFAULT_FOV_DEG,
        }
    }
}

impl ReaderOptions {
    /// Check that the options describe a usable sensor model.
    pub fn validate(&self) -> Result<()> {
        if !self.assume_fov_deg.is_finite()
            || self.assume_fov_deg <= 0.0
            || self.assume_fov_deg > 360.0
        {
            return Err(Error::InvalidOptions(format!(
                "assume_fov_deg must be in (0, 360], got {}",
                self.assume_fov_deg
            )));
        }
        Ok(())
    }

    /// Assumed field of view in radians.
    #[inline]
    pub fn fov_rad(&self) -> f64 {
        self.assume_fov_deg.to_radians()
    }
}

/// Why a line with a recognized tag could not become a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineError {
    /// Tag present but nothing follows it
    #[error("missing reading count")]
    MissingCount,

    /// Count token is not a non-negative integer
    #[error("invalid reading count {0:?}")]
    InvalidCount(String),

    /// Count is zero, so no scan can be built
    #[error("reading count is zero")]
    EmptyScan,

    /// Fewer range tokens than the declared count
    #[error("expected {expected} range readings, found {found}")]
    MissingRanges {
        /// Declared reading count
        expected: usize,
        /// Tokens actually available
        found: usize,
    },

    /// A range token is not a number
    #[error("range reading {index} is not a number: {token:?}")]
    InvalidRange {
        /// Zero-based beam index
        index: usize,
        /// Offending token
        token: String,
    },

    /// Line exceeds the reader's length limit
    #[error("line longer than {limit} bytes")]
    LineTooLong {
        /// Limit in bytes
        limit: usize,
    },
}

/// A skipped line, as reported to the malformed-line callback.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedLine {
    /// One-based line number in the (decompressed) log
    pub line_number: u64,
    /// Tag the line started with
    pub source: LaserSource,
    /// Parse failure
    pub reason: LineError,
}

impl std::fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} ({}): {}", self.line_number, self.source, self.reason)
    }
}

/// Running counters for one pass over a log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Lines consumed from the stream
    pub lines_read: u64,
    /// Records handed to the caller
    pub scans_yielded: u64,
    /// FLASER/RLASER lines that failed to parse
    pub malformed_lines: u64,
    /// Blank, comment, and unsupported-tag lines
    pub skipped_lines: u64,
}
