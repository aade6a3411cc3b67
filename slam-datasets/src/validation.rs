//! Integrity checks over a scan sequence.
//!
//! Collects the figures needed to decide whether a log is usable for
//! offline SLAM runs without re-parsing it:
//!
//! - **Scan count** and reader counters (malformed / skipped lines)
//! - **Timestamp monotonicity**: stamps must be strictly increasing
//! - **Scan sizes**: distinct beam counts seen
//! - **Scan period**: mean, population std-dev, min and max of stamp deltas
//! - **Sanity flags**: empty scans, NaN stamps, scans carrying a pose,
//!   poses with non-finite components

use std::collections::BTreeSet;
use std::path::Path;

use crate::core::types::LaserScan2DRecord;
use crate::error::Result;
use crate::io::carmen::{CarmenLogReader, ReaderOptions, ReaderStats};

/// Statistics for a set of measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    /// Number of samples
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl Stats {
    /// Compute statistics from a slice of values.
    pub fn from_slice(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;

        let variance: f64 = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();

        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        Self {
            count,
            mean,
            std_dev,
            min,
            max,
        }
    }
}

/// Result of validating one log.
#[derive(Debug, Clone, Default)]
pub struct LogSummary {
    /// Records yielded by the reader
    pub scan_count: usize,
    /// Laser lines the reader had to skip
    pub malformed_lines: u64,
    /// Non-laser lines (comments, other tags, blanks)
    pub skipped_lines: u64,
    /// Every stamp is greater than the one before it
    pub strictly_increasing: bool,
    /// Distinct beam counts
    pub scan_sizes: BTreeSet<usize>,
    /// Stamp deltas between consecutive scans; `None` with fewer than 2 scans
    pub period: Option<Stats>,
    /// Some scan had no ranges
    pub any_empty: bool,
    /// Some stamp was NaN
    pub any_nan_stamp: bool,
    /// Scans that carried a pose
    pub scans_with_pose: usize,
    /// Poses logged with NaN or infinite components
    pub non_finite_poses: usize,
}

impl LogSummary {
    /// A log is usable when it produced at least one record.
    pub fn is_usable(&self) -> bool {
        self.scan_count > 0
    }
}

impl std::fmt::Display for LogSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total scans: {}", self.scan_count)?;
        writeln!(f, "Malformed lines: {}", self.malformed_lines)?;
        writeln!(f, "Skipped lines: {}", self.skipped_lines)?;
        writeln!(f, "Timestamps strictly increasing: {}", self.strictly_increasing)?;
        writeln!(f, "Unique scan sizes: {:?}", self.scan_sizes)?;
        if let Some(period) = &self.period {
            writeln!(f, "Mean scan period (s): {:.6}", period.mean)?;
            writeln!(f, "Std scan period (s): {:.6}", period.std_dev)?;
            writeln!(f, "Min / Max scan period: {:.6} {:.6}", period.min, period.max)?;
        }
        writeln!(f, "Scans with pose: {}", self.scans_with_pose)?;
        writeln!(f, "Non-finite poses: {}", self.non_finite_poses)?;
        writeln!(f, "Any empty scans: {}", self.any_empty)?;
        write!(f, "Any NaNs: {}", self.any_nan_stamp)
    }
}

/// Accumulates a [`LogSummary`] one scan at a time.
#[derive(Debug, Clone)]
pub struct LogValidator {
    scan_count: usize,
    last_stamp: Option<f64>,
    periods: Vec<f64>,
    strictly_increasing: bool,
    scan_sizes: BTreeSet<usize>,
    any_empty: bool,
    any_nan_stamp: bool,
    scans_with_pose: usize,
    non_finite_poses: usize,
}

impl Default for LogValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl LogValidator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self {
            scan_count: 0,
            last_stamp: None,
            periods: Vec::new(),
            strictly_increasing: true,
            scan_sizes: BTreeSet::new(),
            any_empty: false,
            any_nan_stamp: false,
            scans_with_pose: 0,
            non_finite_poses: 0,
        }
    }

    /// Account for one scan.
    pub fn observe(&mut self, scan: &LaserScan2DRecord) {
        self.scan_count += 1;
        self.scan_sizes.insert(scan.len());
        self.any_empty |= scan.is_empty();
        self.any_nan_stamp |= scan.stamp.is_nan();
        if let Some(pose) = &scan.pose {
            self.scans_with_pose += 1;
            if !pose.is_finite() {
                self.non_finite_poses += 1;
            }
        }

        if let Some(last) = self.last_stamp {
            // A NaN on either side also breaks monotonicity
            if scan.stamp.partial_cmp(&last) != Some(std::cmp::Ordering::Greater) {
                self.strictly_increasing = false;
            }
            let dt = scan.stamp - last;
            if dt.is_finite() {
                self.periods.push(dt);
            }
        }
        self.last_stamp = Some(scan.stamp);
    }

    /// Produce the summary, folding in the reader's line counters.
    pub fn finish(self, reader_stats: ReaderStats) -> LogSummary {
        let period = if self.periods.is_empty() {
            None
        } else {
            Some(Stats::from_slice(&self.periods))
        };

        LogSummary {
            scan_count: self.scan_count,
            malformed_lines: reader_stats.malformed_lines,
            skipped_lines: reader_stats.skipped_lines,
            strictly_increasing: self.strictly_increasing,
            scan_sizes: self.scan_sizes,
            period,
            any_empty: self.any_empty,
            any_nan_stamp: self.any_nan_stamp,
            scans_with_pose: self.scans_with_pose,
            non_finite_poses: self.non_finite_poses,
        }
    }
}

/// Read a whole CARMEN log and summarise it.
///
/// Fails only on open errors or I/O errors mid-stream; malformed lines are
/// counted in the summary.
pub fn validate_carmen_log(path: impl AsRef<Path>, options: ReaderOptions) -> Result<LogSummary> {
    let mut scans = CarmenLogReader::open(path, options)?.iter_scans();
    let mut validator = LogValidator::new();

    while let Some(scan) = scans.next_scan()? {
        validator.observe(&scan);
    }

    Ok(validator.finish(scans.stats()))
}
