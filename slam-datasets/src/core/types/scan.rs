//! Laser scan record type.

use super::pose::Pose2D;
use serde::{Deserialize, Serialize};

/// Which laser produced a scan.
///
/// CARMEN logs tag front-mounted lasers as `FLASER` and rear-mounted
/// lasers as `RLASER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaserSource {
    /// Front-mounted laser (`FLASER`)
    Front,
    /// Rear-mounted laser (`RLASER`)
    Rear,
}

impl LaserSource {
    /// Resolve a record tag to a laser source.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "FLASER" => Some(LaserSource::Front),
            "RLASER" => Some(LaserSource::Rear),
            _ => None,
        }
    }

    /// The record tag for this source.
    pub fn tag(&self) -> &'static str {
        match self {
            LaserSource::Front => "FLASER",
            LaserSource::Rear => "RLASER",
        }
    }
}

impl std::fmt::Display for LaserSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One 2D laser scan observation at a point in time.
///
/// Ranges are kept in beam order as read from the log. The angular
/// bounds are symmetric around zero and `angle_increment` is always
/// derived from them and the beam count, never supplied independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserScan2DRecord {
    /// Timestamp in seconds (source-log clock)
    pub stamp: f64,
    /// Sensor/coordinate frame label
    pub frame_id: String,
    /// Laser that produced this scan
    pub source: LaserSource,
    /// Start angle in radians
    pub angle_min: f64,
    /// End angle in radians
    pub angle_max: f64,
    /// Angular resolution (radians between consecutive readings)
    pub angle_increment: f64,
    /// Minimum valid range in meters
    pub range_min: f64,
    /// Maximum range observed in this scan, in meters
    pub range_max: f64,
    /// Range measurements in meters
    pub ranges: Vec<f64>,
    /// Robot pose logged with the scan, if present
    pub pose: Option<Pose2D>,
}

impl LaserScan2DRecord {
    /// Build a record whose angular sweep is `fov_rad` centred on zero.
    ///
    /// `angle_increment` is `fov / (n - 1)` for `n > 1` beams and `0.0` for
    /// a single beam. `range_max` is the largest finite range (or `0.0`).
    pub fn with_symmetric_fov(
        stamp: f64,
        frame_id: impl Into<String>,
        source: LaserSource,
        ranges: Vec<f64>,
        fov_rad: f64,
        pose: Option<Pose2D>,
    ) -> Self {
        let angle_min = -fov_rad / 2.0;
        let angle_max = fov_rad / 2.0;
        let angle_increment = increment_for(angle_min, angle_max, ranges.len());

        let range_max = ranges
            .iter()
            .copied()
            .filter(|r| r.is_finite())
            .fold(0.0_f64, f64::max);

        Self {
            stamp,
            frame_id: frame_id.into(),
            source,
            angle_min,
            angle_max,
            angle_increment,
            range_min: 0.0,
            range_max,
            ranges,
            pose,
        }
    }

    /// Number of range measurements.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if scan is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Get the angle for a given beam index.
    #[inline]
    pub fn angle_at(&self, index: usize) -> f64 {
        self.angle_min + index as f64 * self.angle_increment
    }

    /// Iterate over (angle, range) pairs in beam order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .map(move |(i, &range)| (self.angle_at(i), range))
    }

    /// Validate internal consistency of the record.
    ///
    /// Returns Ok(()) if valid, or an error message describing the inconsistency.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.ranges.is_empty() {
            return Err("scan has no ranges");
        }
        if !(self.angle_min <= self.angle_max) {
            return Err("angle_min is greater than angle_max");
        }
        let expected = increment_for(self.angle_min, self.angle_max, self.ranges.len());
        if (self.angle_increment - expected).abs() > 1e-12 {
            return Err("angle_increment does not match bounds and range count");
        }
        Ok(())
    }
}

fn increment_for(angle_min: f64, angle_max: f64, count: usize) -> f64 {
    if count > 1 {
        (angle_max - angle_min) / (count - 1) as f64
    } else {
        0.0
    }
}
