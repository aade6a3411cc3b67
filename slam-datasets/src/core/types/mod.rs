//! Core record types produced by dataset readers.
//!
//! - [`Pose2D`]: Robot pose (x, y, theta) in meters and radians
//! - [`LaserScan2DRecord`]: One timestamped 2D laser scan
//! - [`LaserSource`]: Which laser a scan came from

mod pose;
mod scan;

pub use pose::Pose2D;
pub use scan::{LaserScan2DRecord, LaserSource};
