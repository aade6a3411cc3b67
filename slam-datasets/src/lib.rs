//! slam-datasets - Streaming readers for offline SLAM datasets
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 validation / main                   │  ← Log integrity checks, CLI
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Dataset readers
//! │                    (carmen)                         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Record types
//! │           (Pose2D, LaserScan2DRecord)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use slam_datasets::{CarmenLogReader, ReaderOptions};
//!
//! let reader = CarmenLogReader::open("intel.clf.gz", ReaderOptions::default())?;
//! for scan in reader.iter_scans() {
//!     let scan = scan?;
//!     println!("{:.3}s {} beams", scan.stamp, scan.ranges.len());
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Scans follow ROS REP-103: angles are CCW positive from the sensor's +X
//! axis, so a 180° scanner sweeps from -π/2 (right) to +π/2 (left).

#![warn(missing_docs)]

// Core types
pub mod core;

// Dataset readers
pub mod io;

// Log integrity statistics
pub mod validation;

// Tool configuration
pub mod config;

// Error types
pub mod error;

// Re-export commonly used types
pub use crate::core::types::{LaserScan2DRecord, LaserSource, Pose2D};

pub use io::carmen::{
    CarmenLogReader, CarmenScans, LineError, MalformedLine, ReaderOptions, ReaderStats,
};

pub use validation::{LogSummary, LogValidator, Stats, validate_carmen_log};

pub use config::DatasetsConfig;

pub use error::{Error, Result};
