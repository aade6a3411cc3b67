//! CARMEN robot log reading.
//!
//! Streams FLASER/RLASER laser records out of CARMEN text logs,
//! transparently decompressing `.gz` files.
//!
//! # Line Format
//!
//! ```text
//! FLASER <n> <r1> ... <rn> <x> <y> <theta> <odom_x> <odom_y> <odom_theta> <ipc_timestamp> <hostname> <logger_timestamp>
//! RLASER <n> <r1> ... <rn> <x> <y> <theta> ...
//! ```
//!
//! FLASER/RLASER lines carry no angular metadata, so every scan is given a
//! symmetric sweep from the configured field of view
//! ([`ReaderOptions::assume_fov_deg`], 180° by default). This is an
//! approximation of the sensor, not a measurement.
//!
//! Lines with other tags, comments, and blank lines are skipped. Laser
//! lines that fail to parse, or run past [`MAX_LINE_BYTES`], are counted in
//! [`ReaderStats`], logged, and passed to the optional
//! [`CarmenLogReader::on_malformed`] callback; they never stop the sequence.
//!
//! Gzip logs may consist of several concatenated members; all of them are
//! read.
//!
//! # Example
//!
//! ```ignore
//! use slam_datasets::io::carmen::{CarmenLogReader, ReaderOptions};
//!
//! let reader = CarmenLogReader::open("mit-csail-3rd-floor.log", ReaderOptions::default())?;
//! for scan in reader.iter_scans() {
//!     let scan = scan?;
//!     println!("{:.3}: {} beams, pose {:?}", scan.stamp, scan.len(), scan.pose);
//! }
//! ```

mod parser;
mod reader;
mod types;

pub use parser::{Classified, classify_line, parse_laser_fields};
pub use reader::{CarmenLogReader, CarmenScans, MAX_LINE_BYTES};
pub use types::{
    DEFAULT_FOV_DEG, DEFAULT_FRAME_ID, LineError, MalformedLine, ReaderOptions, ReaderStats,
};

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
pub use test_fixtures::CarmenTestFixture;
