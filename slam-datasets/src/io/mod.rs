//! I/O layer: dataset readers.
//!
//! # Contents
//!
//! - [`carmen`]: CARMEN laser log reader

pub mod carmen;

pub use carmen::{CarmenLogReader, CarmenScans, ReaderOptions, ReaderStats};
