//! Core foundation layer.
//!
//! Plain data carriers with no I/O. Every other layer depends on core.
//!
//! # Contents
//!
//! - [`types`]: Record types (poses, laser scans)

pub mod types;
