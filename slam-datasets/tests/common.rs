//! Test utilities for slam-datasets integration tests.
//!
//! Helpers for writing CARMEN logs into temporary directories.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use slam_datasets::{CarmenLogReader, LaserScan2DRecord, ReaderOptions, ReaderStats};

/// A FLASER line in the canonical 9-field trailer layout.
pub fn flaser_line(ranges: &[f64], pose: (f64, f64, f64), stamp: f64) -> String {
    let ranges: Vec<String> = ranges.iter().map(|r| format!("{:.3}", r)).collect();
    format!(
        "FLASER {} {} {:.4} {:.4} {:.4} {:.4} {:.4} {:.4} {:.6} testhost {:.6}",
        ranges.len(),
        ranges.join(" "),
        pose.0,
        pose.1,
        pose.2,
        pose.0,
        pose.1,
        pose.2,
        stamp,
        stamp + 0.01
    )
}

/// A log resembling a real run: header, params, odometry, and laser lines
/// from both lasers.
pub fn mixed_log_lines(scans: usize) -> Vec<String> {
    let mut lines = vec![
        "# CARMEN Logfile".to_string(),
        "# file format is one message per line".to_string(),
        "PARAM robot_front_laser_max 50.0 nohost 0.0".to_string(),
    ];

    for i in 0..scans {
        let t = 1_134_847_540.0 + i as f64 * 0.2;
        let x = i as f64 * 0.1;
        lines.push(format!(
            "ODOM {:.4} 0.0000 0.0000 0.2 0.0 0.0 {:.6} testhost {:.6}",
            x,
            t - 0.05,
            t - 0.04
        ));
        let ranges: Vec<f64> = (0..180).map(|b| 1.0 + (b % 7) as f64 * 0.5).collect();
        lines.push(flaser_line(&ranges, (x, 0.0, 0.0), t));
        if i % 2 == 0 {
            let rear: Vec<f64> = (0..90).map(|b| 3.0 + b as f64 * 0.01).collect();
            let ranges: Vec<String> = rear.iter().map(|r| format!("{:.3}", r)).collect();
            lines.push(format!(
                "RLASER {} {} {:.4} 0.0000 3.1416 0.2 0.0 0.0 0.0 0.0 {:.6} testhost",
                rear.len(),
                ranges.join(" "),
                x,
                t + 0.1
            ));
        }
    }

    lines
}

/// A log file in a temporary directory.
pub struct TempLog {
    dir: TempDir,
    path: PathBuf,
}

impl TempLog {
    /// Write `lines` as a plain log named `name`.
    pub fn plain(name: &str, lines: &[String]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join(name);
        std::fs::write(&path, join(lines)).expect("Failed to write log");
        Self { dir, path }
    }

    /// Write `lines` as a gzip-compressed log named `name`.
    pub fn gzip(name: &str, lines: &[String]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join(name);
        let mut encoder = GzEncoder::new(
            File::create(&path).expect("Failed to create log"),
            Compression::best(),
        );
        encoder
            .write_all(join(lines).as_bytes())
            .expect("Failed to compress log");
        encoder.finish().expect("Failed to finish gzip stream");
        Self { dir, path }
    }

    /// Write each group of lines as its own gzip member, concatenated into
    /// one file as `cat a.gz b.gz` would.
    pub fn gzip_members(name: &str, members: &[&[String]]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("Failed to create log");
        for lines in members {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder
                .write_all(join(lines).as_bytes())
                .expect("Failed to compress log");
            let member = encoder.finish().expect("Failed to finish gzip stream");
            file.write_all(&member).expect("Failed to write log");
        }
        Self { dir, path }
    }

    /// Path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the log.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Read every scan from `path`, panicking on I/O errors.
pub fn read_all(path: &Path, options: ReaderOptions) -> (Vec<LaserScan2DRecord>, ReaderStats) {
    let mut scans = CarmenLogReader::open(path, options)
        .expect("Failed to open log")
        .iter_scans();
    let mut records = Vec::new();
    while let Some(scan) = scans.next_scan().expect("Read error") {
        records.push(scan);
    }
    (records, scans.stats())
}

fn join(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}
