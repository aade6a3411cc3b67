//! Test fixtures for generating temporary CARMEN logs.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// Test fixture for log reader testing.
///
/// Writes a log into a temporary directory that is removed when the
/// fixture is dropped.
pub struct CarmenTestFixture {
    temp_dir: TempDir,
    log_path: PathBuf,
}

impl CarmenTestFixture {
    /// Plain-text log containing `lines`, each newline-terminated.
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::from_bytes(join_lines(lines).as_bytes())
    }

    /// Plain-text log with exact byte content.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("fixture.log");
        std::fs::write(&log_path, bytes).expect("Failed to write log");
        Self { temp_dir, log_path }
    }

    /// Gzip-compressed log containing `lines`.
    pub fn gzip_from_lines(lines: &[&str]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("fixture.log.gz");

        let file = File::create(&log_path).expect("Failed to create log");
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(join_lines(lines).as_bytes())
            .expect("Failed to compress log");
        encoder.finish().expect("Failed to finish gzip stream");

        Self { temp_dir, log_path }
    }

    /// Gzip log made of several concatenated members, one per group.
    pub fn gzip_members(members: &[&[&str]]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("fixture.log.gz");

        let mut file = File::create(&log_path).expect("Failed to create log");
        for lines in members {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder
                .write_all(join_lines(lines).as_bytes())
                .expect("Failed to compress log");
            let member = encoder.finish().expect("Failed to finish gzip stream");
            file.write_all(&member).expect("Failed to write log");
        }

        Self { temp_dir, log_path }
    }

    /// Canonical FLASER log of a robot driving along +x.
    ///
    /// Contains:
    /// - a header comment and one PARAM line
    /// - `scans` FLASER lines with `beams` readings each, 0.1 s apart
    ///   starting at t = 1000 s
    pub fn straight_run(scans: usize, beams: usize) -> Self {
        let mut lines = vec![
            "# CARMEN Logfile".to_string(),
            "PARAM robot_front_laser_max 50.0 nohost 0.0".to_string(),
        ];

        for i in 0..scans {
            let stamp = 1000.0 + i as f64 * 0.1;
            let x = i as f64 * 0.05;
            let ranges: Vec<String> = (0..beams)
                .map(|b| format!("{:.2}", 2.0 + b as f64 * 0.01))
                .collect();
            lines.push(format!(
                "FLASER {} {} {:.3} 0.000 0.000 {:.3} 0.000 0.000 {:.3} fixture {:.3}",
                beams,
                ranges.join(" "),
                x,
                x,
                stamp,
                stamp + 0.001
            ));
        }

        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        Self::from_lines(&refs)
    }

    /// Get path to the log file.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Get the temporary directory (for additional files).
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

fn join_lines(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::carmen::{CarmenLogReader, ReaderOptions};

    #[test]
    fn test_straight_run() {
        let fixture = CarmenTestFixture::straight_run(10, 181);
        let scans: Vec<_> = CarmenLogReader::open(fixture.path(), ReaderOptions::default())
            .unwrap()
            .iter_scans()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(scans.len(), 10);
        assert!(scans.iter().all(|s| s.len() == 181));
        assert!((scans[9].stamp - 1000.9).abs() < 1e-9);
        assert!((scans[9].pose.unwrap().x - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_gzip_fixture_is_compressed() {
        let fixture = CarmenTestFixture::gzip_from_lines(&["FLASER 1 1.0"]);
        let bytes = std::fs::read(fixture.path()).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }
}
