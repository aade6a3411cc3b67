//! Streaming reader for CARMEN log files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use super::parser::{Classified, classify_line};
use super::types::{LineError, MalformedLine, ReaderOptions, ReaderStats};
use crate::core::types::{LaserScan2DRecord, LaserSource};
use crate::error::{Error, Result};

const READ_BUFFER_SIZE: usize = 64 * 1024;
const LINE_BUFFER_CAPACITY: usize = 4096;

/// Longest line accepted, in bytes. Longer lines are skipped.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

type LineSource = Box<dyn BufRead + Send>;
type MalformedCallback = Box<dyn FnMut(&MalformedLine) + Send>;

/// Reader for CARMEN laser logs (`.log`, `.clf`, optionally `.gz`).
///
/// Opening validates the options, opens the file and fills the first
/// buffer, so missing files and broken gzip headers are reported here
/// rather than on the first pull. Nothing else is read until the caller
/// asks for records.
///
/// # Example
///
/// ```ignore
/// use slam_datasets::{CarmenLogReader, ReaderOptions};
///
/// let reader = CarmenLogReader::open("csail.log.gz", ReaderOptions::default())?
///     .on_malformed(|line| eprintln!("skipped {}", line));
///
/// let mut scans = reader.iter_scans();
/// while let Some(scan) = scans.next_scan()? {
///     println!("{:.3}: {} beams", scan.stamp, scan.len());
/// }
/// println!("{} malformed lines", scans.stats().malformed_lines);
/// ```
pub struct CarmenLogReader {
    path: PathBuf,
    options: ReaderOptions,
    source: LineSource,
    on_malformed: Option<MalformedCallback>,
}

impl CarmenLogReader {
    /// Open a log file for reading.
    ///
    /// Files with a `.gz` extension are decompressed while streaming, across
    /// every gzip member of concatenated archives; any other extension is
    /// read as plain text. A zero-byte `.gz` file reads as an empty log.
    pub fn open(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        options.validate()?;

        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        let is_empty = file.metadata().is_ok_and(|meta| meta.len() == 0);
        let file = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let compressed = is_gzip_path(&path);
        let mut source: LineSource = if compressed && is_empty {
            Box::new(std::io::empty())
        } else if compressed {
            Box::new(BufReader::with_capacity(
                READ_BUFFER_SIZE,
                MultiGzDecoder::new(file),
            ))
        } else {
            Box::new(file)
        };

        // The gzip header is parsed on first read
        if let Err(e) = source.fill_buf() {
            return Err(if compressed {
                Error::Decompress { path, source: e }
            } else {
                Error::Open { path, source: e }
            });
        }

        log::debug!(
            "Opened CARMEN log {} ({})",
            path.display(),
            if compressed { "gzip" } else { "plain text" }
        );

        Ok(Self {
            path,
            options,
            source,
            on_malformed: None,
        })
    }

    /// Wrap an already-open text stream (stdin, in-memory buffers).
    ///
    /// `label` stands in for the path in diagnostics.
    pub fn from_reader(
        reader: impl BufRead + Send + 'static,
        label: impl Into<PathBuf>,
        options: ReaderOptions,
    ) -> Result<Self> {
        options.validate()?;

        let mut source: LineSource = Box::new(reader);
        source.fill_buf()?;

        Ok(Self {
            path: label.into(),
            options,
            source,
            on_malformed: None,
        })
    }

    /// Register a callback invoked once per skipped malformed line.
    pub fn on_malformed<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&MalformedLine) + Send + 'static,
    {
        self.on_malformed = Some(Box::new(callback));
        self
    }

    /// Path (or label) of the log being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start the lazy scan sequence.
    ///
    /// Consumes the reader: a sequence is forward-only and cannot be
    /// restarted. Open the file again to read it a second time.
    pub fn iter_scans(self) -> CarmenScans {
        CarmenScans {
            path: self.path,
            options: self.options,
            source: Some(self.source),
            on_malformed: self.on_malformed,
            line_buffer: Vec::with_capacity(LINE_BUFFER_CAPACITY),
            stats: ReaderStats::default(),
        }
    }
}

/// Lazy, forward-only sequence of scans from one CARMEN log.
///
/// Each pull reads lines until one yields a record or the stream ends.
/// The file handle is released as soon as the end of the stream or an
/// I/O error is reached, and in any case when this value is dropped.
pub struct CarmenScans {
    path: PathBuf,
    options: ReaderOptions,
    source: Option<LineSource>,
    on_malformed: Option<MalformedCallback>,
    line_buffer: Vec<u8>,
    stats: ReaderStats,
}

impl CarmenScans {
    /// Read the next scan record.
    ///
    /// Returns `None` at end of stream. An I/O error is returned once and
    /// ends the sequence.
    pub fn next_scan(&mut self) -> Result<Option<LaserScan2DRecord>> {
        loop {
            let Some(source) = self.source.as_mut() else {
                return Ok(None);
            };

            self.line_buffer.clear();
            if self.line_buffer.capacity() > READ_BUFFER_SIZE {
                self.line_buffer.shrink_to(LINE_BUFFER_CAPACITY);
            }

            let read = read_line_capped(source, &mut self.line_buffer);
            let (read, truncated) = match read {
                Ok(read) => read,
                Err(e) => {
                    log::warn!("Read error in {}: {}", self.path.display(), e);
                    self.release();
                    return Err(e.into());
                }
            };

            if read == 0 {
                log::debug!(
                    "Finished {}: {} scans, {} malformed, {} skipped",
                    self.path.display(),
                    self.stats.scans_yielded,
                    self.stats.malformed_lines,
                    self.stats.skipped_lines
                );
                self.release();
                return Ok(None);
            }

            self.stats.lines_read += 1;

            let classified = if truncated {
                classify_overlong(&self.line_buffer)
            } else {
                let line = String::from_utf8_lossy(&self.line_buffer);
                classify_line(&line, &self.options)
            };

            match classified {
                Classified::Scan(scan) => {
                    self.stats.scans_yielded += 1;
                    return Ok(Some(scan));
                }
                Classified::Skipped => self.stats.skipped_lines += 1,
                Classified::Malformed(source, reason) => {
                    self.stats.malformed_lines += 1;
                    let malformed = MalformedLine {
                        line_number: self.stats.lines_read,
                        source,
                        reason,
                    };
                    log::warn!(
                        "Skipping malformed line in {}: {}",
                        self.path.display(),
                        malformed
                    );
                    if let Some(callback) = self.on_malformed.as_mut() {
                        callback(&malformed);
                    }
                }
            }
        }
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// True once the underlying handle has been released.
    pub fn is_exhausted(&self) -> bool {
        self.source.is_none()
    }

    fn release(&mut self) {
        self.source = None;
    }
}

impl Iterator for CarmenScans {
    type Item = Result<LaserScan2DRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_scan().transpose()
    }
}

impl FusedIterator for CarmenScans {}

/// Read one line of at most [`MAX_LINE_BYTES`] into `buf`.
///
/// Returns the bytes consumed and whether the line was cut short; the rest
/// of a cut line is discarded.
fn read_line_capped(
    source: &mut LineSource,
    buf: &mut Vec<u8>,
) -> std::io::Result<(usize, bool)> {
    let mut read = source
        .by_ref()
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_until(b'\n', buf)?;

    let truncated = buf.len() > MAX_LINE_BYTES && buf.last() != Some(&b'\n');
    if truncated {
        read += source.skip_until(b'\n')?;
    }
    Ok((read, truncated))
}

/// Over-long lines are malformed when they carry a laser tag.
fn classify_overlong(prefix: &[u8]) -> Classified {
    let tag = prefix
        .split(|b| b.is_ascii_whitespace())
        .find(|token| !token.is_empty());

    let source = tag
        .and_then(|tag| std::str::from_utf8(tag).ok())
        .and_then(LaserSource::from_tag);

    match source {
        Some(source) => Classified::Malformed(
            source,
            LineError::LineTooLong {
                limit: MAX_LINE_BYTES,
            },
        ),
        None => Classified::Skipped,
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
