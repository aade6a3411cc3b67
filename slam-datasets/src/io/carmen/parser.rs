//! Line-level parsing of CARMEN laser records.
//!
//! Supported layouts (trailing fields vary by logger):
//!
//! ```text
//! FLASER n r1..rn x y theta odom_x odom_y odom_theta ipc_timestamp ipc_hostname logger_timestamp
//! FLASER n r1..rn x y theta tv rv forward_v side_v turn_v timestamp hostname
//! RLASER n r1..rn x y theta ...
//! ```
//!
//! The tag, count and ranges are mandatory. Everything after the ranges is
//! best-effort: a missing or broken pose leaves `pose` unset, and a missing
//! timestamp falls back to `0.0`.

use crate::core::types::{LaserScan2DRecord, LaserSource, Pose2D};

use super::types::{LineError, ReaderOptions};

/// Outcome of looking at one log line.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// A complete scan record
    Scan(LaserScan2DRecord),
    /// Blank, comment, or a tag this reader does not handle
    Skipped,
    /// Recognized tag with unusable fields
    Malformed(LaserSource, LineError),
}

/// Classify and parse a single log line.
pub fn classify_line(line: &str, options: &ReaderOptions) -> Classified {
    let mut tokens = line.split_whitespace();

    let source = match tokens.next() {
        Some(tag) if tag.starts_with('#') => return Classified::Skipped,
        Some(tag) => match LaserSource::from_tag(tag) {
            Some(source) => source,
            None => return Classified::Skipped,
        },
        None => return Classified::Skipped,
    };

    let fields: Vec<&str> = tokens.collect();
    match parse_laser_fields(source, &fields, options) {
        Ok(scan) => Classified::Scan(scan),
        Err(e) => Classified::Malformed(source, e),
    }
}

/// Parse everything after the tag of a FLASER/RLASER line.
pub fn parse_laser_fields(
    source: LaserSource,
    fields: &[&str],
    options: &ReaderOptions,
) -> Result<LaserScan2DRecord, LineError> {
    let count_token = fields.first().ok_or(LineError::MissingCount)?;
    let count: usize = count_token
        .parse()
        .map_err(|_| LineError::InvalidCount((*count_token).to_string()))?;
    if count == 0 {
        return Err(LineError::EmptyScan);
    }

    let available = fields.len() - 1;
    if available < count {
        return Err(LineError::MissingRanges {
            expected: count,
            found: available,
        });
    }

    let range_tokens = &fields[1..=count];
    let mut ranges = Vec::with_capacity(count);
    for (index, token) in range_tokens.iter().enumerate() {
        let range = parse_number(token).ok_or_else(|| LineError::InvalidRange {
            index,
            token: (*token).to_string(),
        })?;
        ranges.push(range);
    }

    let (pose, stamp) = parse_trailer(&fields[count + 1..]);

    Ok(LaserScan2DRecord::with_symmetric_fov(
        stamp,
        options.scan_frame_id.clone(),
        source,
        ranges,
        options.fov_rad(),
        pose,
    ))
}

/// Extract the pose and timestamp from the fields after the ranges.
fn parse_trailer(trailer: &[&str]) -> (Option<Pose2D>, f64) {
    let pose = parse_pose(trailer);
    // The three pose slots are skipped even when they fail to parse
    let rest = trailer.get(3..).unwrap_or(trailer);

    // The stamp sits right before the hostname when a hostname is logged,
    // otherwise it is the last number on the line.
    let stamp = match rest.iter().rposition(|t| parse_number(t).is_none()) {
        Some(host) if host > 0 => parse_number(rest[host - 1]),
        Some(_) => None,
        None => rest.last().and_then(|t| parse_number(t)),
    };

    (pose, stamp.unwrap_or(0.0))
}

fn parse_pose(trailer: &[&str]) -> Option<Pose2D> {
    match trailer {
        [x, y, theta, ..] => Some(Pose2D::new(
            parse_number(x)?,
            parse_number(y)?,
            parse_number(theta)?,
        )),
        _ => None,
    }
}

#[inline]
fn parse_number(token: &str) -> Option<f64> {
    token.parse().ok()
}
