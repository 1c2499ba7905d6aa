//! Point list parsing.
//!
//! One junction box per line as `x,y,z`. Blank lines are ignored and do not
//! consume an index; line numbers in errors still count them.

use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::point::{Point, PointSet};

/// Why a single line failed to parse. Line context is attached by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointParseError(String);

impl std::fmt::Display for PointParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for PointParseError {}

impl FromStr for Point {
    type Err = PointParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(PointParseError(format!(
                "expected 3 comma-separated fields, found {}",
                fields.len()
            )));
        }

        let mut coords = [0i64; 3];
        for (slot, field) in coords.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|e| PointParseError(format!("invalid integer {:?} ({})", field, e)))?;
        }

        Ok(Point::new(coords[0], coords[1], coords[2]))
    }
}

/// Parse a whole point list.
///
/// Fails on the first malformed line; nothing is returned for a partial list.
pub fn parse_points(input: &str) -> Result<PointSet> {
    let mut points = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let point = trimmed.parse::<Point>().map_err(|e| Error::MalformedLine {
            line: number + 1,
            content: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        points.push(point);
    }

    debug!("Parsed {} junction boxes", points.len());
    Ok(PointSet::new(points))
}
