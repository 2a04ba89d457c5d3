//! ISO-8601 parsing and the short display form used on history entries.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::PageError;

/// A parsed timestamp. Offset-less inputs stay naive so their wall-clock
/// fields display unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

/// ISO-8601 forms RFC 3339 does not cover, tried after a trailing `Z` is
/// rewritten to `+00:00`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 timestamp. A trailing `Z` is the same as `+00:00`;
/// date-only values resolve to midnight.
pub fn parse(raw: &str) -> Result<ParsedTimestamp, PageError> {
    let raw = raw.trim();
    let rfc3339_err = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => return Ok(ParsedTimestamp::Offset(dt)),
        Err(err) => err,
    };
    let with_offset = match raw.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => raw.to_string(),
    };
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
            return Ok(ParsedTimestamp::Offset(dt));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ParsedTimestamp::Naive(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(ParsedTimestamp::Naive(date.and_time(chrono::NaiveTime::MIN)));
    }
    Err(PageError::InvalidTimestamp {
        value: raw.to_string(),
        source: rfc3339_err,
    })
}

impl ParsedTimestamp {
    /// Render with a strftime format already checked by `Rules::from_config`.
    pub fn display(&self, format: &str) -> String {
        match self {
            ParsedTimestamp::Offset(dt) => dt.format(format).to_string(),
            ParsedTimestamp::Naive(dt) => dt.format(format).to_string(),
        }
    }
}
