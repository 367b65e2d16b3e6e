/// Text rules for the `DD/MM/YYYY` edit buffer and the `YYYY-MM-DD` canonical form
use crate::exceptions::DateParseError;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Length of a complete `DD/MM/YYYY` buffer
pub const DISPLAY_LEN: usize = 10;

pub const SEPARATOR: char = '/';

/// Indexes at which a separator is expected in the display form
const SEPARATOR_POSITIONS: [usize; 2] = [2, 5];

static DISPLAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("static regex"));

static CANONICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("static regex"));

/// Keep only ASCII digits and the separator
pub fn filter_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == SEPARATOR)
        .collect()
}

/// Apply the typing mask to a candidate buffer.
///
/// Separators are only inserted when the candidate is longer than the buffer
/// it replaces, so deleting back over a separator never re-inserts it. A typed
/// separator directly after another one is dropped.
pub fn apply_mask(candidate: &str, previous_len: usize) -> String {
    let mut chars: Vec<char> = filter_input(candidate).chars().collect();
    if chars.len() <= previous_len {
        return chars.into_iter().collect();
    }

    chars.dedup_by(|a, b| *a == SEPARATOR && *b == SEPARATOR);
    for pos in SEPARATOR_POSITIONS {
        if chars.len() >= pos && chars[pos - 1] != SEPARATOR && chars.get(pos) != Some(&SEPARATOR)
        {
            chars.insert(pos, SEPARATOR);
        }
    }
    chars.into_iter().collect()
}

/// Parse a complete `DD/MM/YYYY` buffer. Years not strictly after `year_floor`
/// are rejected even when the calendar date exists.
pub fn parse_display(text: &str, year_floor: i32) -> Result<NaiveDate, DateParseError> {
    let caps = DISPLAY_RE
        .captures(text)
        .ok_or_else(|| DateParseError::Malformed(text.to_string()))?;

    let (day, month, year) = numeric_parts(text, &caps[1], &caps[2], &caps[3])?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::InvalidDate { day, month, year })?;

    if date.year() <= year_floor {
        return Err(DateParseError::YearOutOfRange {
            year,
            floor: year_floor,
        });
    }
    Ok(date)
}

/// Parse a canonical `YYYY-MM-DD` value as supplied by the host
pub fn parse_canonical(text: &str) -> Result<NaiveDate, DateParseError> {
    let caps = CANONICAL_RE
        .captures(text)
        .ok_or_else(|| DateParseError::Malformed(text.to_string()))?;

    let (day, month, year) = numeric_parts(text, &caps[3], &caps[2], &caps[1])?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateParseError::InvalidDate { day, month, year })
}

pub fn format_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn numeric_parts(
    text: &str,
    day: &str,
    month: &str,
    year: &str,
) -> Result<(u32, u32, i32), DateParseError> {
    let malformed = || DateParseError::Malformed(text.to_string());
    Ok((
        day.parse().map_err(|_| malformed())?,
        month.parse().map_err(|_| malformed())?,
        year.parse().map_err(|_| malformed())?,
    ))
}
