use std::fmt;

/// Reasons a textual date could not be turned into a committable value.
///
/// None of these ever reach the host form: the widget swallows them and
/// either waits for more input or reverts during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// the text does not have the expected shape (length, separators, digits)
    Malformed(String),
    /// the shape is right but the calendar has no such day, e.g. `31/02/2024`
    InvalidDate { day: u32, month: u32, year: i32 },
    /// the date exists but its year is not after the configured floor
    YearOutOfRange { year: i32, floor: i32 },
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(text) => write!(f, "Malformed date: '{text}'"),
            Self::InvalidDate { day, month, year } => {
                write!(f, "Invalid date: {day:02}/{month:02}/{year:04} does not exist")
            }
            Self::YearOutOfRange { year, floor } => {
                write!(f, "Year out of range: {year} must be after {floor}")
            }
        }
    }
}

impl std::error::Error for DateParseError {}
