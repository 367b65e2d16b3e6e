use chrono::NaiveDate;
use datebox_core::{ViewMonth, parse_canonical};

/// clap value parser for `YYYY-MM-DD` arguments
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_canonical(value).map_err(|e| e.to_string())
}

/// clap value parser for `YYYY-MM` arguments
pub fn parse_month_arg(value: &str) -> Result<ViewMonth, String> {
    ViewMonth::parse(value).ok_or_else(|| format!("'{}' is not a YYYY-MM month", value))
}
