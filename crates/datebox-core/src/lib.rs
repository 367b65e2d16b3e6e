//! Headless date input widget: a `DD/MM/YYYY` typing mask that round-trips to
//! a canonical `YYYY-MM-DD` value, plus the month grid behind its popup picker.
mod clock;
mod exceptions;
mod grid;
mod input;
mod macros;
mod mask;
mod month;

pub mod config;

// public api
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use exceptions::DateParseError;
pub use grid::{DAYS_PER_WEEK, DayCell, DayMarker, GridCell, MonthGrid, WeekStart};
pub use input::{Commit, DateInput, DateInputSnapshot};
pub use mask::{
    DISPLAY_LEN, apply_mask, filter_input, format_canonical, format_display, parse_canonical,
    parse_display,
};
pub use month::{MonthStep, ViewMonth};
