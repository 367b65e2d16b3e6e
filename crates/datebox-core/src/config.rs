/// Default values for the DATEBOX settings.
/// Every value can be overridden by an ENV var of the same name, read through
/// `get_datebox_setting!`. These should only be primitive types.
///

/// entries whose year is not strictly after this one are never committed
pub static DATEBOX_YEAR_FLOOR: i32 = 1900;

/// first column of the month grid, either `sunday` or `monday`
pub static DATEBOX_WEEK_START: &'static str = "sunday";

/// how often the terminal host polls for input events
pub static DATEBOX_TUI_TICK_MS: u64 = 16;

/// max number of application log lines kept in memory by the terminal host
pub static DATEBOX_LOG_BUFFER_LINES: usize = 5000;

/// max number of committed values listed by the terminal host
pub static DATEBOX_HISTORY_LINES: usize = 200;
