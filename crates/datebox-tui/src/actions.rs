/// Core Action types for the flux architecture.
/// All state mutations flow through Actions dispatched to the Dispatcher.
use chrono::NaiveDate;
use datebox_core::{Commit, MonthStep};

/// Represents all possible user intents and system events in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ===== Field input (user-initiated) =====
    /// A digit or separator typed into the field
    TypeChar(char),

    /// Text pasted into the field
    Paste(String),

    /// Delete the last character of the field
    Backspace,

    /// Field clicked; starts listening for clicks outside it
    Focus,

    /// Focus left the field (Tab, Esc, or a click outside)
    Blur,

    // ===== Popup (user-initiated) =====
    TogglePopup,
    OpenPopup,
    ClosePopup,

    /// Show the previous or next month in the grid
    NavigateMonth(MonthStep),

    /// Move the keyboard highlight by a number of days
    MoveHighlight(i64),

    /// Pick the highlighted day
    SelectHighlighted,

    /// Pick a specific day (mouse click on a grid cell)
    SelectDate(NaiveDate),

    SelectToday,
    Clear,

    /// Replace the field value from outside the widget
    SetValue(Option<String>),

    // ===== App (user-initiated) =====
    ToggleHelp,
    ToggleLogs,

    /// Scroll the application logs, positive is towards older lines
    ScrollLogs(isize),

    // ===== System =====
    /// The widget handed a new canonical value to the host
    Committed(Commit),

    /// Generic error to display to user
    ShowError(String),

    /// Clear any displayed errors
    ClearError,

    /// Application should exit
    Quit,
}
