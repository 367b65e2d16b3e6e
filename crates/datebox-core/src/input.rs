/// Date input widget state machine.
///
/// Holds the `DD/MM/YYYY` edit buffer, the canonical value, the month shown
/// in the popup and whether the popup is open. Every operation that notifies
/// the host form returns the resulting [`Commit`].
use crate::clock::{Clock, SystemClock};
use crate::exceptions::DateParseError;
use crate::get_datebox_setting;
use crate::grid::{MonthGrid, WeekStart};
use crate::mask::{
    DISPLAY_LEN, apply_mask, format_canonical, format_display, parse_canonical, parse_display,
};
use crate::month::{MonthStep, ViewMonth};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// A new canonical value handed to the host form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Date(NaiveDate),
    Cleared,
}

impl Commit {
    /// `YYYY-MM-DD`, or the empty string when cleared
    pub fn canonical(&self) -> String {
        match self {
            Self::Date(date) => format_canonical(*date),
            Self::Cleared => String::new(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Cleared => None,
        }
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl Serialize for Commit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

/// Serialisable view of a widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateInputSnapshot {
    pub buffer: String,
    pub value: String,
    pub view: ViewMonth,
    pub popup_open: bool,
}

#[derive(Debug, Clone)]
pub struct DateInput<C: Clock = SystemClock> {
    buffer: String,
    value: Option<NaiveDate>,
    view: ViewMonth,
    popup_open: bool,
    year_floor: i32,
    week_start: WeekStart,
    clock: C,
}

impl DateInput<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DateInput<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DateInput<C> {
    pub fn with_clock(clock: C) -> Self {
        let view = ViewMonth::containing(clock.today());
        Self {
            buffer: String::new(),
            value: None,
            view,
            popup_open: false,
            year_floor: get_datebox_setting!(DATEBOX_YEAR_FLOOR, i32),
            week_start: WeekStart::from_env(),
            clock,
        }
    }

    pub fn year_floor(mut self, year_floor: i32) -> Self {
        self.year_floor = year_floor;
        self
    }

    pub fn week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Builder form of [`DateInput::set_value`]
    pub fn with_value(mut self, value: Option<&str>) -> Self {
        self.set_value(value);
        self
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    /// Current value as exchanged with the host, `""` when absent
    pub fn canonical(&self) -> String {
        self.value.map(format_canonical).unwrap_or_default()
    }

    pub fn view(&self) -> ViewMonth {
        self.view
    }

    pub fn is_open(&self) -> bool {
        self.popup_open
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn get_week_start(&self) -> WeekStart {
        self.week_start
    }

    /// External value update from the host. Buffer and view are re-derived;
    /// anything that is not a valid `YYYY-MM-DD` is treated as absent.
    pub fn set_value(&mut self, value: Option<&str>) {
        let parsed = match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => None,
            Some(text) => match parse_canonical(text) {
                Ok(date) => Some(date),
                Err(e) => {
                    log::warn!("Ignoring external date value: {}", e);
                    None
                }
            },
        };

        self.value = parsed;
        self.buffer = parsed.map(format_display).unwrap_or_default();
        if let Some(date) = parsed {
            self.view = ViewMonth::containing(date);
        }
    }

    /// Append typed or pasted text to the buffer
    pub fn input_text(&mut self, raw: &str) -> Option<Commit> {
        let candidate = format!("{}{}", self.buffer, raw);
        self.apply_edit(&candidate)
    }

    /// Replace the whole buffer, as a host "on change" event would
    pub fn replace_text(&mut self, raw: &str) -> Option<Commit> {
        self.apply_edit(raw)
    }

    pub fn type_char(&mut self, c: char) -> Option<Commit> {
        let mut utf8 = [0u8; 4];
        self.input_text(c.encode_utf8(&mut utf8))
    }

    pub fn backspace(&mut self) -> Option<Commit> {
        let mut candidate = self.buffer.clone();
        candidate.pop();
        self.apply_edit(&candidate)
    }

    /// Pick a day from the grid
    pub fn select(&mut self, date: NaiveDate) -> Commit {
        self.buffer = format_display(date);
        self.popup_open = false;
        self.commit(Some(date))
    }

    pub fn select_today(&mut self) -> Commit {
        let today = self.clock.today();
        self.select(today)
    }

    pub fn clear(&mut self) -> Commit {
        self.buffer.clear();
        self.popup_open = false;
        self.commit(None)
    }

    pub fn open_popup(&mut self) {
        self.popup_open = true;
    }

    /// Reconcile the buffer, then hide the popup
    pub fn close_popup(&mut self) -> Option<Commit> {
        let commit = self.reconcile();
        self.popup_open = false;
        commit
    }

    pub fn toggle_popup(&mut self) -> Option<Commit> {
        if self.popup_open {
            self.close_popup()
        } else {
            self.open_popup();
            None
        }
    }

    /// Focus left the widget, e.g. a click outside it
    pub fn blur(&mut self) -> Option<Commit> {
        self.close_popup()
    }

    pub fn navigate_month(&mut self, step: MonthStep) {
        self.view = self.view.step(step);
    }

    /// Resolve the edit buffer against the canonical value.
    ///
    /// Complete valid entries commit when they differ from the current value,
    /// an empty buffer clears a present value, anything else is discarded and
    /// the buffer is rebuilt from the current value.
    pub fn reconcile(&mut self) -> Option<Commit> {
        if self.buffer.is_empty() {
            return self.value.is_some().then(|| self.commit(None));
        }

        if self.buffer.len() == DISPLAY_LEN {
            if let Ok(date) = parse_display(&self.buffer, self.year_floor) {
                if self.value == Some(date) {
                    return None;
                }
                return Some(self.commit(Some(date)));
            }
        }

        let restored = self.value.map(format_display).unwrap_or_default();
        if restored != self.buffer {
            log::debug!(
                "Discarding unresolved entry '{}', restoring '{}'",
                self.buffer,
                restored
            );
            self.buffer = restored;
        }
        None
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(self.view, self.week_start, self.value, self.clock.today())
    }

    /// Why a complete buffer is being held instead of committed
    pub fn pending_error(&self) -> Option<DateParseError> {
        if self.buffer.len() != DISPLAY_LEN {
            return None;
        }
        parse_display(&self.buffer, self.year_floor).err()
    }

    pub fn snapshot(&self) -> DateInputSnapshot {
        DateInputSnapshot {
            buffer: self.buffer.clone(),
            value: self.canonical(),
            view: self.view,
            popup_open: self.popup_open,
        }
    }

    fn apply_edit(&mut self, candidate: &str) -> Option<Commit> {
        let previous_len = self.buffer.len();
        let next = apply_mask(candidate, previous_len);
        if next.len() > DISPLAY_LEN {
            log::debug!("Rejected '{}': longer than {} characters", next, DISPLAY_LEN);
            return None;
        }
        self.buffer = next;

        if self.buffer.is_empty() {
            return (previous_len > 0).then(|| self.commit(None));
        }

        if self.buffer.len() == DISPLAY_LEN {
            match parse_display(&self.buffer, self.year_floor) {
                Ok(date) => return Some(self.commit(Some(date))),
                Err(e) => log::debug!("Holding complete entry '{}': {}", self.buffer, e),
            }
        }
        None
    }

    fn commit(&mut self, value: Option<NaiveDate>) -> Commit {
        self.value = value;
        let commit = match value {
            Some(date) => {
                self.view = ViewMonth::containing(date);
                Commit::Date(date)
            }
            None => Commit::Cleared,
        };
        log::debug!("Committed date value '{}'", commit);
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn widget() -> DateInput<FixedClock> {
        DateInput::with_clock(FixedClock(ymd(2024, 6, 10)))
            .year_floor(1900)
            .week_start(WeekStart::Sunday)
    }

    #[test]
    fn test_initial_state() {
        let w = widget();
        assert_eq!(w.buffer(), "");
        assert_eq!(w.value(), None);
        assert_eq!(w.view(), ViewMonth::new(2024, 6).unwrap());
        assert!(!w.is_open());
    }

    #[test]
    fn test_set_value_derives_buffer_and_view() {
        let mut w = widget();
        w.set_value(Some("2024-03-15"));
        assert_eq!(w.buffer(), "15/03/2024");
        assert_eq!(w.view(), ViewMonth::new(2024, 3).unwrap());
        assert_eq!(w.canonical(), "2024-03-15");
    }

    #[test]
    fn test_set_value_malformed_degrades_to_empty() {
        let mut w = widget().with_value(Some("2024-03-15"));
        w.set_value(Some("15/03/2024"));
        assert_eq!(w.buffer(), "");
        assert_eq!(w.value(), None);
    }

    #[test]
    fn test_backspace_never_reinserts_separator() {
        let mut w = widget();
        w.input_text("15");
        assert_eq!(w.buffer(), "15/");
        assert_eq!(w.backspace(), None);
        assert_eq!(w.buffer(), "15");
        w.backspace();
        assert_eq!(w.buffer(), "1");
    }

    #[test]
    fn test_emptying_buffer_commits_cleared_once() {
        let mut w = widget();
        w.type_char('1');
        assert_eq!(w.backspace(), Some(Commit::Cleared));
        assert_eq!(w.backspace(), None);
    }

    #[test]
    fn test_growth_past_ten_is_rejected() {
        let mut w = widget();
        w.input_text("15032024");
        assert_eq!(w.type_char('9'), None);
        assert_eq!(w.buffer(), "15/03/2024");
    }

    #[test]
    fn test_letters_are_filtered() {
        let mut w = widget();
        w.input_text("a1b5");
        assert_eq!(w.buffer(), "15/");
    }

    #[test]
    fn test_replace_text_shrinking_keeps_user_text() {
        let mut w = widget().with_value(Some("2024-03-15"));
        assert_eq!(w.replace_text("15/03/202"), None);
        assert_eq!(w.buffer(), "15/03/202");
        assert_eq!(w.value(), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_short_year_never_commits() {
        let mut w = widget();
        assert_eq!(w.input_text("01011900"), None);
        assert_eq!(w.buffer(), "01/01/1900");
        assert_eq!(w.value(), None);
        assert_eq!(w.close_popup(), None);
        assert_eq!(w.buffer(), "");
    }

    #[test]
    fn test_open_popup_leaves_buffer_alone() {
        let mut w = widget();
        w.input_text("1503");
        w.open_popup();
        assert!(w.is_open());
        assert_eq!(w.buffer(), "15/03/");
    }

    #[test]
    fn test_toggle_popup_reconciles_on_close() {
        let mut w = widget();
        w.toggle_popup();
        w.input_text("1503");
        assert_eq!(w.toggle_popup(), None);
        assert!(!w.is_open());
        assert_eq!(w.buffer(), "");
    }

    #[test]
    fn test_navigate_month_only_moves_view() {
        let mut w = widget().with_value(Some("2024-01-31"));
        w.open_popup();
        w.navigate_month(MonthStep::Next);
        assert_eq!(w.view(), ViewMonth::new(2024, 2).unwrap());
        w.navigate_month(MonthStep::Previous);
        w.navigate_month(MonthStep::Previous);
        assert_eq!(w.view(), ViewMonth::new(2023, 12).unwrap());
        assert_eq!(w.buffer(), "31/01/2024");
        assert_eq!(w.value(), Some(ymd(2024, 1, 31)));
        assert!(w.is_open());
    }

    #[test]
    fn test_select_today_uses_clock() {
        let mut w = widget();
        w.open_popup();
        assert_eq!(w.select_today(), Commit::Date(ymd(2024, 6, 10)));
        assert_eq!(w.buffer(), "10/06/2024");
        assert!(!w.is_open());
    }

    #[test]
    fn test_reconcile_commits_valid_buffer_that_differs() {
        let mut w = widget().with_value(Some("2024-03-15"));
        // host-driven replacement that bypasses the 10-char commit path
        w.buffer = "16/03/2024".to_string();
        assert_eq!(w.reconcile(), Some(Commit::Date(ymd(2024, 3, 16))));
        assert_eq!(w.reconcile(), None);
    }

    #[test]
    fn test_grid_marks_value() {
        let w = widget().with_value(Some("2024-03-15"));
        let grid = w.grid();
        assert_eq!(grid.month, ViewMonth::new(2024, 3).unwrap());
        let selected: Vec<u32> = grid
            .day_cells()
            .filter(|d| d.selected)
            .map(|d| d.day())
            .collect();
        assert_eq!(selected, vec![15]);
    }

    #[test]
    fn test_commit_canonical_forms() {
        assert_eq!(Commit::Date(ymd(2024, 1, 1)).canonical(), "2024-01-01");
        assert_eq!(Commit::Cleared.canonical(), "");
        assert_eq!(Commit::Cleared.date(), None);
    }

    #[test]
    fn test_pending_error_only_for_complete_buffers() {
        let mut w = widget();
        w.input_text("3102");
        assert_eq!(w.pending_error(), None);
        w.input_text("2024");
        assert_eq!(
            w.pending_error(),
            Some(DateParseError::InvalidDate {
                day: 31,
                month: 2,
                year: 2024
            })
        );
        w.backspace();
        assert_eq!(w.pending_error(), None);
    }
}
