/// Store wrapping the date input widget plus the terminal-only state around it
use crate::actions::Action;
use crate::click_away::ClickAwayGuard;
use crate::ui::calendar_popup::PopupGeometry;
use chrono::{Datelike, Duration, NaiveDate};
use datebox_core::{Commit, DateInput, MonthStep, SharedClock, ViewMonth};
use ratatui::layout::{Position, Rect};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Presentational attributes passed through to rendering untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProps {
    pub label: String,
    pub error: Option<String>,
    pub placeholder: String,
}

impl Default for FieldProps {
    fn default() -> Self {
        Self {
            label: "Date".to_string(),
            error: None,
            placeholder: "DD/MM/YYYY".to_string(),
        }
    }
}

/// Read-only snapshot of the field for rendering and key mapping
#[derive(Debug, Clone)]
pub struct DateInputState {
    pub widget: DateInput<SharedClock>,
    pub props: FieldProps,

    /// Day under the keyboard cursor while the popup is open
    pub highlight: NaiveDate,

    /// Where the field was last drawn
    pub field_area: Rect,

    /// Terminal size at the last draw
    pub screen_area: Rect,

    /// Whether a click-away listener is currently held
    pub active: bool,
}

impl DateInputState {
    pub fn popup_geometry(&self) -> PopupGeometry {
        PopupGeometry::below(self.field_area, self.screen_area)
    }
}

struct Inner {
    widget: DateInput<SharedClock>,
    props: FieldProps,
    highlight: NaiveDate,
    field_area: Rect,
    screen_area: Rect,
    click_away: Option<ClickAwayGuard>,
}

#[derive(Clone)]
pub struct DateInputStore {
    inner: Arc<RwLock<Inner>>,
}

impl DateInputStore {
    pub fn with_clock(props: FieldProps, value: Option<&str>, clock: SharedClock) -> Self {
        let widget = DateInput::with_clock(clock).with_value(value);
        let highlight = widget.value().unwrap_or_else(|| widget.today());
        Self {
            inner: Arc::new(RwLock::new(Inner {
                widget,
                props,
                highlight,
                field_area: Rect::default(),
                screen_area: Rect::default(),
                click_away: None,
            })),
        }
    }

    pub fn get_state(&self) -> DateInputState {
        let inner = self.read();
        DateInputState {
            widget: inner.widget.clone(),
            props: inner.props.clone(),
            highlight: inner.highlight,
            field_area: inner.field_area,
            screen_area: inner.screen_area,
            active: inner.click_away.is_some(),
        }
    }

    /// Current canonical value, `""` when absent
    pub fn canonical(&self) -> String {
        self.read().widget.canonical()
    }

    /// Record where the field was drawn so mouse events can be hit-tested
    pub fn set_layout(&self, field_area: Rect, screen_area: Rect) {
        let mut inner = self.write();
        inner.field_area = field_area;
        inner.screen_area = screen_area;
        inner.refresh_click_away();
    }

    /// True only while a click-away listener is held and `position` is
    /// outside both the field and the open popup
    pub fn click_is_outside(&self, position: Position) -> bool {
        self.read()
            .click_away
            .as_ref()
            .is_some_and(|guard| guard.is_outside(position))
    }

    /// Reducer: apply an action, returning the commit it produced
    pub fn reduce(&self, action: &Action) -> Option<Commit> {
        let mut inner = self.write();

        let commit = match action {
            Action::TypeChar(c) => {
                inner.activate();
                inner.widget.type_char(*c)
            }
            Action::Paste(text) => {
                inner.activate();
                inner.widget.input_text(text)
            }
            Action::Backspace => {
                inner.activate();
                inner.widget.backspace()
            }
            Action::Focus => {
                inner.activate();
                None
            }
            Action::Blur => {
                inner.release();
                inner.widget.blur()
            }
            Action::OpenPopup => {
                inner.open_popup();
                None
            }
            Action::ClosePopup => {
                inner.release();
                inner.widget.close_popup()
            }
            Action::TogglePopup => {
                if inner.widget.is_open() {
                    inner.release();
                    inner.widget.close_popup()
                } else {
                    inner.open_popup();
                    None
                }
            }
            Action::NavigateMonth(step) => {
                inner.widget.navigate_month(*step);
                let view = inner.widget.view();
                inner.highlight = same_day_in(view, inner.highlight.day());
                None
            }
            Action::MoveHighlight(days) => {
                inner.move_highlight(*days);
                None
            }
            Action::SelectHighlighted => {
                let date = inner.highlight;
                inner.release();
                Some(inner.widget.select(date))
            }
            Action::SelectDate(date) => {
                inner.highlight = *date;
                inner.release();
                Some(inner.widget.select(*date))
            }
            Action::SelectToday => {
                inner.release();
                let commit = inner.widget.select_today();
                inner.highlight = inner.widget.today();
                Some(commit)
            }
            Action::Clear => {
                inner.release();
                Some(inner.widget.clear())
            }
            Action::SetValue(value) => {
                inner.widget.set_value(value.as_deref());
                if let Some(date) = inner.widget.value() {
                    inner.highlight = date;
                }
                None
            }
            _ => None,
        };

        inner.refresh_click_away();
        commit
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Inner {
    fn activate(&mut self) {
        if self.click_away.is_none() {
            self.click_away = Some(ClickAwayGuard::acquire());
        }
    }

    fn release(&mut self) {
        self.click_away = None;
    }

    fn open_popup(&mut self) {
        self.activate();
        self.widget.open_popup();
        let view = self.widget.view();
        self.highlight = match self.widget.value() {
            Some(date) if view.contains(date) => date,
            _ => same_day_in(view, self.highlight.day()),
        };
    }

    /// Move the highlight and page the view along when it leaves the month
    fn move_highlight(&mut self, days: i64) {
        let Some(next) = self.highlight.checked_add_signed(Duration::days(days)) else {
            return;
        };
        let target = ViewMonth::containing(next);
        while self.widget.view() < target {
            self.widget.navigate_month(MonthStep::Next);
        }
        while self.widget.view() > target {
            self.widget.navigate_month(MonthStep::Previous);
        }
        self.highlight = next;
    }

    fn refresh_click_away(&mut self) {
        let mut regions = vec![self.field_area];
        if self.widget.is_open() {
            regions.push(PopupGeometry::below(self.field_area, self.screen_area).area);
        }
        if let Some(guard) = self.click_away.as_mut() {
            guard.watch(regions);
        }
    }
}

/// `day` within `view`, clamped to the month's length
fn same_day_in(view: ViewMonth, day: u32) -> NaiveDate {
    let day = day.clamp(1, view.days_in_month());
    NaiveDate::from_ymd_opt(view.year(), view.month(), day).unwrap_or(view.first_day())
}
