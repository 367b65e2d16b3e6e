/// Month grid generation for the popup picker
use crate::get_datebox_setting;
use crate::month::ViewMonth;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;

/// Which weekday occupies the first grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn from_setting(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Some(Self::Sunday),
            "monday" | "mon" => Some(Self::Monday),
            _ => None,
        }
    }

    /// Read `DATEBOX_WEEK_START`, falling back to Sunday
    pub fn from_env() -> Self {
        let raw = get_datebox_setting!(DATEBOX_WEEK_START);
        Self::from_setting(&raw).unwrap_or_else(|| {
            log::warn!("Unknown DATEBOX_WEEK_START '{}', using sunday", raw);
            Self::Sunday
        })
    }

    /// Number of blank cells before the 1st of the month
    pub fn leading_blanks(&self, first: NaiveDate) -> usize {
        let offset = match self {
            Self::Sunday => first.weekday().num_days_from_sunday(),
            Self::Monday => first.weekday().num_days_from_monday(),
        };
        offset as usize
    }

    pub fn labels(&self) -> [&'static str; DAYS_PER_WEEK] {
        match self {
            Self::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            Self::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

/// Visual state of a day cell. Selected wins over today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMarker {
    Plain,
    Today,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub selected: bool,
    pub today: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn marker(&self) -> DayMarker {
        if self.selected {
            DayMarker::Selected
        } else if self.today {
            DayMarker::Today
        } else {
            DayMarker::Plain
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Day(cell) => Some(cell),
            Self::Blank => None,
        }
    }
}

/// A month laid out as rows of seven cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: ViewMonth,
    pub week_start: WeekStart,
    pub rows: Vec<[GridCell; DAYS_PER_WEEK]>,
}

impl MonthGrid {
    pub fn build(
        month: ViewMonth,
        week_start: WeekStart,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let mut cells = vec![GridCell::Blank; week_start.leading_blanks(month.first_day())];

        cells.extend(
            month
                .first_day()
                .iter_days()
                .take(month.days_in_month() as usize)
                .map(|date| {
                    GridCell::Day(DayCell {
                        date,
                        selected: selected == Some(date),
                        today: date == today,
                    })
                }),
        );

        while cells.len() % DAYS_PER_WEEK != 0 {
            cells.push(GridCell::Blank);
        }

        let rows = cells
            .chunks_exact(DAYS_PER_WEEK)
            .map(|chunk| {
                let mut row = [GridCell::Blank; DAYS_PER_WEEK];
                row.copy_from_slice(chunk);
                row
            })
            .collect();

        Self {
            month,
            week_start,
            rows,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells().filter_map(GridCell::as_day)
    }

    /// Row and column of `date`, if it is in this month
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|cell| cell.as_day().is_some_and(|d| d.date == date))
                .map(|c| (r, c))
        })
    }

    /// Cell at `row`/`col`, `None` when out of bounds
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Plain-text rendering: `[dd]` marks the selected day, `(dd)` today
    pub fn render_text(&self) -> String {
        let width = DAYS_PER_WEEK * 4;
        let mut out = format!("{:^width$}\n", self.month.title());
        let labels: Vec<String> = self
            .week_start
            .labels()
            .iter()
            .map(|l| format!(" {l} "))
            .collect();
        out.push_str(labels.concat().trim_end());
        out.push('\n');

        for row in &self.rows {
            let line: String = row
                .iter()
                .map(|cell| match cell.as_day() {
                    None => "    ".to_string(),
                    Some(day) => match day.marker() {
                        DayMarker::Selected => format!("[{:>2}]", day.day()),
                        DayMarker::Today => format!("({:>2})", day.day()),
                        DayMarker::Plain => format!(" {:>2} ", day.day()),
                    },
                })
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid(year: i32, month: u32) -> MonthGrid {
        MonthGrid::build(
            ViewMonth::new(year, month).unwrap(),
            WeekStart::Sunday,
            None,
            ymd(2000, 1, 1),
        )
    }

    #[test]
    fn test_leap_february_has_29_days() {
        let g = grid(2024, 2);
        assert_eq!(g.day_cells().count(), 29);
        assert_eq!(g.cells().count() % 7, 0);
        // 1 Feb 2024 is a Thursday
        assert_eq!(g.rows[0][4].as_day().map(|d| d.day()), Some(1));
        assert!(g.rows[0][..4].iter().all(|c| *c == GridCell::Blank));
    }

    #[test]
    fn test_common_february_has_28_days() {
        let g = grid(2023, 2);
        assert_eq!(g.day_cells().count(), 28);
        assert_eq!(g.cells().count() % 7, 0);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_leading_blanks() {
        // 1 Sep 2024 is a Sunday
        let g = grid(2024, 9);
        assert_eq!(g.rows[0][0].as_day().map(|d| d.day()), Some(1));
        assert_eq!(g.rows.len(), 5);
    }

    #[test]
    fn test_monday_start_shifts_columns() {
        let g = MonthGrid::build(
            ViewMonth::new(2024, 9).unwrap(),
            WeekStart::Monday,
            None,
            ymd(2000, 1, 1),
        );
        assert_eq!(g.rows[0][6].as_day().map(|d| d.day()), Some(1));
        assert_eq!(g.week_start.labels()[0], "Mo");
    }

    #[test]
    fn test_selected_takes_precedence_over_today() {
        let day = ymd(2024, 3, 15);
        let g = MonthGrid::build(
            ViewMonth::containing(day),
            WeekStart::Sunday,
            Some(day),
            day,
        );
        let (r, c) = g.position_of(day).unwrap();
        let cell = g.rows[r][c].as_day().unwrap();
        assert!(cell.selected && cell.today);
        assert_eq!(cell.marker(), DayMarker::Selected);
        assert_eq!(
            g.day_cells().filter(|d| d.marker() != DayMarker::Plain).count(),
            1
        );
    }

    #[test]
    fn test_selected_outside_month_marks_nothing() {
        let g = MonthGrid::build(
            ViewMonth::new(2024, 4).unwrap(),
            WeekStart::Sunday,
            Some(ymd(2024, 3, 15)),
            ymd(2024, 3, 15),
        );
        assert!(g.day_cells().all(|d| d.marker() == DayMarker::Plain));
        assert!(g.position_of(ymd(2024, 3, 15)).is_none());
    }

    #[test]
    fn test_render_text_marks_selected_and_today() {
        let g = MonthGrid::build(
            ViewMonth::new(2024, 3).unwrap(),
            WeekStart::Sunday,
            Some(ymd(2024, 3, 15)),
            ymd(2024, 3, 1),
        );
        let text = g.render_text();
        assert!(text.contains("March 2024"));
        assert!(text.contains(" Su  Mo  Tu  We  Th  Fr  Sa"));
        assert!(text.contains("[15]"));
        assert!(text.contains("( 1)"));
    }

    #[test]
    fn test_week_start_from_setting() {
        assert_eq!(WeekStart::from_setting("Monday"), Some(WeekStart::Monday));
        assert_eq!(WeekStart::from_setting(" sun "), Some(WeekStart::Sunday));
        assert_eq!(WeekStart::from_setting("friday"), None);
    }
}
