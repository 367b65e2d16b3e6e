/// Popup month grid shown below the date field
use chrono::NaiveDate;
use datebox_core::{DayMarker, MonthGrid, MonthStep};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

// header + weekdays + up to 6 weeks + blank + buttons + 2 borders
pub const POPUP_HEIGHT: u16 = 12;
// "Su Mo Tu We Th Fr Sa" = 20 chars + 4 padding + 2 borders
pub const POPUP_WIDTH: u16 = 26;

const CELL_WIDTH: u16 = 3;
const GRID_LEFT: u16 = 2;
const LABELS_ROW: u16 = 1;
const GRID_TOP: u16 = 2;
const BUTTONS_ROW: u16 = 9;
const ARROW_WIDTH: u16 = 3;
const PREV_LABEL: &str = " ◀ ";
const NEXT_LABEL: &str = " ▶ ";
const CLEAR_LABEL: &str = "[Clear]";
const TODAY_LABEL: &str = "[Today]";

/// What a click inside the popup landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupHit {
    Outside,
    Inside,
    Navigate(MonthStep),
    Day(NaiveDate),
    Clear,
    Today,
}

/// Screen placement of the popup; shared by rendering and hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupGeometry {
    pub area: Rect,
}

impl PopupGeometry {
    /// Place the popup below `anchor`, aligned to its left edge and kept on screen
    pub fn below(anchor: Rect, screen: Rect) -> Self {
        let width = POPUP_WIDTH.min(screen.width);
        let height = POPUP_HEIGHT.min(screen.height);
        let x = anchor.x.min(screen.right().saturating_sub(width));
        let y = anchor.bottom().min(screen.bottom().saturating_sub(height));
        Self {
            area: Rect {
                x,
                y,
                width,
                height,
            },
        }
    }

    pub fn fits(&self) -> bool {
        self.area.width >= POPUP_WIDTH && self.area.height >= POPUP_HEIGHT
    }

    fn inner(&self) -> Rect {
        self.area.inner(Margin::new(1, 1))
    }

    fn prev_area(&self) -> Rect {
        let inner = self.inner();
        Rect::new(inner.x, inner.y, ARROW_WIDTH, 1)
    }

    fn next_area(&self) -> Rect {
        let inner = self.inner();
        Rect::new(inner.right().saturating_sub(ARROW_WIDTH), inner.y, ARROW_WIDTH, 1)
    }

    fn cell_area(&self, row: usize, col: usize) -> Rect {
        let inner = self.inner();
        Rect::new(
            inner.x + GRID_LEFT + col as u16 * CELL_WIDTH,
            inner.y + GRID_TOP + row as u16,
            2,
            1,
        )
    }

    fn clear_area(&self) -> Rect {
        let inner = self.inner();
        Rect::new(inner.x + 1, inner.y + BUTTONS_ROW, CLEAR_LABEL.len() as u16, 1)
    }

    fn today_area(&self) -> Rect {
        let inner = self.inner();
        let width = TODAY_LABEL.len() as u16;
        Rect::new(
            inner.right().saturating_sub(width + 1),
            inner.y + BUTTONS_ROW,
            width,
            1,
        )
    }

    pub fn hit(&self, position: Position, grid: &MonthGrid) -> PopupHit {
        if !self.area.contains(position) {
            return PopupHit::Outside;
        }
        if !self.fits() {
            return PopupHit::Inside;
        }
        if self.prev_area().contains(position) {
            return PopupHit::Navigate(MonthStep::Previous);
        }
        if self.next_area().contains(position) {
            return PopupHit::Navigate(MonthStep::Next);
        }
        if self.clear_area().contains(position) {
            return PopupHit::Clear;
        }
        if self.today_area().contains(position) {
            return PopupHit::Today;
        }
        for (r, row) in grid.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(day) = cell.as_day() {
                    if self.cell_area(r, c).contains(position) {
                        return PopupHit::Day(day.date);
                    }
                }
            }
        }
        PopupHit::Inside
    }
}

/// Calendar widget that draws a [`MonthGrid`] inside a bordered popup
pub struct CalendarPopup<'a> {
    grid: &'a MonthGrid,
    highlight: Option<NaiveDate>,
    title: &'a str,
}

impl<'a> CalendarPopup<'a> {
    pub fn new(grid: &'a MonthGrid) -> Self {
        Self {
            grid,
            highlight: None,
            title: " Calendar ",
        }
    }

    /// Day under the keyboard cursor
    pub fn highlight(mut self, highlight: NaiveDate) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn render(&self, geometry: PopupGeometry, buf: &mut Buffer) {
        let area = geometry.area;
        Clear.render(area, buf);

        let block = Block::default()
            .title(self.title)
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        if !geometry.fits() {
            Paragraph::new("Enlarge terminal")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        self.render_header(geometry, inner, buf);

        buf.set_string(
            inner.x + GRID_LEFT,
            inner.y + LABELS_ROW,
            self.grid.week_start.labels().join(" "),
            Style::default().fg(Color::Yellow),
        );

        for (r, row) in self.grid.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let Some(day) = cell.as_day() else {
                    continue;
                };
                let cell_area = geometry.cell_area(r, c);
                buf.set_string(
                    cell_area.x,
                    cell_area.y,
                    format!("{:>2}", day.day()),
                    self.day_style(day.marker(), Some(day.date) == self.highlight),
                );
            }
        }

        let button = Style::default().fg(Color::Cyan);
        let clear = geometry.clear_area();
        buf.set_string(clear.x, clear.y, CLEAR_LABEL, button);
        let today = geometry.today_area();
        buf.set_string(today.x, today.y, TODAY_LABEL, button);
    }

    fn render_header(&self, geometry: PopupGeometry, inner: Rect, buf: &mut Buffer) {
        let arrow = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let prev = geometry.prev_area();
        buf.set_string(prev.x, prev.y, PREV_LABEL, arrow);
        let next = geometry.next_area();
        buf.set_string(next.x, next.y, NEXT_LABEL, arrow);

        let title = self.grid.month.title();
        let x = inner.x + inner.width.saturating_sub(title.len() as u16) / 2;
        buf.set_string(
            x,
            inner.y,
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    }

    fn day_style(&self, marker: DayMarker, highlighted: bool) -> Style {
        let style = match marker {
            DayMarker::Selected => Style::default()
                .fg(Color::Yellow)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            DayMarker::Today => Style::default().fg(Color::Green),
            DayMarker::Plain => Style::default().fg(Color::White),
        };
        if highlighted {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datebox_core::{ViewMonth, WeekStart};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_grid() -> MonthGrid {
        MonthGrid::build(
            ViewMonth::new(2024, 3).unwrap(),
            WeekStart::Sunday,
            Some(ymd(2024, 3, 15)),
            ymd(2024, 3, 1),
        )
    }

    fn geometry() -> PopupGeometry {
        PopupGeometry::below(Rect::new(2, 1, 30, 3), Rect::new(0, 0, 80, 24))
    }

    #[test]
    fn test_popup_sits_below_anchor() {
        assert_eq!(geometry().area, Rect::new(2, 4, POPUP_WIDTH, POPUP_HEIGHT));
    }

    #[test]
    fn test_popup_is_kept_on_screen() {
        let g = PopupGeometry::below(Rect::new(70, 18, 10, 3), Rect::new(0, 0, 80, 24));
        assert_eq!(g.area, Rect::new(54, 12, POPUP_WIDTH, POPUP_HEIGHT));
        assert!(g.fits());
    }

    #[test]
    fn test_hit_targets() {
        let g = geometry();
        let grid = march_grid();
        // inner area starts at (3, 5)
        assert_eq!(
            g.hit(Position::new(4, 5), &grid),
            PopupHit::Navigate(MonthStep::Previous)
        );
        assert_eq!(
            g.hit(Position::new(25, 5), &grid),
            PopupHit::Navigate(MonthStep::Next)
        );
        // 1 March 2024 is a Friday: row 0, col 5
        assert_eq!(
            g.hit(Position::new(3 + 2 + 15, 7), &grid),
            PopupHit::Day(ymd(2024, 3, 1))
        );
        // leading blank on Sunday of the first row
        assert_eq!(g.hit(Position::new(5, 7), &grid), PopupHit::Inside);
        assert_eq!(g.hit(Position::new(5, 14), &grid), PopupHit::Clear);
        assert_eq!(g.hit(Position::new(20, 14), &grid), PopupHit::Today);
        assert_eq!(g.hit(Position::new(60, 14), &grid), PopupHit::Outside);
    }

    #[test]
    fn test_render_draws_grid_and_buttons() {
        let g = geometry();
        let grid = march_grid();
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        CalendarPopup::new(&grid)
            .highlight(ymd(2024, 3, 15))
            .render(g, &mut buf);

        let row = |y: u16| -> String {
            (0..80u16)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        };
        assert!(row(5).contains("March 2024"));
        assert!(row(6).contains("Su Mo Tu We Th Fr Sa"));
        assert!(row(7).contains(" 1  2"));
        assert!(row(14).contains("[Clear]"));
        assert!(row(14).contains("[Today]"));

        // 15 March sits on row 2, col 5
        let cell = &buf[(3 + 2 + 15, 9)];
        assert_eq!(cell.symbol(), "1");
        assert!(cell.modifier.contains(Modifier::REVERSED));
        assert_eq!(cell.fg, Color::Yellow);
    }
}
