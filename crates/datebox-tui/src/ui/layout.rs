/// Layout manager for the TUI application
use crate::stores::{AppLogsStore, DateInputStore, UIStore};
use crate::ui::calendar_popup::CalendarPopup;
use crate::ui::date_field::{DateField, FIELD_HEIGHT, FIELD_WIDTH};
use crate::ui::history_panel::HistoryPanel;
use crate::ui::logs_panel::LogsPanel;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const HELP_LINES: [(&str, &str); 12] = [
    ("0-9 /", "Type DD/MM/YYYY"),
    ("Backspace", "Delete last character"),
    ("Space / ↓", "Open the calendar (Space closes)"),
    ("Tab / Enter", "Leave the field"),
    ("←→↑↓", "Move day in calendar"),
    ("PgUp PgDn < >", "Previous / next month"),
    ("Enter", "Pick highlighted day"),
    ("t", "Today"),
    ("c / Delete", "Clear"),
    ("L", "Toggle application logs"),
    ("?", "Toggle this help"),
    ("q / Ctrl-C", "Quit"),
];

/// Render the complete application layout
pub fn render_layout(
    frame: &mut Frame,
    date_store: &DateInputStore,
    ui_store: &UIStore,
    app_logs_store: &AppLogsStore,
) {
    let area = frame.area();
    let ui_state = ui_store.get_state();

    // Main layout: Header | Content | Footer
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(FIELD_WIDTH + 4), // Form
            Constraint::Min(0),                  // History or logs
        ])
        .split(vertical_chunks[1]);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Spacer
            Constraint::Length(FIELD_HEIGHT), // Field
            Constraint::Length(1),            // Error text
            Constraint::Min(0),
        ])
        .split(content_chunks[0]);
    let field_area = Rect {
        x: form_chunks[1].x + 2,
        width: FIELD_WIDTH.min(form_chunks[1].width.saturating_sub(2)),
        ..form_chunks[1]
    };

    date_store.set_layout(field_area, area);
    let date_state = date_store.get_state();

    render_header(frame, vertical_chunks[0], &date_store.canonical());

    let field = DateField::new(&date_state);
    field.render(field_area, frame.buffer_mut());
    if let Some(position) = field.cursor_position(field_area) {
        frame.set_cursor_position(position);
    }
    if let Some(error) = &date_state.props.error {
        let error_area = Rect {
            x: field_area.x,
            width: field_area.width,
            ..form_chunks[2]
        };
        Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .render(error_area, frame.buffer_mut());
    }

    if ui_state.show_logs {
        let logs_state = app_logs_store.get_state();
        LogsPanel::from_state(&logs_state).render(content_chunks[1], frame.buffer_mut());
    } else {
        HistoryPanel::new(&ui_state.history).render(content_chunks[1], frame.buffer_mut());
    }

    render_footer(frame, vertical_chunks[2], ui_state.error_message.as_deref());

    // popup and help are drawn last so they sit on top
    if date_state.widget.is_open() {
        let grid = date_state.widget.grid();
        let title = format!(" {} ", date_state.props.label);
        CalendarPopup::new(&grid)
            .title(&title)
            .highlight(date_state.highlight)
            .render(date_state.popup_geometry(), frame.buffer_mut());
    }

    if ui_state.show_help {
        render_help(centered_rect(60, 70, area), frame.buffer_mut());
    }
}

fn render_header(frame: &mut Frame, area: Rect, value: &str) {
    let (value_text, value_color) = if value.is_empty() {
        ("(empty)", Color::DarkGray)
    } else {
        (value, Color::Green)
    };

    let header_text = Line::from(vec![
        Span::styled(
            " DATEBOX ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Value: "),
        Span::styled(value_text, Style::default().fg(value_color)),
    ]);

    Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}

fn render_footer(frame: &mut Frame, area: Rect, error: Option<&str>) {
    let footer_text = match error {
        Some(err) => Line::from(vec![
            Span::raw(" "),
            Span::styled(err, Style::default().fg(Color::Red)),
        ]),
        None => Line::from(vec![
            Span::raw(" "),
            Span::raw("q:Quit | Space:Calendar | t:Today | c:Clear | L:Logs | ?:Help"),
        ]),
    };

    Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}

fn render_help(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("{:>14}  ", key), Style::default().fg(Color::Yellow)),
                Span::raw(*description),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
}

/// Helper function to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;
    use crate::logger::LogBuffer;
    use crate::stores::FieldProps;
    use chrono::NaiveDate;
    use datebox_core::FixedClock;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn stores(value: Option<&str>) -> (DateInputStore, UIStore, AppLogsStore) {
        let date_store = DateInputStore::with_clock(
            FieldProps::default(),
            value,
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())),
        );
        (
            date_store,
            UIStore::new(),
            AppLogsStore::new(LogBuffer::new(10)),
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_layout_records_field_area_and_shows_value() {
        let (date_store, ui_store, logs_store) = stores(Some("2024-03-15"));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render_layout(frame, &date_store, &ui_store, &logs_store))
            .unwrap();

        let state = date_store.get_state();
        assert_eq!(state.field_area, Rect::new(2, 4, FIELD_WIDTH, FIELD_HEIGHT));
        assert_eq!(state.screen_area, Rect::new(0, 0, 80, 24));

        let text = screen_text(&terminal);
        assert!(text.contains("Value: 2024-03-15"));
        assert!(text.contains("15/03/2024"));
        assert!(text.contains("Nothing committed yet"));
        assert!(!text.contains("March 2024"));
    }

    #[test]
    fn test_open_popup_is_drawn_over_content() {
        let (date_store, ui_store, logs_store) = stores(Some("2024-03-15"));
        date_store.reduce(&Action::OpenPopup);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render_layout(frame, &date_store, &ui_store, &logs_store))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("March 2024"));
        assert!(text.contains("[Clear]"));
    }

    #[test]
    fn test_help_overlay() {
        let (date_store, ui_store, logs_store) = stores(None);
        ui_store.reduce(&Action::ToggleHelp);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| render_layout(frame, &date_store, &ui_store, &logs_store))
            .unwrap();

        assert!(screen_text(&terminal).contains("Pick highlighted day"));
    }
}
