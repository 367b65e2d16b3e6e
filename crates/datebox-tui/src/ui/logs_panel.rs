/// Panel for viewing application logs
use crate::stores::app_logs_store::AppLogsState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct LogsPanel<'a> {
    logs: &'a [String],
    scroll_offset: usize,
}

impl<'a> LogsPanel<'a> {
    pub fn from_state(state: &'a AppLogsState) -> Self {
        Self {
            logs: &state.logs,
            scroll_offset: state.scroll_offset,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if self.logs.is_empty() {
            Paragraph::new("No logs yet...")
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Application Logs ")
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        // Start from the end (most recent) and work backwards
        let inner_height = area.height.saturating_sub(2) as usize;
        let total_logs = self.logs.len();
        let end_index = total_logs.saturating_sub(self.scroll_offset);
        let start_index = end_index.saturating_sub(inner_height);

        let visible_logs: Vec<Line> = self.logs[start_index..end_index]
            .iter()
            .map(|log| Line::from(log.as_str()))
            .collect();

        let title = if total_logs > inner_height {
            format!(" Application Logs [{}/{}] ", end_index, total_logs)
        } else {
            " Application Logs ".to_string()
        };

        Paragraph::new(visible_logs)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
