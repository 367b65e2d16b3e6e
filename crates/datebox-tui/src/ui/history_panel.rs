/// Panel listing every value handed to the host form
use crate::stores::ui_store::CommitRecord;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct HistoryPanel<'a> {
    history: &'a [CommitRecord],
}

impl<'a> HistoryPanel<'a> {
    pub fn new(history: &'a [CommitRecord]) -> Self {
        Self { history }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Committed Values ")
            .border_style(Style::default().fg(Color::Cyan));

        if self.history.is_empty() {
            Paragraph::new("Nothing committed yet")
                .block(block)
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        // newest first, as many as fit
        let inner_height = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .history
            .iter()
            .rev()
            .take(inner_height)
            .map(|record| {
                let value = if record.value.is_empty() {
                    Span::styled("(cleared)", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(record.value.as_str(), Style::default().fg(Color::Green))
                };
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", record.at),
                        Style::default().fg(Color::DarkGray),
                    ),
                    value,
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
