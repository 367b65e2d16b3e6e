/// Text field half of the date widget
use crate::stores::DateInputState;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// bordered single line
pub const FIELD_HEIGHT: u16 = 3;
pub const FIELD_WIDTH: u16 = 30;

const ICON: &str = "[▾]";
const ICON_WIDTH: u16 = 3;

pub struct DateField<'a> {
    state: &'a DateInputState,
}

impl<'a> DateField<'a> {
    pub fn new(state: &'a DateInputState) -> Self {
        Self { state }
    }

    /// Where the popup toggle icon is drawn inside a field at `area`
    pub fn icon_area(area: Rect) -> Rect {
        Rect::new(
            area.right().saturating_sub(ICON_WIDTH + 2),
            area.y + 1,
            ICON_WIDTH,
            1,
        )
    }

    /// Terminal cursor position while the field is being edited
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.state.active || self.state.widget.is_open() {
            return None;
        }
        let offset = self.state.widget.buffer().len() as u16;
        Some(Position::new(area.x + 1 + offset, area.y + 1))
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.state.active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if self.state.props.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .title(format!(" {} ", self.state.props.label))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let buffer = self.state.widget.buffer();
        let text = if buffer.is_empty() && !self.state.active {
            Line::from(Span::styled(
                self.state.props.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(
                buffer,
                Style::default().fg(if self.state.active {
                    Color::Yellow
                } else {
                    Color::White
                }),
            ))
        };
        Paragraph::new(text).render(inner, buf);

        let icon = Self::icon_area(area);
        let icon_style = if self.state.widget.is_open() {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };
        buf.set_string(icon.x, icon.y, ICON, icon_style);
    }
}
