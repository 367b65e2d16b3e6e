/// Keyboard and mouse input handling and key mapping
use crate::actions::Action;
use crate::stores::{DateInputState, DateInputStore, UIStore};
use crate::ui::calendar_popup::PopupHit;
use crate::ui::date_field::DateField;
use datebox_core::MonthStep;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Handle keyboard input and return the appropriate Action
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_store: &UIStore,
    date_store: &DateInputStore,
) -> Option<Action> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(Action::Quit);
    }

    let ui_state = ui_store.get_state();

    // Help overlay swallows everything but its own close keys
    if ui_state.show_help {
        return match key_event.code {
            KeyCode::Char('?') | KeyCode::Esc => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    if ui_state.error_message.is_some() && key_event.code == KeyCode::Esc {
        return Some(Action::ClearError);
    }

    let date_state = date_store.get_state();
    if date_state.widget.is_open() {
        return handle_popup_keys(key_event);
    }

    if ui_state.show_logs {
        if let Some(action) = handle_logs_keys(key_event) {
            return Some(action);
        }
    }

    handle_field_keys(key_event, &date_state)
}

fn handle_popup_keys(key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
        KeyCode::Esc => Some(Action::ClosePopup),
        KeyCode::Left => Some(Action::MoveHighlight(-1)),
        KeyCode::Right => Some(Action::MoveHighlight(1)),
        KeyCode::Up => Some(Action::MoveHighlight(-7)),
        KeyCode::Down => Some(Action::MoveHighlight(7)),
        KeyCode::PageUp | KeyCode::Char('<') => Some(Action::NavigateMonth(MonthStep::Previous)),
        KeyCode::PageDown | KeyCode::Char('>') => Some(Action::NavigateMonth(MonthStep::Next)),
        KeyCode::Enter => Some(Action::SelectHighlighted),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::SelectToday),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Clear),
        KeyCode::Char(' ') => Some(Action::TogglePopup),
        KeyCode::Tab => Some(Action::Blur),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '/' => Some(Action::TypeChar(c)),
        _ => None,
    }
}

fn handle_logs_keys(key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') => Some(Action::ScrollLogs(-1)),
        KeyCode::Char('k') => Some(Action::ScrollLogs(1)),
        KeyCode::PageDown => Some(Action::ScrollLogs(-10)),
        KeyCode::PageUp => Some(Action::ScrollLogs(10)),
        _ => None,
    }
}

fn handle_field_keys(key_event: KeyEvent, date_state: &DateInputState) -> Option<Action> {
    match key_event.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '/' => Some(Action::TypeChar(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(' ') | KeyCode::F(4) => Some(Action::TogglePopup),
        KeyCode::Down => Some(Action::OpenPopup),
        KeyCode::Delete => Some(Action::Clear),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::SelectToday),
        KeyCode::Enter | KeyCode::Tab if date_state.active => Some(Action::Blur),
        KeyCode::Enter | KeyCode::Tab => Some(Action::Focus),
        KeyCode::Esc if date_state.active => Some(Action::Blur),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('L') | KeyCode::Char('l') => Some(Action::ToggleLogs),
        _ => None,
    }
}

/// Handle a left click: popup controls first, then the field, then click-away
pub fn handle_mouse_event(mouse_event: MouseEvent, date_store: &DateInputStore) -> Option<Action> {
    if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let position = Position::new(mouse_event.column, mouse_event.row);
    let state = date_store.get_state();

    if state.widget.is_open() {
        let grid = state.widget.grid();
        match state.popup_geometry().hit(position, &grid) {
            PopupHit::Navigate(step) => return Some(Action::NavigateMonth(step)),
            PopupHit::Day(date) => return Some(Action::SelectDate(date)),
            PopupHit::Clear => return Some(Action::Clear),
            PopupHit::Today => return Some(Action::SelectToday),
            PopupHit::Inside => return None,
            PopupHit::Outside => {}
        }
    }

    if DateField::icon_area(state.field_area).contains(position) {
        return Some(Action::TogglePopup);
    }
    if state.field_area.contains(position) {
        return if state.active { None } else { Some(Action::Focus) };
    }

    date_store
        .click_is_outside(position)
        .then_some(Action::Blur)
}
