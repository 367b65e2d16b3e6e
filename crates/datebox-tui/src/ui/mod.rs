/// UI module - field, popup and panels
pub mod calendar_popup;
pub mod date_field;
pub mod history_panel;
pub mod layout;
pub mod logs_panel;

pub use layout::render_layout;
