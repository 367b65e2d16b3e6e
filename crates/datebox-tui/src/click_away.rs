/// Scoped "click outside" subscription for the date field.
///
/// A guard is acquired when the field becomes active and dropped when it is
/// closed or blurred. Only a held guard turns a stray click into a blur.
use ratatui::layout::{Position, Rect};

#[derive(Debug)]
pub struct ClickAwayGuard {
    regions: Vec<Rect>,
}

impl ClickAwayGuard {
    pub fn acquire() -> Self {
        log::debug!("Click-away listener acquired");
        Self {
            regions: Vec::new(),
        }
    }

    /// Areas that count as "inside" the widget
    pub fn watch(&mut self, regions: Vec<Rect>) {
        self.regions = regions;
    }

    pub fn is_outside(&self, position: Position) -> bool {
        !self.regions.iter().any(|r| r.contains(position))
    }
}

impl Drop for ClickAwayGuard {
    fn drop(&mut self) {
        log::debug!("Click-away listener released");
    }
}
