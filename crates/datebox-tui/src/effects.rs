/// Effects module handles side effects triggered by Actions.
/// The only outward effect of the field is notifying the host of commits.
use crate::actions::Action;

/// Host callback receiving `YYYY-MM-DD`, or `""` when the field was cleared
pub type CommitCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Effects handler that executes side effects based on actions
pub struct Effects {
    on_commit: Option<CommitCallback>,
}

impl Effects {
    pub fn new(on_commit: Option<CommitCallback>) -> Self {
        Self { on_commit }
    }

    pub fn handle(&self, action: &Action) {
        match action {
            Action::Committed(commit) => {
                let value = commit.canonical();
                if value.is_empty() {
                    log::info!("Date cleared");
                } else {
                    log::info!("Date committed: {}", value);
                }
                if let Some(callback) = &self.on_commit {
                    callback(&value);
                }
            }
            Action::ShowError(message) => {
                log::warn!("{}", message);
            }
            _ => {}
        }
    }
}
