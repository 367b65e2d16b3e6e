/// UIStore manages UI-specific state (overlays, commit history, errors)
use crate::actions::Action;
use datebox_core::{Commit, get_datebox_setting};
use std::sync::{Arc, RwLock};

/// One value handed to the host form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub at: String,
    pub value: String,
}

/// Internal state for UI
#[derive(Debug, Clone, Default)]
pub struct UIState {
    /// Whether help overlay is visible
    pub show_help: bool,

    /// Whether the application logs replace the history panel
    pub show_logs: bool,

    /// Most recent commits, oldest first
    pub history: Vec<CommitRecord>,

    /// Error message to display (if any)
    pub error_message: Option<String>,

    /// Whether the application should exit
    pub should_exit: bool,
}

/// Store that holds UI-related state
#[derive(Clone)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
    history_limit: usize,
}

impl UIStore {
    pub fn new() -> Self {
        Self::with_history_limit(get_datebox_setting!(DATEBOX_HISTORY_LINES, usize))
    }

    /// Keep at most `history_limit` commits, dropping the oldest first
    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(UIState::default())),
            history_limit: history_limit.max(1),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UIState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        match action {
            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }

            Action::ToggleLogs => {
                state.show_logs = !state.show_logs;
            }

            Action::Committed(commit) => {
                if state.history.len() >= self.history_limit {
                    let excess = state.history.len() + 1 - self.history_limit;
                    state.history.drain(..excess);
                }
                state.history.push(record(commit));
                state.error_message = None;
            }

            Action::ShowError(message) => {
                state.error_message = Some(message.clone());
            }

            Action::ClearError => {
                state.error_message = None;
            }

            Action::Quit => {
                state.should_exit = true;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Check if the application should exit
    pub fn should_exit(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .should_exit
    }
}

fn record(commit: &Commit) -> CommitRecord {
    CommitRecord {
        at: chrono::Local::now().format("%H:%M:%S").to_string(),
        value: commit.canonical(),
    }
}
