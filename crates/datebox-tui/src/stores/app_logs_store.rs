/// AppLogsStore exposes the in-memory application logs to the logs panel
use crate::actions::Action;
use crate::logger::LogBuffer;
use std::sync::{Arc, RwLock};

/// Internal state for application logs
#[derive(Debug, Clone, Default)]
pub struct AppLogsState {
    /// Formatted log lines
    pub logs: Vec<String>,

    /// Lines scrolled back from the most recent one
    pub scroll_offset: usize,
}

/// Store that holds application log state
#[derive(Clone)]
pub struct AppLogsStore {
    state: Arc<RwLock<AppLogsState>>,
    log_buffer: LogBuffer,
}

impl AppLogsStore {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppLogsState::default())),
            log_buffer,
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> AppLogsState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Refresh logs from the buffer and apply scroll actions
    pub fn reduce(&self, action: &Action) {
        let logs = self.log_buffer.get_logs();
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.logs = logs;

        match action {
            Action::ScrollLogs(amount) if *amount >= 0 => {
                let max = state.logs.len().saturating_sub(1);
                state.scroll_offset = state.scroll_offset.saturating_add(*amount as usize).min(max);
            }
            Action::ScrollLogs(amount) => {
                state.scroll_offset = state.scroll_offset.saturating_sub(amount.unsigned_abs());
            }
            Action::ToggleLogs => {
                state.scroll_offset = 0;
            }
            _ => {}
        }
    }
}
