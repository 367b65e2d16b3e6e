/// Main application struct and event loop
use crate::TuiOptions;
use crate::actions::Action;
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::effects::Effects;
use crate::keyboard;
use crate::logger::LogBuffer;
use crate::stores::{AppLogsStore, DateInputStore, UIStore};
use crate::tui::Tui;
use crate::ui::render_layout;
use datebox_core::{SharedClock, SystemClock, get_datebox_setting};
use log::LevelFilter;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// The main application structure following flux architecture
pub struct App {
    /// Dispatcher for sending actions
    dispatcher: Dispatcher,

    /// Store for the date field and its popup
    date_store: DateInputStore,

    /// Store for UI state
    ui_store: UIStore,

    /// Store for application logs
    app_logs_store: AppLogsStore,

    /// Effects handler for side effects
    effects: Effects,

    /// Delay between terminal polls
    tick: Duration,
}

impl App {
    /// Install the in-memory logger and build the stores
    pub fn new(options: TuiOptions) -> Result<(Self, ActionReceiver), Box<dyn std::error::Error>> {
        let log_buffer = crate::logger::init_memory_logger(LevelFilter::Debug)?;
        Ok(Self::build(options, log_buffer, Arc::new(SystemClock)))
    }

    pub(crate) fn build(
        options: TuiOptions,
        log_buffer: LogBuffer,
        clock: SharedClock,
    ) -> (Self, ActionReceiver) {
        let (dispatcher, action_receiver) = Dispatcher::new();
        let TuiOptions {
            value,
            props,
            on_commit,
        } = options;

        // the host value arrives through the same path as later external updates
        let date_store = DateInputStore::with_clock(props, None, clock);
        date_store.reduce(&Action::SetValue(value));

        let app = Self {
            dispatcher,
            date_store,
            ui_store: UIStore::new(),
            app_logs_store: AppLogsStore::new(log_buffer),
            effects: Effects::new(on_commit),
            tick: Duration::from_millis(get_datebox_setting!(DATEBOX_TUI_TICK_MS, u64)),
        };
        (app, action_receiver)
    }

    /// Canonical value of the field, `""` when empty
    pub fn value(&self) -> String {
        self.date_store.canonical()
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Tui,
        mut action_receiver: ActionReceiver,
    ) -> io::Result<()> {
        log::info!("datebox started with value {:?}", self.value());

        loop {
            // Render the UI
            terminal.draw(|frame| {
                render_layout(
                    frame,
                    &self.date_store,
                    &self.ui_store,
                    &self.app_logs_store,
                );
            })?;

            // Check if we should exit
            if self.ui_store.should_exit() {
                break;
            }

            // Use tokio::select to handle both terminal events and actions
            tokio::select! {
                _ = tokio::time::sleep(self.tick) => {
                    if event::poll(Duration::from_millis(0))? {
                        if let Some(action) = self.map_event(event::read()?) {
                            self.dispatcher.dispatch(action);
                        }
                    }
                }

                // Process actions from the dispatcher
                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                }
            }
        }

        // leaving the form counts as a loss of focus
        if let Some(commit) = self.date_store.reduce(&Action::Blur) {
            self.handle_action(&Action::Committed(commit));
        }

        log::info!("datebox exiting with value {:?}", self.value());
        Ok(())
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            // Only process key press events (not release)
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                keyboard::handle_key_event(key_event, &self.ui_store, &self.date_store)
            }
            Event::Mouse(mouse_event) => {
                keyboard::handle_mouse_event(mouse_event, &self.date_store)
            }
            Event::Paste(text) => Some(Action::Paste(text)),
            _ => None,
        }
    }

    /// Handle an action by routing it to stores and effects
    fn handle_action(&mut self, action: &Action) {
        log::debug!("Handling action: {:?}", action);

        // Route to stores (reducers)
        if let Some(commit) = self.date_store.reduce(action) {
            self.dispatcher.dispatch(Action::Committed(commit));
        }
        self.ui_store.reduce(action);
        self.app_logs_store.reduce(action);

        // Trigger side effects
        self.effects.handle(action);

        if edits_field(action) {
            self.refresh_entry_hint();
        }
    }

    /// Show why a complete entry is being held, clear the line once it is not
    fn refresh_entry_hint(&self) {
        let pending = self.date_store.get_state().widget.pending_error();
        let current = self.ui_store.get_state().error_message;
        match pending {
            Some(e) => {
                let message = e.to_string();
                if current.as_deref() != Some(message.as_str()) {
                    self.dispatcher.dispatch(Action::ShowError(message));
                }
            }
            None if current.is_some() => self.dispatcher.dispatch(Action::ClearError),
            None => {}
        }
    }
}

fn edits_field(action: &Action) -> bool {
    matches!(
        action,
        Action::TypeChar(_)
            | Action::Paste(_)
            | Action::Backspace
            | Action::Blur
            | Action::ClosePopup
            | Action::TogglePopup
            | Action::Clear
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::FieldProps;
    use chrono::NaiveDate;
    use datebox_core::FixedClock;
    use std::sync::Mutex;

    fn app(value: Option<&str>) -> (App, ActionReceiver, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let options = TuiOptions {
            value: value.map(str::to_string),
            props: FieldProps::default(),
            on_commit: Some(Box::new(move |v: &str| {
                sink.lock().unwrap().push(v.to_string());
            })),
        };
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()));
        let (app, receiver) = App::build(options, LogBuffer::new(50), clock);
        (app, receiver, seen)
    }

    /// Feed actions through the app the way the event loop does
    fn run_actions(app: &mut App, receiver: &mut ActionReceiver, actions: Vec<Action>) {
        for action in actions {
            app.dispatcher.dispatch(action);
        }
        while let Some(action) = receiver.try_recv() {
            app.handle_action(&action);
        }
    }

    #[test]
    fn test_typed_date_reaches_host_and_history() {
        let (mut app, mut receiver, seen) = app(None);
        let keys = "15032024".chars().map(Action::TypeChar).collect();
        run_actions(&mut app, &mut receiver, keys);

        assert_eq!(app.value(), "2024-03-15");
        assert_eq!(*seen.lock().unwrap(), vec!["2024-03-15"]);
        let history = app.ui_store.get_state().history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].value, "2024-03-15");
    }

    #[test]
    fn test_invalid_entry_reverts_without_commit() {
        let (mut app, mut receiver, seen) = app(None);
        let mut actions = vec![Action::OpenPopup];
        actions.extend("31022024".chars().map(Action::TypeChar));
        actions.push(Action::ClosePopup);
        run_actions(&mut app, &mut receiver, actions);

        assert_eq!(app.value(), "");
        assert_eq!(app.date_store.get_state().widget.buffer(), "");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_held_entry_shows_hint_until_reverted() {
        let (mut app, mut receiver, _) = app(None);
        let keys = "31022024".chars().map(Action::TypeChar).collect();
        run_actions(&mut app, &mut receiver, keys);
        assert_eq!(
            app.ui_store.get_state().error_message.as_deref(),
            Some("Invalid date: 31/02/2024 does not exist")
        );

        run_actions(&mut app, &mut receiver, vec![Action::Blur]);
        assert_eq!(app.ui_store.get_state().error_message, None);
        assert_eq!(app.date_store.get_state().widget.buffer(), "");
    }

    #[test]
    fn test_deleting_everything_commits_clear() {
        let (mut app, mut receiver, seen) = app(Some("2024-01-01"));
        let actions = (0..10).map(|_| Action::Backspace).collect();
        run_actions(&mut app, &mut receiver, actions);

        assert_eq!(app.value(), "");
        assert_eq!(*seen.lock().unwrap(), vec![""]);
    }

    #[test]
    fn test_clear_and_today_buttons() {
        let (mut app, mut receiver, seen) = app(Some("2024-01-01"));
        run_actions(
            &mut app,
            &mut receiver,
            vec![Action::OpenPopup, Action::Clear, Action::SelectToday],
        );
        assert_eq!(*seen.lock().unwrap(), vec!["", "2024-06-10"]);
        assert!(!app.date_store.get_state().widget.is_open());
    }

    #[test]
    fn test_host_value_is_loaded_without_committing() {
        let (app, mut receiver, seen) = app(Some("2024-01-01"));
        let state = app.date_store.get_state();
        assert_eq!(state.widget.buffer(), "01/01/2024");
        assert_eq!(state.highlight, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(receiver.try_recv().is_none());
        assert!(seen.lock().unwrap().is_empty());
        assert!(app.ui_store.get_state().history.is_empty());
    }

    #[test]
    fn test_malformed_host_value_starts_empty() {
        let (app, _receiver, _) = app(Some("01/01/2024"));
        assert_eq!(app.value(), "");
        assert_eq!(app.date_store.get_state().widget.buffer(), "");
    }

    #[test]
    fn test_quit_sets_exit_flag() {
        let (mut app, mut receiver, _) = app(None);
        run_actions(&mut app, &mut receiver, vec![Action::Quit]);
        assert!(app.ui_store.should_exit());
    }
}
