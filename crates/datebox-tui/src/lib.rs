use std::io;

// Flux architecture modules
mod actions;
mod app;
mod dispatcher;
mod effects;
mod keyboard;
mod logger;
mod stores;
mod ui;

mod click_away;
mod tui;

pub use app::App;
pub use effects::CommitCallback;
pub use stores::FieldProps;

/// What the host form hands to the picker
#[derive(Default)]
pub struct TuiOptions {
    /// Initial canonical value, `YYYY-MM-DD`
    pub value: Option<String>,

    /// Label, error text and placeholder, drawn as given
    pub props: FieldProps,

    /// Called with every committed value (`""` when cleared)
    pub on_commit: Option<CommitCallback>,
}

/// Run the picker until the user quits; returns the final canonical value
pub async fn tui_main(options: TuiOptions) -> io::Result<String> {
    // Install color-eyre for better error messages BEFORE terminal init
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: Failed to install color-eyre: {}", e);
    }

    // Create the application and action receiver (this initializes the logger)
    let (mut app, action_receiver) = match App::new(options) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            return Err(io::Error::other(e.to_string()));
        }
    };

    let mut terminal = tui::TerminalGuard::acquire()?;
    let result = app.run(&mut terminal, action_receiver).await;
    // restore before anything is printed
    drop(terminal);

    if let Err(e) = result {
        eprintln!("Application error: {:?}", e);
        return Err(e);
    }

    Ok(app.value())
}
