use std::io::{self, Stdout, stdout};
use std::ops::{Deref, DerefMut};
use std::panic;

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal in raw mode; restores it when dropped
pub struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    /// Enter the alternate screen with mouse capture and bracketed paste
    pub fn acquire() -> io::Result<Self> {
        // Set up panic hook to restore terminal
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore();
            original_hook(panic_info);
        }));

        Self::enter().map_err(|e| {
            let _ = restore();
            e
        })
    }

    fn enter() -> io::Result<Self> {
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        enable_raw_mode()?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }
}

impl Deref for TerminalGuard {
    type Target = Tui;

    fn deref(&self) -> &Tui {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    execute!(
        stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    disable_raw_mode()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::terminal::is_raw_mode_enabled;

    #[test]
    fn test_raw_mode_is_released_whether_or_not_acquire_succeeds() {
        // without a terminal acquire fails part way; with one the guard drops here
        drop(TerminalGuard::acquire());
        assert!(!is_raw_mode_enabled().unwrap_or(false));
    }
}
