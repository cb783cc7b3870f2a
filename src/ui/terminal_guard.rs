//! Raw-mode terminal session for the wizard.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

pub type WizardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal while the wizard runs and puts it back on drop.
///
/// Bracketed paste is enabled so a pasted address arrives as one event
/// instead of a burst of key presses.
pub struct TerminalGuard {
    terminal: WizardTerminal,
    restored: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste) {
            Self::cleanup();
            return Err(err.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut WizardTerminal {
        &mut self.terminal
    }

    /// Restore the terminal, reporting failures instead of swallowing them.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Best-effort restore, also used by the panic hook.
    pub fn cleanup() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        let _ = execute!(io::stdout(), Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            Self::cleanup();
        }
    }
}

/// Restore the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        TerminalGuard::cleanup();
        original_hook(panic_info);
    }));
}
