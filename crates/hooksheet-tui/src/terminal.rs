//! Raw mode and alternate screen handling
//!
//! [`TerminalState`] puts the terminal into the mode the cheat sheet needs
//! and puts it back on [`TerminalState::restore`], on drop, or from the
//! panic hook installed by [`install_panic_hook`].

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::error::{TuiError, TuiResult};

#[derive(Debug)]
pub struct TerminalState {
    in_alternate_screen: bool,
    mouse_captured: bool,
    raw_mode: bool,
}

impl TerminalState {
    /// Enter raw mode and the alternate screen, optionally capturing the mouse
    pub fn capture(mouse: bool) -> TuiResult<Self> {
        enable_raw_mode().map_err(|e| TuiError::Terminal {
            message: format!("failed to enable raw mode: {e}"),
        })?;

        let mut state = Self {
            in_alternate_screen: false,
            mouse_captured: false,
            raw_mode: true,
        };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        state.in_alternate_screen = true;

        if mouse {
            execute!(stdout, EnableMouseCapture)?;
            state.mouse_captured = true;
        }

        tracing::info!(mouse, "Terminal state captured");
        Ok(state)
    }

    /// Undo everything `capture` did; safe to call more than once
    pub fn restore(&mut self) -> TuiResult<()> {
        let mut stdout = io::stdout();

        if self.mouse_captured {
            execute!(stdout, DisableMouseCapture)?;
            self.mouse_captured = false;
        }

        if self.in_alternate_screen {
            execute!(stdout, LeaveAlternateScreen)?;
            self.in_alternate_screen = false;
        }

        if self.raw_mode {
            disable_raw_mode()?;
            self.raw_mode = false;
            tracing::info!("Terminal state restored");
        }

        Ok(())
    }
}

impl Drop for TerminalState {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!("Failed to restore terminal state on drop: {}", e);
        }
    }
}

/// Restore the terminal before the default panic message is printed
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        default_hook(info);
    }));
}
