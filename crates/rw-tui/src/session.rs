//! Terminal session guard
//!
//! Raw mode and the alternate screen are entered together and undone on
//! drop, so an early error or a panic never leaves the shell in raw mode.

use std::io;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

/// The terminal state changes a viewer session makes
pub trait TerminalMode {
    fn enable_raw(&mut self) -> io::Result<()>;
    fn disable_raw(&mut self) -> io::Result<()>;
    fn enter_screen(&mut self) -> io::Result<()>;
    /// Leave the alternate screen and show the cursor again
    fn leave_screen(&mut self) -> io::Result<()>;
}

/// Raw mode and alternate screen on stdout via crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct Crossterm;

impl TerminalMode for Crossterm {
    fn enable_raw(&mut self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn disable_raw(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }

    fn enter_screen(&mut self) -> io::Result<()> {
        execute!(io::stdout(), EnterAlternateScreen)
    }

    fn leave_screen(&mut self) -> io::Result<()> {
        execute!(io::stdout(), LeaveAlternateScreen, Show)
    }
}

/// An active viewer session; restores the terminal when dropped
#[derive(Debug)]
pub struct TerminalSession<M: TerminalMode = Crossterm> {
    mode: M,
    active: bool,
}

impl TerminalSession<Crossterm> {
    pub fn enter() -> io::Result<Self> {
        Self::enter_with(Crossterm)
    }
}

impl<M: TerminalMode> TerminalSession<M> {
    /// Enable raw mode, then switch to the alternate screen.
    ///
    /// If the screen switch fails, raw mode is turned off again before
    /// the error is returned.
    pub fn enter_with(mut mode: M) -> io::Result<Self> {
        mode.enable_raw()?;
        let mut session = Self { mode, active: true };
        session.mode.enter_screen()?;
        Ok(session)
    }

    /// Restore the terminal and report the first failure
    pub fn leave(mut self) -> io::Result<()> {
        self.active = false;
        let screen = self.mode.leave_screen();
        self.mode.disable_raw()?;
        screen
    }
}

impl<M: TerminalMode> Drop for TerminalSession<M> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.mode.leave_screen();
            let _ = self.mode.disable_raw();
        }
    }
}
