//! Terminal reset before each run

use std::io::{self, Write};

use crossterm::{cursor, terminal, QueueableCommand};
use tracing::debug;

use crate::config::ClearMode;

/// Cosmetic hook invoked at startup and before every triggered command
pub trait DisplayReset {
    fn reset(&mut self);
}

impl<D: DisplayReset + ?Sized> DisplayReset for &mut D {
    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Clears stdout when enabled, otherwise does nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    clear: bool,
}

impl Screen {
    pub fn new(clear: bool) -> Self {
        Self { clear }
    }

    /// Decide whether to clear from the configured mode and whether stdout
    /// is a terminal.
    pub fn for_mode(mode: ClearMode, is_tty: bool) -> Self {
        Self::new(match mode {
            ClearMode::Always => true,
            ClearMode::Never => false,
            ClearMode::Auto => is_tty,
        })
    }

    pub fn clears(&self) -> bool {
        self.clear
    }

    /// Write the clear sequence to `out`.
    pub fn clear_to(out: &mut impl Write) -> io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.queue(cursor::MoveTo(0, 0))?;
        out.flush()
    }
}

impl DisplayReset for Screen {
    fn reset(&mut self) {
        if !self.clear {
            return;
        }
        if let Err(err) = Self::clear_to(&mut io::stdout()) {
            debug!("clear screen: {err}");
        }
    }
}
