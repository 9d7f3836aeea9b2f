//! Waiting for a single keypress.

use std::io;

use tracing::debug;

use crate::console::Console;
use crate::echo::EchoOptions;
use crate::error::{Result, TermuiError};

/// Message shown by [`Console::pause`].
pub const DEFAULT_PAUSE_MESSAGE: &str = "Press any key to continue ...";

impl Console {
    /// Shows the default message and waits for one key on stdout.
    pub fn pause(&mut self) -> Result<()> {
        self.pause_with(DEFAULT_PAUSE_MESSAGE, false)
    }

    /// Shows `message` and waits for one key, without requiring Enter.
    ///
    /// Does nothing unless stdin and the target stream are both terminals.
    /// Interrupts and end of input while waiting count as the keypress.
    pub fn pause_with(&mut self, message: &str, err: bool) -> Result<()> {
        let router = self.router();
        let interactive = router.input_is_tty() && router.resolve(err).is_tty;
        if !interactive {
            debug!("not a terminal, skipping pause");
            return Ok(());
        }

        let opts = EchoOptions::new().err(err);
        if !message.is_empty() {
            self.echo_with(message, opts.nl(false))?;
        }
        let key = self.keys.read_key();
        if !message.is_empty() {
            self.echo_with("", opts)?;
        }
        match key {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof) => {
                debug!(error = %e, "pause ended without a key");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads one keypress without waiting for Enter.
    ///
    /// Returns `None` for keys that have no character. Ctrl-C is reported as
    /// [`TermuiError::Interrupted`].
    pub fn getchar(&mut self) -> Result<Option<char>> {
        match self.keys.read_key() {
            Ok(key) => Ok(key),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(TermuiError::Interrupted),
            Err(e) => Err(e.into()),
        }
    }
}
