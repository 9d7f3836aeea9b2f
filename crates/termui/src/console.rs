//! The [`Console`] owns every capability an interaction needs: terminal
//! detection, the standard streams, and the key reader.
//!
//! [`Console::system`] wires the real process streams; tests swap in
//! [`crate::testing::Harness`].

use std::io::{self, Write};

use termui_config::{load_config, TermuiConfig};

use crate::error::{Result, TermuiError};
use crate::input::{self, KeyReader, OsKeyReader};
use crate::router::StreamRouter;
use crate::terminal::{OsTerminal, OutputTarget, Terminal};

/// Byte-level access to the standard streams.
pub trait Streams {
    /// Writes all of `buf` to `target`.
    fn write_all(&mut self, target: OutputTarget, buf: &[u8]) -> io::Result<()>;

    /// Flushes `target`.
    fn flush(&mut self, target: OutputTarget) -> io::Result<()>;

    /// Reads one line from stdin, without its line terminator.
    ///
    /// With `hidden`, typed characters must not be echoed. Returns
    /// `Ok(None)` at end of input.
    fn read_line(&mut self, hidden: bool) -> io::Result<Option<String>>;
}

/// [`Streams`] over the process's stdin, stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsStreams;

impl Streams for OsStreams {
    fn write_all(&mut self, target: OutputTarget, buf: &[u8]) -> io::Result<()> {
        match target {
            OutputTarget::Stdout => io::stdout().lock().write_all(buf),
            OutputTarget::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn flush(&mut self, target: OutputTarget) -> io::Result<()> {
        match target {
            OutputTarget::Stdout => io::stdout().flush(),
            OutputTarget::Stderr => io::stderr().flush(),
        }
    }

    fn read_line(&mut self, hidden: bool) -> io::Result<Option<String>> {
        if hidden {
            input::read_hidden_line()
        } else {
            input::read_visible_line()
        }
    }
}

/// Entry point for every output and interaction operation.
pub struct Console {
    pub(crate) terminal: Box<dyn Terminal>,
    pub(crate) streams: Box<dyn Streams>,
    pub(crate) keys: Box<dyn KeyReader>,
    pub(crate) config: Option<TermuiConfig>,
}

impl Console {
    /// Builds a console from explicit capabilities.
    pub fn new(
        terminal: Box<dyn Terminal>,
        streams: Box<dyn Streams>,
        keys: Box<dyn KeyReader>,
        config: TermuiConfig,
    ) -> Self {
        Self {
            terminal,
            streams,
            keys,
            config: Some(config),
        }
    }

    /// A console over the real process streams.
    ///
    /// Configuration is loaded from the environment on demand; only the
    /// pager reads it.
    pub fn system() -> Self {
        Self {
            terminal: Box::new(OsTerminal),
            streams: Box::new(OsStreams),
            keys: Box::new(OsKeyReader),
            config: None,
        }
    }

    /// A console over the real process streams with the given config.
    pub fn with_config(config: TermuiConfig) -> Self {
        Self::new(
            Box::new(OsTerminal),
            Box::new(OsStreams),
            Box::new(OsKeyReader),
            config,
        )
    }

    /// The config this console was built with, if any.
    pub fn config(&self) -> Option<&TermuiConfig> {
        self.config.as_ref()
    }

    /// The explicit config, or a fresh load from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`TermuiError::Config`] if the environment cannot be parsed.
    pub(crate) fn current_config(&self) -> Result<TermuiConfig> {
        match &self.config {
            Some(config) => Ok(config.clone()),
            None => Ok(load_config()?),
        }
    }

    /// A router over this console's terminal capability.
    pub fn router(&self) -> StreamRouter<'_> {
        StreamRouter::new(self.terminal.as_ref())
    }

    /// Writes bytes to `target` and flushes it.
    pub(crate) fn write_flush(&mut self, target: OutputTarget, buf: &[u8]) -> Result<()> {
        self.streams.write_all(target, buf)?;
        self.streams.flush(target)?;
        Ok(())
    }

    /// Reads a line for a prompt.
    ///
    /// End of input becomes [`TermuiError::Abort`] and Ctrl-C becomes
    /// [`TermuiError::Interrupted`]. A hidden read is always followed by a
    /// newline on the prompt's stream.
    pub(crate) fn read_answer(&mut self, hidden: bool, err: bool) -> Result<String> {
        let target = OutputTarget::from_err(err);
        let line = match self.streams.read_line(hidden) {
            Ok(line) => line.ok_or(TermuiError::Abort),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(TermuiError::Interrupted),
            Err(e) => return Err(e.into()),
        };
        if hidden {
            self.write_flush(target, b"\n")?;
        }
        line
    }
}
