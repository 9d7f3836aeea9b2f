//! Terminal detection.
//!
//! [`Terminal`] is the single capability the rest of the crate consults to
//! learn whether a standard stream is attached to a TTY. It is queried on
//! every call and never cached, so redirections made between calls are
//! picked up.

use std::fmt;

use crossterm::tty::IsTty;

/// One of the three standard streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdin,
    Stdout,
    Stderr,
}

impl Stream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdin => "stdin",
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stream an output operation writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

impl OutputTarget {
    /// Stderr when `err` is set, stdout otherwise.
    pub fn from_err(err: bool) -> Self {
        if err { Self::Stderr } else { Self::Stdout }
    }

    pub fn stream(self) -> Stream {
        match self {
            Self::Stdout => Stream::Stdout,
            Self::Stderr => Stream::Stderr,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stream().as_str())
    }
}

/// Answers whether a standard stream is an interactive terminal.
pub trait Terminal {
    /// Returns `true` if `stream` is connected to a terminal device.
    ///
    /// Streams without a queryable descriptor report `false`.
    fn is_interactive(&self, stream: Stream) -> bool;
}

/// [`Terminal`] backed by the process's real standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTerminal;

impl Terminal for OsTerminal {
    fn is_interactive(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdin => std::io::stdin().is_tty(),
            Stream::Stdout => std::io::stdout().is_tty(),
            Stream::Stderr => std::io::stderr().is_tty(),
        }
    }
}

/// Returns the terminal size as `(columns, rows)`, defaulting to 80x24 when
/// detection fails.
pub fn terminal_size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or((80, 24))
}
