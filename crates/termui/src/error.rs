//! Error types for the termui toolkit.

use termui_config::ConfigError;

/// Errors surfaced by termui operations.
///
/// Validation failures inside a prompt never appear here: they are reported
/// to the user and the prompt asks again.
#[derive(Debug, thiserror::Error)]
pub enum TermuiError {
    /// A style attribute name or value is not recognized.
    #[error("invalid {kind} '{value}' (expected one of: {allowed})")]
    InvalidArgument {
        /// What kind of argument was rejected (e.g. "color").
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Comma-separated list of accepted values.
        allowed: String,
    },

    /// Input ended before the user produced a valid answer.
    #[error("aborted")]
    Abort,

    /// The user pressed Ctrl-C while the terminal was in raw mode.
    #[error("interrupted")]
    Interrupted,

    /// The environment configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TermuiError>;

impl TermuiError {
    /// Creates a [`TermuiError::InvalidArgument`] listing the accepted values.
    pub fn invalid_argument<I, S>(kind: &'static str, value: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = allowed
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidArgument {
            kind,
            value: value.into(),
            allowed,
        }
    }

    /// Returns `true` if this is a [`TermuiError::Abort`].
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort)
    }

    /// Returns `true` if this is a [`TermuiError::Interrupted`].
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }

    /// Returns `true` if the error came from a closed reader on the other end
    /// of a pipe.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}
