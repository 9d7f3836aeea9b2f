//! Output routing: picks the destination stream for a request and decides
//! whether styling survives the write.

use termui_config::ColorPolicy;
use tracing::debug;

use crate::terminal::{OutputTarget, Stream, Terminal};

/// A resolved destination: which stream, and whether it is a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub target: OutputTarget,
    pub is_tty: bool,
}

impl Route {
    /// Applies `policy` to this route.
    pub fn emit_color(&self, policy: ColorPolicy) -> bool {
        should_emit_color(policy, self.target, self.is_tty)
    }
}

/// Resolves routes against a [`Terminal`] capability.
///
/// Nothing is remembered between calls.
#[derive(Clone, Copy)]
pub struct StreamRouter<'a> {
    terminal: &'a dyn Terminal,
}

impl<'a> StreamRouter<'a> {
    pub fn new(terminal: &'a dyn Terminal) -> Self {
        Self { terminal }
    }

    /// Resolves the output stream selected by `err`.
    pub fn resolve(&self, err: bool) -> Route {
        let target = OutputTarget::from_err(err);
        let is_tty = self.terminal.is_interactive(target.stream());
        Route { target, is_tty }
    }

    /// Returns `true` if stdin is a terminal.
    pub fn input_is_tty(&self) -> bool {
        self.terminal.is_interactive(Stream::Stdin)
    }
}

/// `Always` and `Never` win outright; `Auto` follows the terminal check.
pub fn should_emit_color(policy: ColorPolicy, target: OutputTarget, is_tty: bool) -> bool {
    let emit = policy.resolve(is_tty);
    debug!(%policy, %target, is_tty, emit, "resolved color");
    emit
}
