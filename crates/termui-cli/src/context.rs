//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: the
//! loaded configuration and the resolved global flags.

use anyhow::{Context, Result};
use termui::{Console, EchoOptions};
use termui_config::{load_config, ColorPolicy, TermuiConfig};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Environment configuration.
    pub config: TermuiConfig,

    /// Color policy: `--color` flag > `TERMUI_COLOR` > auto.
    pub color: ColorPolicy,

    /// Write to stderr instead of stdout.
    pub err: bool,

    /// Verbose output.
    pub verbose: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments and the
    /// environment.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let config = load_config().context("failed to read termui environment settings")?;
        Ok(Self::with_config(global, config))
    }

    /// Build a `RuntimeContext` from parsed global arguments and an explicit
    /// config.
    pub fn with_config(global: &GlobalArgs, config: TermuiConfig) -> Self {
        let color = global.color.unwrap_or(config.color);
        Self {
            config,
            color,
            err: global.err,
            verbose: global.verbose,
        }
    }

    /// A console over the real process streams.
    pub fn console(&self) -> Console {
        Console::with_config(self.config.clone())
    }

    /// Echo options honoring the global flags.
    pub fn echo_options(&self) -> EchoOptions {
        EchoOptions::new().err(self.err).color(self.color)
    }
}
