//! Configuration for the termui toolkit.
//!
//! Settings come from the process environment only: the conventional
//! `PAGER`, `LESS` and `TERM` variables plus `TERMUI_`-prefixed overrides.
//! Nothing is cached; callers load a fresh [`TermuiConfig`] whenever the
//! environment may have changed.

pub mod color;
pub mod config;

pub use color::ColorPolicy;
pub use config::{load_config, ConfigError, Result, TermuiConfig};
