//! Configuration types and loading for termui.
//!
//! The main entry point is [`TermuiConfig`], extracted by [`load_config`]
//! from the environment through `figment`. Raw `PAGER`, `LESS` and `TERM`
//! are read first; `TERMUI_`-prefixed variables override them.

use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::color::ColorPolicy;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment could not be extracted into a [`TermuiConfig`].
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a [`ConfigError::InvalidValue`].
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Conventional environment variables read without a prefix.
const RAW_KEYS: &[&str] = &["PAGER", "LESS", "TERM"];

/// Prefix for toolkit-specific overrides (`TERMUI_PAGER`, `TERMUI_COLOR`, ...).
pub const ENV_PREFIX: &str = "TERMUI_";

/// Runtime settings for the terminal toolkit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermuiConfig {
    /// Pager command line, e.g. `less -R`.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub pager: Option<String>,

    /// Flags handed to `less` through its own `LESS` variable.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub less: Option<String>,

    /// Terminal type; `dumb` and `emacs` disable paging.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub term: Option<String>,

    /// Disables the pager entirely (`TERMUI_NO_PAGER=1`).
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub no_pager: bool,

    /// Default color policy for front ends (`TERMUI_COLOR`).
    #[serde(default)]
    pub color: ColorPolicy,
}

impl TermuiConfig {
    /// Extracts a config from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Returns the configured pager command, ignoring blank values.
    pub fn pager_command(&self) -> Option<&str> {
        non_blank(self.pager.as_deref())
    }

    /// Returns the `LESS` flags, ignoring blank values.
    pub fn less_flags(&self) -> Option<&str> {
        non_blank(self.less.as_deref())
    }

    /// Returns `true` if the terminal type cannot host a pager.
    pub fn is_dumb_terminal(&self) -> bool {
        matches!(non_blank(self.term.as_deref()), Some("dumb" | "emacs"))
    }
}

/// The figment used by [`load_config`].
pub fn figment() -> Figment {
    Figment::new()
        .merge(Env::raw().only(RAW_KEYS))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Loads configuration from the current process environment.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] if a variable has a value of the wrong shape.
pub fn load_config() -> Result<TermuiConfig> {
    TermuiConfig::from_figment(&figment())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts any scalar as text. The environment provider turns `true` into a
/// boolean and `1` into a number, both valid values for `PAGER` or `LESS`.
fn deserialize_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Flag(bool),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Flag(flag) => flag.to_string(),
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}

/// Accepts `true`/`false`, `1`/`0` and `yes`/`no` style flags.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Number(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Flag(flag) => flag,
        Raw::Number(n) => n != 0,
        Raw::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_figment_is_default() {
        let cfg = TermuiConfig::from_figment(&Figment::new()).unwrap();
        assert_eq!(cfg, TermuiConfig::default());
        assert_eq!(cfg.color, ColorPolicy::Auto);
        assert!(!cfg.no_pager);
    }

    #[test]
    fn test_reads_raw_pager_variables() {
        Jail::expect_with(|jail| {
            jail.set_env("PAGER", "less -R");
            jail.set_env("LESS", "-FX");
            jail.set_env("TERM", "dumb");

            let cfg = load_config().map_err(|e| e.to_string())?;
            assert_eq!(cfg.pager_command(), Some("less -R"));
            assert_eq!(cfg.less_flags(), Some("-FX"));
            assert!(cfg.is_dumb_terminal());
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_overrides_raw() {
        Jail::expect_with(|jail| {
            jail.set_env("PAGER", "more");
            jail.set_env("TERMUI_PAGER", "cat");
            jail.set_env("TERMUI_NO_PAGER", "1");
            jail.set_env("TERMUI_COLOR", "never");

            let cfg = load_config().map_err(|e| e.to_string())?;
            assert_eq!(cfg.pager_command(), Some("cat"));
            assert!(cfg.no_pager);
            assert_eq!(cfg.color, ColorPolicy::Never);
            Ok(())
        });
    }

    #[test]
    fn test_bad_color_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TERMUI_COLOR", "rainbow");
            assert!(load_config().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_scalar_values_are_read_as_text() {
        Jail::expect_with(|jail| {
            jail.set_env("PAGER", "true");
            jail.set_env("LESS", "1");
            jail.set_env("TERM", "2.5");

            let cfg = load_config().map_err(|e| e.to_string())?;
            assert_eq!(cfg.pager_command(), Some("true"));
            assert_eq!(cfg.less_flags(), Some("1"));
            assert_eq!(cfg.term.as_deref(), Some("2.5"));
            assert!(!cfg.is_dumb_terminal());
            Ok(())
        });
    }

    #[test]
    fn test_blank_pager_is_unset() {
        let cfg = TermuiConfig {
            pager: Some("   ".to_string()),
            ..TermuiConfig::default()
        };
        assert_eq!(cfg.pager_command(), None);
    }

    #[test]
    fn test_xterm_is_not_dumb() {
        let cfg = TermuiConfig {
            term: Some("xterm-256color".to_string()),
            ..TermuiConfig::default()
        };
        assert!(!cfg.is_dumb_terminal());
    }
}
