//! The tri-state color policy shared by every output operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::ConfigError;

/// Whether ANSI styling should be emitted for a write.
///
/// [`ColorPolicy::Auto`] defers to terminal detection: styling is kept only
/// when the destination stream is an interactive terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorPolicy {
    /// Always emit styling, even into pipes and files.
    Always,
    /// Never emit styling; styled text is stripped before writing.
    Never,
    /// Emit styling only when the destination is a terminal.
    #[default]
    Auto,
}

impl ColorPolicy {
    /// Returns the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
            Self::Auto => "auto",
        }
    }

    /// Resolves the policy against the destination's terminal status.
    pub fn resolve(self, is_tty: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_tty,
        }
    }
}

impl From<Option<bool>> for ColorPolicy {
    fn from(explicit: Option<bool>) -> Self {
        match explicit {
            Some(true) => Self::Always,
            Some(false) => Self::Never,
            None => Self::Auto,
        }
    }
}

impl fmt::Display for ColorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" | "on" | "true" | "yes" => Ok(Self::Always),
            "never" | "off" | "false" | "no" => Ok(Self::Never),
            "auto" | "" => Ok(Self::Auto),
            other => Err(ConfigError::invalid_value(
                "color",
                format!("unknown color policy '{other}' (expected always, never or auto)"),
            )),
        }
    }
}

impl Serialize for ColorPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColorPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Environment providers parse `true`/`false` into booleans.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Ok(Self::from(Some(flag))),
            Raw::Name(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_overrides_detection() {
        assert!(ColorPolicy::Always.resolve(false));
        assert!(!ColorPolicy::Never.resolve(true));
        assert!(ColorPolicy::Auto.resolve(true));
        assert!(!ColorPolicy::Auto.resolve(false));
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("ALWAYS".parse::<ColorPolicy>().unwrap(), ColorPolicy::Always);
        assert_eq!("off".parse::<ColorPolicy>().unwrap(), ColorPolicy::Never);
        assert_eq!("".parse::<ColorPolicy>().unwrap(), ColorPolicy::Auto);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "sometimes".parse::<ColorPolicy>().unwrap_err();
        assert!(err.to_string().contains("sometimes"));
        assert!(err.to_string().contains("always, never or auto"));
    }

    #[test]
    fn from_explicit_flag() {
        assert_eq!(ColorPolicy::from(Some(true)), ColorPolicy::Always);
        assert_eq!(ColorPolicy::from(Some(false)), ColorPolicy::Never);
        assert_eq!(ColorPolicy::from(None), ColorPolicy::Auto);
    }
}
