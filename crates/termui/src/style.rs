//! ANSI SGR styling: encodes attribute sets into escape sequences and strips
//! them back out.
//!
//! Codes are byte-exact: foreground 30-37, background 40-47, bold 1, dim 2,
//! underline 4, blink 5, reverse 7, and the reset sequence `ESC[0m`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use owo_colors::{AnsiColors, DynColor};
use regex::Regex;

use crate::error::{Result, TermuiError};

/// Resets every attribute.
pub const RESET: &str = "\x1b[0m";

static SGR_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("SGR pattern is valid"));

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// The eight basic ANSI colors, in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Every color, ordered by SGR code.
    pub const ALL: [Color; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Returns the lowercase color name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    fn ansi(self) -> AnsiColors {
        match self {
            Self::Black => AnsiColors::Black,
            Self::Red => AnsiColors::Red,
            Self::Green => AnsiColors::Green,
            Self::Yellow => AnsiColors::Yellow,
            Self::Blue => AnsiColors::Blue,
            Self::Magenta => AnsiColors::Magenta,
            Self::Cyan => AnsiColors::Cyan,
            Self::White => AnsiColors::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = TermuiError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| {
                TermuiError::invalid_argument("color", s, Self::ALL.iter().map(Color::as_str))
            })
    }
}

/// Raw SGR parameter for one color slot, rendered by owo-colors.
struct AnsiCode {
    color: AnsiColors,
    background: bool,
}

impl AnsiCode {
    fn fg(color: Color) -> Self {
        Self { color: color.ansi(), background: false }
    }

    fn bg(color: Color) -> Self {
        Self { color: color.ansi(), background: true }
    }
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.background {
            self.color.fmt_raw_ansi_bg(f)
        } else {
            self.color.fmt_raw_ansi_fg(f)
        }
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// A set of text attributes applied by [`style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    dim: bool,
    underline: bool,
    blink: bool,
    reverse: bool,
    reset: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
            underline: false,
            blink: false,
            reverse: false,
            reset: true,
        }
    }
}

impl Style {
    /// An empty style that still appends a reset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Sets the foreground from a color name.
    ///
    /// # Errors
    ///
    /// Returns [`TermuiError::InvalidArgument`] for unknown names.
    pub fn fg_named(self, name: &str) -> Result<Self> {
        Ok(self.fg(name.parse()?))
    }

    /// Sets the background from a color name.
    ///
    /// # Errors
    ///
    /// Returns [`TermuiError::InvalidArgument`] for unknown names.
    pub fn bg_named(self, name: &str) -> Result<Self> {
        Ok(self.bg(name.parse()?))
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn blink(mut self) -> Self {
        self.blink = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Controls whether `ESC[0m` is appended after the text.
    pub fn reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Returns `true` if no attribute is set.
    pub fn is_plain(&self) -> bool {
        self.fg.is_none()
            && self.bg.is_none()
            && !(self.bold || self.dim || self.underline || self.blink || self.reverse)
    }

    /// The SGR parameters in emission order: colors first, then effects.
    fn codes(&self) -> Vec<String> {
        let mut codes = Vec::new();
        if let Some(fg) = self.fg {
            codes.push(AnsiCode::fg(fg).to_string());
        }
        if let Some(bg) = self.bg {
            codes.push(AnsiCode::bg(bg).to_string());
        }
        let effects = [
            (self.bold, "1"),
            (self.dim, "2"),
            (self.underline, "4"),
            (self.blink, "5"),
            (self.reverse, "7"),
        ];
        codes.extend(
            effects
                .into_iter()
                .filter(|(on, _)| *on)
                .map(|(_, code)| code.to_string()),
        );
        codes
    }

    /// The opening escape sequence, or an empty string for a plain style.
    pub fn prefix(&self) -> String {
        if self.is_plain() {
            return String::new();
        }
        format!("\x1b[{}m", self.codes().join(";"))
    }

    /// Wraps `text` in this style's escape sequences.
    pub fn paint(&self, text: &str) -> String {
        let prefix = self.prefix();
        let mut out = String::with_capacity(prefix.len() + text.len() + RESET.len());
        out.push_str(&prefix);
        out.push_str(text);
        if self.reset {
            out.push_str(RESET);
        }
        out
    }
}

/// Styles `text`; equivalent to [`Style::paint`].
pub fn style(text: &str, style: Style) -> String {
    style.paint(text)
}

/// Removes every `ESC[...m` sequence from `text`.
pub fn unstyle(text: &str) -> Cow<'_, str> {
    SGR_SEQUENCE.replace_all(text, "")
}

/// Returns `true` if `text` contains at least one SGR sequence.
pub fn has_style(text: &str) -> bool {
    SGR_SEQUENCE.is_match(text)
}

// ---------------------------------------------------------------------------
// StyledText
// ---------------------------------------------------------------------------

/// A sequence of plain-text runs, each with its own style.
///
/// Stripping the encoded form yields the runs concatenated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    runs: Vec<(String, Style)>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run.
    pub fn push(mut self, text: impl Into<String>, style: Style) -> Self {
        self.runs.push((text.into(), style));
        self
    }

    pub fn runs(&self) -> &[(String, Style)] {
        &self.runs
    }

    /// Encodes every run with its escape sequences.
    pub fn encode(&self) -> String {
        self.runs.iter().map(|(text, style)| style.paint(text)).collect()
    }

    /// The runs without any styling.
    pub fn plain(&self) -> String {
        self.runs.iter().map(|(text, _)| text.as_str()).collect()
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
