//! Writing content to stdout or stderr.
//!
//! Text is stripped of ANSI styling when the color decision is "off"; raw
//! bytes always pass through untouched. Every write is flushed.

use std::borrow::Cow;
use std::fmt;

use termui_config::ColorPolicy;

use crate::console::Console;
use crate::error::Result;
use crate::style::{unstyle, Style};

/// Something [`Console::echo`] can write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    /// Text, subject to color stripping.
    Text(Cow<'a, str>),
    /// Raw bytes, written exactly as given.
    Bytes(Cow<'a, [u8]>),
}

impl Content<'static> {
    /// Stringifies any displayable value.
    pub fn display(value: &impl fmt::Display) -> Self {
        Self::Text(Cow::Owned(value.to_string()))
    }
}

impl Content<'_> {
    /// Renders the bytes to write, honoring the newline and color decisions.
    pub fn render(&self, nl: bool, emit_color: bool) -> Vec<u8> {
        let mut out = match self {
            Self::Text(text) if emit_color => text.as_bytes().to_vec(),
            Self::Text(text) => unstyle(text).as_bytes().to_vec(),
            Self::Bytes(bytes) => bytes.to_vec(),
        };
        if nl {
            out.push(b'\n');
        }
        out
    }
}

impl<'a> From<&'a str> for Content<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Content<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for Content<'static> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl<'a> From<Cow<'a, str>> for Content<'a> {
    fn from(text: Cow<'a, str>) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Content<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Content<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<Vec<u8>> for Content<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(bytes))
    }
}

macro_rules! content_from_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Content<'static> {
                fn from(value: $ty) -> Self {
                    Self::display(&value)
                }
            }
        )+
    };
}

content_from_display!(char, bool, i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64);

/// How [`Console::echo_with`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoOptions {
    /// Append a newline.
    pub nl: bool,
    /// Write to stderr instead of stdout.
    pub err: bool,
    /// Whether styling survives the write.
    pub color: ColorPolicy,
}

impl Default for EchoOptions {
    fn default() -> Self {
        Self {
            nl: true,
            err: false,
            color: ColorPolicy::Auto,
        }
    }
}

impl EchoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nl(mut self, nl: bool) -> Self {
        self.nl = nl;
        self
    }

    pub fn err(mut self, err: bool) -> Self {
        self.err = err;
        self
    }

    pub fn color(mut self, color: ColorPolicy) -> Self {
        self.color = color;
        self
    }
}

impl Console {
    /// Writes `message` and a newline to stdout.
    pub fn echo<'a>(&mut self, message: impl Into<Content<'a>>) -> Result<()> {
        self.echo_with(message, EchoOptions::default())
    }

    /// Writes `message` according to `opts`, then flushes the stream.
    pub fn echo_with<'a>(&mut self, message: impl Into<Content<'a>>, opts: EchoOptions) -> Result<()> {
        let route = self.router().resolve(opts.err);
        let bytes = message.into().render(opts.nl, route.emit_color(opts.color));
        self.write_flush(route.target, &bytes)
    }

    /// Styles `text` and echoes it.
    pub fn secho(&mut self, text: &str, style: Style, opts: EchoOptions) -> Result<()> {
        self.echo_with(style.paint(text), opts)
    }
}
