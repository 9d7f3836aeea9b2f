//! Terminal interaction helpers: styled output, prompts, yes/no
//! confirmation, paging and keypress pauses.
//!
//! Every operation lives on [`Console`], which owns the capabilities it
//! needs (terminal detection, the standard streams, a key reader). The free
//! functions below build a fresh [`Console::system`] per call, so stream
//! redirections and environment changes between calls are always seen.
//! Only the pager reads the environment.
//!
//! ```no_run
//! use termui::{confirm, echo, style, Color, Style};
//!
//! echo(style("done", Style::new().fg(Color::Green).bold()))?;
//! if confirm("Delete everything?", false)? {
//!     echo("deleting")?;
//! }
//! # Ok::<(), termui::TermuiError>(())
//! ```

pub mod console;
pub mod echo;
pub mod error;
pub mod filename;
pub mod input;
pub mod pager;
pub mod pause;
pub mod prompt;
pub mod router;
pub mod style;
pub mod terminal;
pub mod testing;

pub use console::{Console, OsStreams, Streams};
pub use echo::{Content, EchoOptions};
pub use error::{Result, TermuiError};
pub use filename::format_filename;
pub use input::{KeyReader, OsKeyReader};
pub use pager::PagerCommand;
pub use prompt::{Confirm, Prompt};
pub use router::{should_emit_color, Route, StreamRouter};
pub use style::{style, unstyle, Color, Style, StyledText};
pub use terminal::{terminal_size, OsTerminal, OutputTarget, Stream, Terminal};
pub use termui_config::{ColorPolicy, TermuiConfig};

/// Writes `message` and a newline to stdout.
pub fn echo<'a>(message: impl Into<Content<'a>>) -> Result<()> {
    Console::system().echo(message)
}

/// Writes `message` according to `opts`.
pub fn echo_with<'a>(message: impl Into<Content<'a>>, opts: EchoOptions) -> Result<()> {
    Console::system().echo_with(message, opts)
}

/// Styles `text` and writes it according to `opts`.
pub fn secho(text: &str, style: Style, opts: EchoOptions) -> Result<()> {
    Console::system().secho(text, style, opts)
}

/// Runs `prompt` against the real terminal.
pub fn prompt<T>(prompt: &Prompt<T>) -> Result<T> {
    Console::system().prompt(prompt)
}

/// Asks a yes/no question on stdout.
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    Console::system().confirm(message, default)
}

/// Waits for a keypress after showing `message`.
pub fn pause(message: &str, err: bool) -> Result<()> {
    Console::system().pause_with(message, err)
}

/// Reads a single keypress.
pub fn getchar() -> Result<Option<char>> {
    Console::system().getchar()
}

/// Shows `text` through the configured pager.
pub fn echo_via_pager(text: &str) -> Result<()> {
    Console::system().echo_via_pager(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn output_does_not_depend_on_environment_settings() {
        Jail::expect_with(|jail| {
            jail.set_env("PAGER", "true");
            jail.set_env("LESS", "1");
            jail.set_env("TERMUI_COLOR", "rainbow");

            echo_with("", EchoOptions::new().nl(false)).map_err(|e| e.to_string())?;
            secho("", Style::new(), EchoOptions::new().nl(false).err(true))
                .map_err(|e| e.to_string())?;
            Ok(())
        });
    }
}
