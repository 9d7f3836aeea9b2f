//! Terminal input capabilities: line reading, hidden input and single
//! keypresses.
//!
//! The OS-backed readers switch the terminal into raw mode through
//! crossterm; [`RawModeGuard`] restores cooked mode on every exit path.

use std::io::{self, BufRead};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;

/// Blocks until the user presses a single key.
pub trait KeyReader {
    /// Returns the character for the key, or `None` for keys without one
    /// (arrows, function keys).
    fn read_key(&mut self) -> io::Result<Option<char>>;
}

/// [`KeyReader`] reading from the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeyReader;

impl KeyReader for OsKeyReader {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Some(key) = next_key_press()? {
                return key_input(&key);
            }
        }
    }
}

/// Keeps the terminal in raw mode while alive.
pub(crate) struct RawModeGuard;

impl RawModeGuard {
    pub(crate) fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn next_key_press() -> io::Result<Option<KeyEvent>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Raw mode delivers Ctrl-C and Ctrl-D as keys rather than a signal and
/// end of input; they surface as `Interrupted` and `UnexpectedEof`.
fn key_input(key: &KeyEvent) -> io::Result<Option<char>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            KeyCode::Char('d') => {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                return Ok(Some(char::from(c.to_ascii_lowercase() as u8 & 0x1f)));
            }
            _ => {}
        }
    }
    Ok(key_char(key))
}

fn key_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Tab => Some('\t'),
        KeyCode::Backspace => Some('\x08'),
        KeyCode::Esc => Some('\x1b'),
        _ => None,
    }
}

/// Reads one line from stdin without the trailing line terminator.
///
/// Returns `Ok(None)` at end of input.
pub(crate) fn read_visible_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(trim_line_ending(line)))
}

/// Reads one line without echoing it.
///
/// Falls back to a plain read when stdin is not a terminal, since nothing
/// is echoed then anyway. Ctrl-C yields [`io::ErrorKind::Interrupted`];
/// Ctrl-D on an empty line is end of input.
pub(crate) fn read_hidden_line() -> io::Result<Option<String>> {
    if !io::stdin().is_tty() {
        return read_visible_line();
    }

    let _raw = RawModeGuard::enable()?;
    let mut line = String::new();
    loop {
        let Some(key) = next_key_press()? else {
            continue;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return Ok(Some(line)),
            KeyCode::Char('c') if ctrl => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            KeyCode::Char('d') if ctrl && line.is_empty() => return Ok(None),
            KeyCode::Char('u') if ctrl => line.clear(),
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char(c) if !ctrl => line.push(c),
            _ => {}
        }
    }
}

pub(crate) fn trim_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
