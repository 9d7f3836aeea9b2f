//! In-memory capabilities for exercising a [`Console`] without a terminal.
//!
//! A [`Harness`] scripts stdin and key presses, captures stdout and stderr,
//! and lets each standard stream claim to be a terminal or not. Visible
//! input is echoed into captured stdout, so a transcript reads the way it
//! would on screen:
//!
//! ```
//! use termui::testing::Harness;
//!
//! let harness = Harness::new().input("y\n");
//! let answer = harness.console().confirm("Foo", false).unwrap();
//! assert!(answer);
//! assert_eq!(harness.stdout(), "Foo [y/N]: y\n");
//! ```
//!
//! A `\x03` byte in scripted input or keys stands for Ctrl-C and surfaces as
//! an interrupt.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use termui_config::TermuiConfig;

use crate::console::{Console, Streams};
use crate::input::KeyReader;
use crate::terminal::{OutputTarget, Stream, Terminal};

#[derive(Debug, Default)]
struct State {
    input: VecDeque<u8>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    stdin_tty: bool,
    stdout_tty: bool,
    stderr_tty: bool,
    keys: VecDeque<char>,
    keys_read: usize,
    echo_input: bool,
    last_target: OutputTarget,
    stdout_unflushed: usize,
    stderr_unflushed: usize,
    stdout_flushes: usize,
    stderr_flushes: usize,
    unflushed_reads: usize,
}

impl State {
    fn buffer(&mut self, target: OutputTarget) -> &mut Vec<u8> {
        match target {
            OutputTarget::Stdout => &mut self.stdout,
            OutputTarget::Stderr => &mut self.stderr,
        }
    }

    /// Counts a blocking read that starts while output is still buffered.
    fn note_read(&mut self) {
        if self.stdout_unflushed + self.stderr_unflushed > 0 {
            self.unflushed_reads += 1;
        }
    }
}

const CTRL_C: char = '\x03';

fn interrupted() -> io::Error {
    io::Error::new(io::ErrorKind::Interrupted, "interrupted")
}

/// Scripted standard streams shared by every console it hands out.
#[derive(Debug, Clone)]
pub struct Harness {
    state: Rc<RefCell<State>>,
    config: TermuiConfig,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// No input, nothing interactive, visible input echoed.
    pub fn new() -> Self {
        let state = State {
            echo_input: true,
            ..State::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            config: TermuiConfig::default(),
        }
    }

    /// Appends `text` to the scripted stdin.
    pub fn input(self, text: &str) -> Self {
        self.state.borrow_mut().input.extend(text.bytes());
        self
    }

    /// Marks all three streams as terminals (or not).
    pub fn interactive(self, interactive: bool) -> Self {
        for stream in [Stream::Stdin, Stream::Stdout, Stream::Stderr] {
            self.set_interactive(stream, interactive);
        }
        self
    }

    /// Changes one stream's terminal status; takes effect on the next call.
    pub fn set_interactive(&self, stream: Stream, interactive: bool) {
        let mut state = self.state.borrow_mut();
        match stream {
            Stream::Stdin => state.stdin_tty = interactive,
            Stream::Stdout => state.stdout_tty = interactive,
            Stream::Stderr => state.stderr_tty = interactive,
        }
    }

    /// Controls whether visible input is copied into the captured stream the
    /// prompt last wrote to.
    pub fn echo_input(self, echo: bool) -> Self {
        self.state.borrow_mut().echo_input = echo;
        self
    }

    /// Queues key presses for [`Console::pause`] and [`Console::getchar`].
    pub fn keys(self, keys: &str) -> Self {
        self.state.borrow_mut().keys.extend(keys.chars());
        self
    }

    /// Config handed to consoles created afterwards.
    pub fn config(mut self, config: TermuiConfig) -> Self {
        self.config = config;
        self
    }

    /// A console wired to this harness.
    pub fn console(&self) -> Console {
        Console::new(
            Box::new(HarnessTerminal(Rc::clone(&self.state))),
            Box::new(HarnessStreams(Rc::clone(&self.state))),
            Box::new(HarnessKeys(Rc::clone(&self.state))),
            self.config.clone(),
        )
    }

    /// Captured stdout, lossily decoded.
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.state.borrow().stdout).into_owned()
    }

    /// Captured stderr, lossily decoded.
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.state.borrow().stderr).into_owned()
    }

    /// Captured stdout, raw.
    pub fn stdout_bytes(&self) -> Vec<u8> {
        self.state.borrow().stdout.clone()
    }

    /// Returns and clears `(stdout, stderr)`.
    pub fn read_output(&self) -> (String, String) {
        let mut state = self.state.borrow_mut();
        let out = String::from_utf8_lossy(&std::mem::take(&mut state.stdout)).into_owned();
        let err = String::from_utf8_lossy(&std::mem::take(&mut state.stderr)).into_owned();
        (out, err)
    }

    /// Number of key presses consumed so far.
    pub fn keys_read(&self) -> usize {
        self.state.borrow().keys_read
    }

    /// Number of times `target` was flushed.
    pub fn flushes(&self, target: OutputTarget) -> usize {
        let state = self.state.borrow();
        match target {
            OutputTarget::Stdout => state.stdout_flushes,
            OutputTarget::Stderr => state.stderr_flushes,
        }
    }

    /// Number of line or key reads that began with unflushed output pending.
    pub fn unflushed_reads(&self) -> usize {
        self.state.borrow().unflushed_reads
    }
}

struct HarnessTerminal(Rc<RefCell<State>>);

impl Terminal for HarnessTerminal {
    fn is_interactive(&self, stream: Stream) -> bool {
        let state = self.0.borrow();
        match stream {
            Stream::Stdin => state.stdin_tty,
            Stream::Stdout => state.stdout_tty,
            Stream::Stderr => state.stderr_tty,
        }
    }
}

struct HarnessStreams(Rc<RefCell<State>>);

impl Streams for HarnessStreams {
    fn write_all(&mut self, target: OutputTarget, buf: &[u8]) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        state.buffer(target).extend_from_slice(buf);
        match target {
            OutputTarget::Stdout => state.stdout_unflushed += buf.len(),
            OutputTarget::Stderr => state.stderr_unflushed += buf.len(),
        }
        state.last_target = target;
        Ok(())
    }

    fn flush(&mut self, target: OutputTarget) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        match target {
            OutputTarget::Stdout => {
                state.stdout_unflushed = 0;
                state.stdout_flushes += 1;
            }
            OutputTarget::Stderr => {
                state.stderr_unflushed = 0;
                state.stderr_flushes += 1;
            }
        }
        Ok(())
    }

    fn read_line(&mut self, hidden: bool) -> io::Result<Option<String>> {
        let mut state = self.0.borrow_mut();
        state.note_read();
        if state.input.is_empty() {
            return Ok(None);
        }

        let mut raw = Vec::new();
        while let Some(byte) = state.input.pop_front() {
            if byte == b'\n' {
                break;
            }
            raw.push(byte);
        }
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        if raw.contains(&(CTRL_C as u8)) {
            return Err(interrupted());
        }
        let line = String::from_utf8_lossy(&raw).into_owned();

        if state.echo_input && !hidden {
            let target = state.last_target;
            let echoed = state.buffer(target);
            echoed.extend_from_slice(line.as_bytes());
            echoed.push(b'\n');
        }
        Ok(Some(line))
    }
}

struct HarnessKeys(Rc<RefCell<State>>);

impl KeyReader for HarnessKeys {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        let mut state = self.0.borrow_mut();
        state.note_read();
        match state.keys.pop_front() {
            Some(key) => {
                state.keys_read += 1;
                if key == CTRL_C {
                    return Err(interrupted());
                }
                Ok(Some(key))
            }
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left")),
        }
    }
}
