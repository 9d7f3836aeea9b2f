//! Blocking prompts: free-form input with validation, and yes/no
//! confirmation.
//!
//! Both loop until the answer is acceptable. Invalid input prints an error
//! and asks again; end of input aborts with [`Abort`](crate::TermuiError::Abort).

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::console::Console;
use crate::echo::EchoOptions;
use crate::error::Result;

/// Printed when a converter rejects the input.
pub const DEFAULT_ERROR_MESSAGE: &str = "Error: invalid input";

/// Asked before the repeated entry of a confirmed prompt.
pub const CONFIRMATION_MESSAGE: &str = "Repeat for confirmation";

/// Printed when the repeated entry differs.
pub const MISMATCH_MESSAGE: &str = "Error: the two entered values do not match";

type Converter<T> = Box<dyn Fn(&str) -> std::result::Result<T, String>>;

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// A free-form prompt, built per call and consumed by [`Console::prompt`].
///
/// ```
/// use termui::prompt::Prompt;
/// use termui::testing::Harness;
///
/// let harness = Harness::new().input("abc\n12\n");
/// let port = harness
///     .console()
///     .prompt(&Prompt::new("Port").parse::<u16>())
///     .unwrap();
/// assert_eq!(port, 12);
/// ```
pub struct Prompt<T = String> {
    message: String,
    default: Option<String>,
    show_default: bool,
    hide_input: bool,
    confirmation: bool,
    err: bool,
    error_message: String,
    convert: Converter<T>,
}

impl Prompt<String> {
    /// A prompt returning the entered text unchanged.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: None,
            show_default: true,
            hide_input: false,
            confirmation: false,
            err: false,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            convert: Box::new(|s| Ok(s.to_string())),
        }
    }
}

impl<T> Prompt<T> {
    /// Value used when the user enters an empty line. It goes through the
    /// converter like typed input.
    pub fn default(mut self, value: impl fmt::Display) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Whether the default is shown as ` [value]` after the message.
    pub fn show_default(mut self, show: bool) -> Self {
        self.show_default = show;
        self
    }

    /// Read without echoing typed characters.
    pub fn hide_input(mut self, hide: bool) -> Self {
        self.hide_input = hide;
        self
    }

    /// Ask a second time and require both entries to match.
    pub fn confirmation(mut self, required: bool) -> Self {
        self.confirmation = required;
        self
    }

    /// Prompt on stderr instead of stdout.
    pub fn err(mut self, err: bool) -> Self {
        self.err = err;
        self
    }

    /// Message printed when the converter rejects input.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Replaces the converter. The old conversion is discarded.
    pub fn convert<U, E, F>(self, convert: F) -> Prompt<U>
    where
        F: Fn(&str) -> std::result::Result<U, E> + 'static,
        E: fmt::Display,
    {
        Prompt {
            message: self.message,
            default: self.default,
            show_default: self.show_default,
            hide_input: self.hide_input,
            confirmation: self.confirmation,
            err: self.err,
            error_message: self.error_message,
            convert: Box::new(move |s| convert(s).map_err(|e| e.to_string())),
        }
    }

    /// Parses the trimmed input with [`FromStr`].
    pub fn parse<U>(self) -> Prompt<U>
    where
        U: FromStr + 'static,
        U::Err: fmt::Display,
    {
        self.convert(|s: &str| s.trim().parse::<U>())
    }

    /// The text shown before the cursor, e.g. `Name [bob]: `.
    pub fn text(&self) -> String {
        match (&self.default, self.show_default) {
            (Some(default), true) => format!("{} [{}]: ", self.message, default),
            _ => format!("{}: ", self.message),
        }
    }

    fn options(&self) -> EchoOptions {
        EchoOptions::new().err(self.err)
    }
}

// ---------------------------------------------------------------------------
// Confirm
// ---------------------------------------------------------------------------

/// A yes/no question, consumed by [`Console::confirm_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    message: String,
    default: bool,
    err: bool,
}

impl Confirm {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: false,
            err: false,
        }
    }

    /// Answer for an empty line.
    pub fn default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// Prompt on stderr instead of stdout.
    pub fn err(mut self, err: bool) -> Self {
        self.err = err;
        self
    }

    /// The text shown before the cursor, e.g. `Continue [y/N]: `.
    pub fn text(&self) -> String {
        let choices = if self.default { "Y/n" } else { "y/N" };
        format!("{} [{}]: ", self.message, choices)
    }
}

/// Maps an answer to a decision; `None` for anything unrecognized.
fn parse_answer(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        "" => Some(default),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Console operations
// ---------------------------------------------------------------------------

impl Console {
    /// Runs `prompt` until it yields a converted value.
    ///
    /// # Errors
    ///
    /// [`Abort`](crate::TermuiError::Abort) when input ends first; I/O errors from the
    /// underlying streams.
    pub fn prompt<T>(&mut self, prompt: &Prompt<T>) -> Result<T> {
        let opts = prompt.options();
        let text = prompt.text();
        let repeat = format!("{CONFIRMATION_MESSAGE}: ");

        loop {
            let value = self.read_value(&text, prompt)?;
            let converted = match (prompt.convert)(&value) {
                Ok(converted) => converted,
                Err(reason) => {
                    debug!(%reason, "prompt input rejected");
                    self.echo_with(prompt.error_message.as_str(), opts)?;
                    continue;
                }
            };
            if !prompt.confirmation {
                return Ok(converted);
            }

            let again = self.read_value(&repeat, prompt)?;
            if again == value {
                return Ok(converted);
            }
            self.echo_with(MISMATCH_MESSAGE, opts)?;
        }
    }

    /// Shows `text` until a non-empty line (or the default) comes back.
    fn read_value<T>(&mut self, text: &str, prompt: &Prompt<T>) -> Result<String> {
        let opts = prompt.options().nl(false);
        loop {
            self.echo_with(text, opts)?;
            let line = self.read_answer(prompt.hide_input, prompt.err)?;
            if !line.is_empty() {
                return Ok(line);
            }
            if let Some(default) = &prompt.default {
                return Ok(default.clone());
            }
        }
    }

    /// Asks a yes/no question on stdout.
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        self.confirm_with(&Confirm::new(message).default(default))
    }

    /// Asks `confirm` until it gets `y`, `yes`, `n`, `no` or an empty line.
    ///
    /// # Errors
    ///
    /// [`Abort`](crate::TermuiError::Abort) when input ends first.
    pub fn confirm_with(&mut self, confirm: &Confirm) -> Result<bool> {
        let opts = EchoOptions::new().err(confirm.err);
        let text = confirm.text();
        loop {
            self.echo_with(text.as_str(), opts.nl(false))?;
            let answer = self.read_answer(false, confirm.err)?;
            match parse_answer(&answer, confirm.default) {
                Some(decision) => return Ok(decision),
                None => {
                    debug!(%answer, "unrecognized confirmation answer");
                    self.echo_with(DEFAULT_ERROR_MESSAGE, opts)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TermuiError;
    use crate::terminal::OutputTarget;
    use crate::testing::Harness;
    use pretty_assertions::assert_eq;

    fn confirm_transcript(default: bool, input: &str) -> (bool, String) {
        let harness = Harness::new().input(input);
        let answer = harness.console().confirm("Foo", default).unwrap();
        (answer, harness.stdout())
    }

    #[test]
    fn confirm_default_no() {
        assert_eq!(confirm_transcript(false, "y\n"), (true, "Foo [y/N]: y\n".to_string()));
        assert_eq!(confirm_transcript(false, "\n"), (false, "Foo [y/N]: \n".to_string()));
        assert_eq!(confirm_transcript(false, "n\n"), (false, "Foo [y/N]: n\n".to_string()));
    }

    #[test]
    fn confirm_default_yes() {
        assert_eq!(confirm_transcript(true, "y\n"), (true, "Foo [Y/n]: y\n".to_string()));
        assert_eq!(confirm_transcript(true, "\n"), (true, "Foo [Y/n]: \n".to_string()));
        assert_eq!(confirm_transcript(true, "n\n"), (false, "Foo [Y/n]: n\n".to_string()));
    }

    #[test]
    fn confirm_is_case_insensitive() {
        assert!(confirm_transcript(false, "YES\n").0);
        assert!(!confirm_transcript(true, "No\n").0);
    }

    #[test]
    fn confirm_reprompts_on_garbage() {
        let (answer, out) = confirm_transcript(false, "maybe\ny\n");
        assert!(answer);
        assert_eq!(out, "Foo [y/N]: maybe\nError: invalid input\nFoo [y/N]: y\n");
    }

    #[test]
    fn confirm_aborts_at_end_of_input() {
        let harness = Harness::new().input("what\n");
        let err = harness.console().confirm("Foo", true).unwrap_err();
        assert!(err.is_abort());
    }

    #[test]
    fn confirm_to_stderr() {
        let harness = Harness::new().input("y\n").echo_input(false);
        let answer = harness
            .console()
            .confirm_with(&Confirm::new("Prompt to stderr").err(true))
            .unwrap();
        assert!(answer);
        assert_eq!(
            harness.read_output(),
            (String::new(), "Prompt to stderr [y/N]: ".to_string())
        );
    }

    #[test]
    fn prompt_is_flushed_before_reading() {
        let harness = Harness::new().input("\nabc\n");
        let value = harness.console().prompt(&Prompt::new("Name").err(true)).unwrap();
        assert_eq!(value, "abc");
        assert_eq!(harness.unflushed_reads(), 0);
        assert_eq!(harness.flushes(OutputTarget::Stderr), 2);
        assert_eq!(harness.flushes(OutputTarget::Stdout), 0);
        assert_eq!(
            harness.read_output(),
            (String::new(), "Name: \nName: abc\n".to_string())
        );
    }

    #[test]
    fn confirm_is_flushed_before_reading() {
        let harness = Harness::new().input("y\n");
        assert!(harness.console().confirm("Foo", false).unwrap());
        assert_eq!(harness.unflushed_reads(), 0);
        assert_eq!(harness.flushes(OutputTarget::Stdout), 1);
    }

    #[test]
    fn ctrl_c_interrupts_prompt() {
        let harness = Harness::new().input("\x03\n");
        let err = harness
            .console()
            .prompt(&Prompt::new("Password").hide_input(true))
            .unwrap_err();
        assert!(err.is_interrupted());
        assert!(!err.is_abort());
        assert_eq!(harness.stdout(), "Password: \n");

        let harness = Harness::new().input("\x03\n");
        let err = harness.console().confirm("Foo", false).unwrap_err();
        assert!(err.is_interrupted());
    }

    #[test]
    fn prompt_returns_line() {
        let harness = Harness::new().input("asdlkj\n").echo_input(false);
        let value = harness.console().prompt(&Prompt::new("Prompt to stdin")).unwrap();
        assert_eq!(value, "asdlkj");
        assert_eq!(
            harness.read_output(),
            ("Prompt to stdin: ".to_string(), String::new())
        );
    }

    #[test]
    fn prompt_to_stderr() {
        let harness = Harness::new().input("asdlkj\n").echo_input(false);
        harness
            .console()
            .prompt(&Prompt::new("Prompt to stderr").err(true))
            .unwrap();
        assert_eq!(
            harness.read_output(),
            (String::new(), "Prompt to stderr: ".to_string())
        );
    }

    #[test]
    fn prompt_uses_default_on_empty_line() {
        let harness = Harness::new().input("\n");
        let value = harness
            .console()
            .prompt(&Prompt::new("Name").default("bob"))
            .unwrap();
        assert_eq!(value, "bob");
        assert_eq!(harness.stdout(), "Name [bob]: \n");
    }

    #[test]
    fn prompt_hides_default_when_asked() {
        let prompt = Prompt::new("Name").default("bob").show_default(false);
        assert_eq!(prompt.text(), "Name: ");
    }

    #[test]
    fn prompt_repeats_on_empty_without_default() {
        let harness = Harness::new().input("\n\nalice\n");
        let value = harness.console().prompt(&Prompt::new("Name")).unwrap();
        assert_eq!(value, "alice");
        assert_eq!(harness.stdout(), "Name: \nName: \nName: alice\n");
    }

    #[test]
    fn prompt_reprompts_on_conversion_failure() {
        let harness = Harness::new().input("abc\n42\n");
        let value = harness
            .console()
            .prompt(&Prompt::new("Number").parse::<i32>())
            .unwrap();
        assert_eq!(value, 42);
        assert_eq!(
            harness.stdout(),
            "Number: abc\nError: invalid input\nNumber: 42\n"
        );
    }

    #[test]
    fn prompt_custom_converter_and_message() {
        let harness = Harness::new().input("3\n12\n");
        let prompt = Prompt::new("Even")
            .error_message("Error: need an even number")
            .convert(|s| match s.parse::<u32>() {
                Ok(n) if n % 2 == 0 => Ok(n),
                _ => Err("odd"),
            });
        assert_eq!(harness.console().prompt(&prompt).unwrap(), 12);
        assert!(harness.stdout().contains("Error: need an even number\n"));
    }

    #[test]
    fn prompt_default_is_converted() {
        let harness = Harness::new().input("\n");
        let value = harness
            .console()
            .prompt(&Prompt::new("Count").default(7).parse::<u8>())
            .unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn prompt_aborts_at_end_of_input() {
        let harness = Harness::new().input("nope\n");
        let err = harness
            .console()
            .prompt(&Prompt::new("Number").parse::<i32>())
            .unwrap_err();
        assert!(matches!(err, TermuiError::Abort));
    }

    #[test]
    fn hidden_input_is_not_echoed() {
        let harness = Harness::new().input("secret\n");
        let value = harness
            .console()
            .prompt(&Prompt::new("Password").hide_input(true))
            .unwrap();
        assert_eq!(value, "secret");
        assert_eq!(harness.stdout(), "Password: \n");
    }

    #[test]
    fn confirmation_must_match() {
        let harness = Harness::new().input("one\ntwo\nthree\nthree\n").echo_input(false);
        let value = harness
            .console()
            .prompt(&Prompt::new("Password").hide_input(true).confirmation(true))
            .unwrap();
        assert_eq!(value, "three");
        assert_eq!(
            harness.stdout(),
            "Password: \nRepeat for confirmation: \n\
             Error: the two entered values do not match\n\
             Password: \nRepeat for confirmation: \n"
        );
    }

    #[test]
    fn parse_answer_table() {
        assert_eq!(parse_answer(" y ", false), Some(true));
        assert_eq!(parse_answer("no", true), Some(false));
        assert_eq!(parse_answer("", true), Some(true));
        assert_eq!(parse_answer("ja", true), None);
    }
}
