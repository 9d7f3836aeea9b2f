//! Clap CLI definitions for the `termui` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use termui::{Color, Style};
use termui_config::ColorPolicy;

/// termui -- styled output, prompts and paging for shell scripts.
#[derive(Parser, Debug)]
#[command(
    name = "termui",
    about = "Styled output, prompts and paging for shell scripts",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// When to emit ANSI styling: always, never or auto (default: $TERMUI_COLOR, auto).
    #[arg(long, global = true, value_parser = parse_color_policy)]
    pub color: Option<ColorPolicy>,

    /// Write to standard error instead of standard output.
    #[arg(long, global = true)]
    pub err: bool,

    /// Enable debug logging on standard error.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// All subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print text, optionally styled.
    Echo(EchoArgs),

    /// Print the raw escape sequences for styled text, regardless of terminal.
    Style(StyleArgs),

    /// Strip ANSI styling from text (or from stdin when no text is given).
    Unstyle(UnstyleArgs),

    /// Ask for a value and print it.
    Prompt(PromptArgs),

    /// Ask a yes/no question; exits 0 for yes and 1 for no.
    Confirm(ConfirmArgs),

    /// Show a file through the pager; piped stdin is echoed instead, since
    /// paging needs stdin to be a terminal.
    Page(PageArgs),

    /// Wait for a single keypress.
    Pause(PauseArgs),
}

/// Text attributes shared by `echo` and `style`.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleFlags {
    /// Foreground color (black, red, green, yellow, blue, magenta, cyan, white).
    #[arg(long, value_parser = parse_color)]
    pub fg: Option<Color>,

    /// Background color.
    #[arg(long, value_parser = parse_color)]
    pub bg: Option<Color>,

    #[arg(long)]
    pub bold: bool,

    #[arg(long)]
    pub dim: bool,

    #[arg(long)]
    pub underline: bool,

    #[arg(long)]
    pub blink: bool,

    #[arg(long)]
    pub reverse: bool,

    /// Do not append the reset sequence.
    #[arg(long)]
    pub no_reset: bool,
}

impl StyleFlags {
    /// Builds the style these flags describe.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new().reset(!self.no_reset);
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dim();
        }
        if self.underline {
            style = style.underline();
        }
        if self.blink {
            style = style.blink();
        }
        if self.reverse {
            style = style.reverse();
        }
        style
    }

    /// Returns `true` if any attribute was requested.
    pub fn any(&self) -> bool {
        !self.to_style().is_plain()
    }
}

#[derive(Args, Debug)]
pub struct EchoArgs {
    /// Words to print, joined by spaces.
    pub text: Vec<String>,

    /// Do not print the trailing newline.
    #[arg(short = 'n', long)]
    pub no_newline: bool,

    #[command(flatten)]
    pub style: StyleFlags,
}

#[derive(Args, Debug)]
pub struct StyleArgs {
    /// Text to style.
    pub text: String,

    #[command(flatten)]
    pub style: StyleFlags,
}

#[derive(Args, Debug)]
pub struct UnstyleArgs {
    /// Text to strip; reads stdin when omitted.
    pub text: Option<String>,
}

/// Value types `prompt` can enforce.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueType {
    #[default]
    Text,
    Int,
    Float,
}

#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Message shown before the input.
    pub message: String,

    /// Value used for an empty answer.
    #[arg(long)]
    pub default: Option<String>,

    /// Do not echo typed characters.
    #[arg(long)]
    pub hide_input: bool,

    /// Ask twice and require matching answers.
    #[arg(long)]
    pub confirmation: bool,

    /// Required value type.
    #[arg(long = "type", value_enum, default_value_t = ValueType::Text)]
    pub value_type: ValueType,

    /// Message printed for input of the wrong type.
    #[arg(long)]
    pub error_message: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Question to ask.
    pub message: String,

    /// Treat an empty answer as yes.
    #[arg(long)]
    pub default_yes: bool,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// File to show. When omitted, stdin is read and echoed without a pager.
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PauseArgs {
    /// Message shown while waiting.
    #[arg(default_value = termui::pause::DEFAULT_PAUSE_MESSAGE)]
    pub message: String,
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse().map_err(|e: termui::TermuiError| e.to_string())
}

fn parse_color_policy(s: &str) -> Result<ColorPolicy, String> {
    s.parse().map_err(|e: termui_config::ConfigError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn style_flags_build_style() {
        let cli = Cli::parse_from(["termui", "style", "x", "--fg", "red", "--bold"]);
        let Some(Commands::Style(args)) = cli.command else {
            panic!("expected style subcommand");
        };
        assert_eq!(args.style.to_style(), Style::new().fg(Color::Red).bold());
        assert!(args.style.any());
    }

    #[test]
    fn unknown_color_is_rejected() {
        let err = Cli::try_parse_from(["termui", "echo", "--fg", "purple", "x"]).unwrap_err();
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn page_help_describes_stdin_fallback() {
        let cmd = Cli::command();
        let page = cmd.find_subcommand("page").unwrap();
        let about = page.get_about().unwrap().to_string();
        assert!(about.contains("piped stdin is echoed"), "{about}");

        let file = page.get_arguments().find(|a| a.get_id() == "file").unwrap();
        let help = file.get_help().unwrap().to_string();
        assert!(help.contains("without a pager"), "{help}");
    }

    #[test]
    fn global_color_flag() {
        let cli = Cli::parse_from(["termui", "--color", "never", "echo", "x"]);
        assert_eq!(cli.global.color, Some(ColorPolicy::Never));
    }
}
