//! Pager support.
//!
//! Pipes content through `$PAGER` (or a platform default such as `less`)
//! when both stdin and stdout are terminals. Otherwise the content is echoed
//! directly, with styling stripped unless the destination can show it.

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use termui_config::{ColorPolicy, TermuiConfig};
use tracing::{debug, info};

use crate::console::Console;
use crate::echo::EchoOptions;
use crate::error::{Result, TermuiError};
use crate::style::unstyle;

#[cfg(windows)]
const DEFAULT_PAGERS: &[&str] = &["more"];
#[cfg(not(windows))]
const DEFAULT_PAGERS: &[&str] = &["less", "more"];

/// A resolved pager command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerCommand {
    program: String,
    args: Vec<String>,
    less_env: Option<String>,
    renders_color: bool,
}

impl PagerCommand {
    /// Splits a command line on whitespace. `less_flags` is the current
    /// `LESS` value, consulted when the program is `less`.
    ///
    /// Returns `None` for a blank command.
    pub fn parse(command: &str, less_flags: Option<&str>) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        let args: Vec<String> = parts.collect();

        let name = Path::new(&program)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&program)
            .to_string();

        let (less_env, renders_color) = if name == "less" {
            let mut flags = less_flags.unwrap_or_default().to_string();
            flags.push_str(&args.concat());
            if flags.trim().is_empty() {
                (Some("-R".to_string()), true)
            } else {
                (None, flags.contains(['r', 'R']))
            }
        } else {
            (None, false)
        };

        Some(Self {
            program,
            args,
            less_env,
            renders_color,
        })
    }

    /// Picks the pager for `config`, or `None` when paging is unavailable.
    ///
    /// Order: disabled by `no_pager`; explicit `PAGER`; none on dumb
    /// terminals; otherwise the first platform default found on `PATH`.
    pub fn resolve(config: &TermuiConfig) -> Option<Self> {
        if config.no_pager {
            debug!("pager disabled by configuration");
            return None;
        }
        if let Some(command) = config.pager_command() {
            return Self::parse(command, config.less_flags());
        }
        if config.is_dumb_terminal() {
            debug!(term = ?config.term, "terminal cannot host a pager");
            return None;
        }
        DEFAULT_PAGERS
            .iter()
            .find(|name| find_on_path(name))
            .and_then(|name| Self::parse(name, config.less_flags()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns `true` if the pager is known to interpret ANSI styling.
    pub fn renders_color(&self) -> bool {
        self.renders_color
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
        if let Some(less) = &self.less_env {
            cmd.env("LESS", less);
        }
        cmd
    }
}

/// Returns `true` if an executable called `name` is on `PATH`.
fn find_on_path(name: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(name);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}

impl Console {
    /// Shows `text` through the pager.
    pub fn echo_via_pager(&mut self, text: &str) -> Result<()> {
        self.echo_via_pager_iter(std::iter::once(text), ColorPolicy::Auto)
    }

    /// Streams `chunks` through the pager without collecting them.
    ///
    /// Falls back to echoing when stdin or stdout is not a terminal, when no
    /// pager resolves, or when the pager fails to start. A newline follows
    /// the content. The pager quitting early is not an error.
    ///
    /// `Auto` keeps styling only for pagers that render it; `Always` and
    /// `Never` apply as given.
    pub fn echo_via_pager_iter<I, S>(&mut self, chunks: I, color: ColorPolicy) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let router = self.router();
        let interactive = router.input_is_tty() && router.resolve(false).is_tty;
        if !interactive {
            debug!("not a terminal, echoing instead of paging");
            return self.echo_chunks(chunks, color);
        }
        let config = self.current_config()?;
        let Some(pager) = PagerCommand::resolve(&config) else {
            return self.echo_chunks(chunks, color);
        };

        info!(program = pager.program(), args = ?pager.args(), "spawning pager");
        let mut child = match pager.command().spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(error = %e, program = pager.program(), "pager failed to start");
                return self.echo_chunks(chunks, color);
            }
        };

        let emit_color = match color {
            ColorPolicy::Auto => pager.renders_color(),
            explicit => explicit.resolve(false),
        };
        let written = match child.stdin.take() {
            Some(mut stdin) => pipe_chunks(&mut stdin, chunks, emit_color),
            None => Ok(()),
        };
        // stdin is closed by now, so the pager sees EOF.
        let status = child.wait()?;
        debug!(%status, "pager exited");

        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other.map_err(TermuiError::from),
        }
    }

    fn echo_chunks<I, S>(&mut self, chunks: I, color: ColorPolicy) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let opts = EchoOptions::new().nl(false).color(color);
        for chunk in chunks {
            self.echo_with(chunk.as_ref(), opts)?;
        }
        self.echo_with("", EchoOptions::new().color(color))
    }
}

fn pipe_chunks<W, I, S>(pipe: &mut W, chunks: I, emit_color: bool) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for chunk in chunks {
        let chunk = chunk.as_ref();
        if emit_color {
            pipe.write_all(chunk.as_bytes())?;
        } else {
            pipe.write_all(unstyle(chunk).as_bytes())?;
        }
    }
    pipe.write_all(b"\n")?;
    pipe.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Stream;
    use crate::testing::Harness;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    fn config_with_pager(pager: &str) -> TermuiConfig {
        TermuiConfig {
            pager: Some(pager.to_string()),
            ..TermuiConfig::default()
        }
    }

    #[test]
    fn parse_splits_arguments() {
        let cmd = PagerCommand::parse("most -s  -w", None).unwrap();
        assert_eq!(cmd.program(), "most");
        assert_eq!(cmd.args(), ["-s".to_string(), "-w".to_string()]);
        assert!(!cmd.renders_color());
        assert_eq!(PagerCommand::parse("   ", None), None);
    }

    #[test]
    fn bare_less_gets_raw_control_flag() {
        let cmd = PagerCommand::parse("/usr/bin/less", None).unwrap();
        assert!(cmd.renders_color());
        assert_eq!(cmd.less_env.as_deref(), Some("-R"));
    }

    #[test]
    fn less_color_follows_flags() {
        let with_r = PagerCommand::parse("less", Some("-FRX")).unwrap();
        assert!(with_r.renders_color());
        assert_eq!(with_r.less_env, None);

        let without = PagerCommand::parse("less -S", None).unwrap();
        assert!(!without.renders_color());

        let arg_r = PagerCommand::parse("less -r", None).unwrap();
        assert!(arg_r.renders_color());
    }

    #[test]
    fn resolve_respects_config() {
        let explicit = PagerCommand::resolve(&config_with_pager("cat")).unwrap();
        assert_eq!(explicit.program(), "cat");

        let disabled = TermuiConfig {
            no_pager: true,
            ..config_with_pager("cat")
        };
        assert_eq!(PagerCommand::resolve(&disabled), None);

        let dumb = TermuiConfig {
            term: Some("dumb".to_string()),
            ..TermuiConfig::default()
        };
        assert_eq!(PagerCommand::resolve(&dumb), None);
    }

    #[test]
    fn non_terminal_falls_back_to_echo() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("paged");
        let harness = Harness::new().config(config_with_pager(&format!("tee {}", marker.display())));

        harness
            .console()
            .echo_via_pager("\x1b[31mhaha\x1b[0m")
            .unwrap();
        assert_eq!(harness.stdout(), "haha\n");
        assert!(!marker.exists(), "pager must not run without a terminal");
    }

    #[test]
    fn stdin_must_be_a_terminal_too() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("paged");
        let harness = Harness::new().config(config_with_pager(&format!("tee {}", marker.display())));
        harness.set_interactive(Stream::Stdout, true);

        harness.console().echo_via_pager("haha").unwrap();
        assert_eq!(harness.stdout(), "haha\n");
        assert!(!marker.exists());
    }

    #[test]
    fn fallback_streams_chunks() {
        let harness = Harness::new();
        let lines = (1..=3).map(|i| format!("line {i}\n"));
        harness
            .console()
            .echo_via_pager_iter(lines, ColorPolicy::Auto)
            .unwrap();
        assert_eq!(harness.stdout(), "line 1\nline 2\nline 3\n\n");
    }

    #[test]
    fn disabled_pager_echoes_on_terminal() {
        let harness = Harness::new().interactive(true).config(TermuiConfig {
            no_pager: true,
            ..TermuiConfig::default()
        });
        harness.console().echo_via_pager("haha").unwrap();
        assert_eq!(harness.stdout(), "haha\n");
    }

    #[cfg(unix)]
    #[test]
    fn terminal_pipes_through_pager() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("paged");
        let harness = Harness::new()
            .interactive(true)
            .config(config_with_pager(&format!("tee {}", out.display())));

        let chunks = ["ha", "\x1b[1mha\x1b[0m"];
        harness
            .console()
            .echo_via_pager_iter(chunks, ColorPolicy::Auto)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "haha\n");
        assert_eq!(harness.stdout(), "", "pager output bypasses captured stdout");
    }

    #[cfg(unix)]
    #[test]
    fn forced_color_reaches_pager() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("paged");
        let harness = Harness::new()
            .interactive(true)
            .config(config_with_pager(&format!("tee {}", out.display())));

        harness
            .console()
            .echo_via_pager_iter(["\x1b[1mx\x1b[0m"], ColorPolicy::Always)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "\x1b[1mx\x1b[0m\n");
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_is_swallowed() {
        let harness = Harness::new().interactive(true).config(config_with_pager("true"));
        let chunks = std::iter::repeat("x".repeat(64 * 1024)).take(64);
        harness
            .console()
            .echo_via_pager_iter(chunks, ColorPolicy::Never)
            .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn environment_is_read_when_paging() {
        Jail::expect_with(|jail| {
            let harness = Harness::new().interactive(true);
            let mut console = harness.console();
            console.config = None;

            jail.set_env("PAGER", "true");
            console.echo_via_pager("haha").map_err(|e| e.to_string())?;
            assert_eq!(harness.stdout(), "");

            jail.set_env("TERMUI_COLOR", "rainbow");
            let err = console.echo_via_pager("haha").unwrap_err();
            assert!(matches!(err, TermuiError::Config(_)), "{err}");
            Ok(())
        });
    }

    #[test]
    fn non_terminal_never_reads_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("TERMUI_COLOR", "rainbow");
            let harness = Harness::new();
            let mut console = harness.console();
            console.config = None;
            console.echo_via_pager("haha").map_err(|e| e.to_string())?;
            assert_eq!(harness.stdout(), "haha\n");
            Ok(())
        });
    }

    #[test]
    fn missing_program_falls_back() {
        let harness = Harness::new()
            .interactive(true)
            .config(config_with_pager("definitely-not-a-real-pager-7f3a"));
        harness.console().echo_via_pager("haha").unwrap();
        assert_eq!(harness.stdout(), "haha\n");
    }

    #[test]
    fn pipe_chunks_strips_unless_color() {
        let mut buf = Vec::new();
        pipe_chunks(&mut buf, ["\x1b[31mx\x1b[0m"], false).unwrap();
        assert_eq!(buf, b"x\n");

        let mut buf = Vec::new();
        pipe_chunks(&mut buf, ["\x1b[31mx\x1b[0m"], true).unwrap();
        assert_eq!(buf, b"\x1b[31mx\x1b[0m\n");
    }
}
