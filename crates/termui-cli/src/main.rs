//! `termui` -- styled output, prompts and paging for shell scripts.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use termui::TermuiError;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Exit status after an interrupt, matching shell convention for SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    // First Ctrl+C: exit like an aborted prompt. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        eprintln!();
        eprintln!("Aborted!");
        std::process::exit(i32::from(EXIT_INTERRUPTED));
    });

    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("termui=debug,termui_cli=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Some(Commands::Echo(args)) => commands::output::run_echo(&ctx, &args),
        Some(Commands::Style(args)) => commands::output::run_style(&ctx, &args),
        Some(Commands::Unstyle(args)) => commands::output::run_unstyle(&ctx, &args),
        Some(Commands::Prompt(args)) => commands::prompt::run_prompt(&ctx, &args),
        Some(Commands::Confirm(args)) => match commands::prompt::run_confirm(&ctx, &args) {
            Ok(true) => Ok(()),
            Ok(false) => return ExitCode::FAILURE,
            Err(e) => Err(e),
        },
        Some(Commands::Page(args)) => commands::page::run(&ctx, &args),
        Some(Commands::Pause(args)) => commands::pause::run(&ctx, &args),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_failure(&e)),
    }
}

/// Reports a failed command on stderr and returns the exit status.
fn report_failure(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<TermuiError>() {
        Some(err) if err.is_abort() => {
            eprintln!();
            eprintln!("Aborted!");
            1
        }
        // Ctrl-C read as a key in raw mode; exit as the signal handler does.
        Some(err) if err.is_interrupted() => {
            eprintln!();
            eprintln!("Aborted!");
            EXIT_INTERRUPTED
        }
        // Reader went away (e.g. piped to `head`); nothing left to report.
        Some(err) if err.is_broken_pipe() => 0,
        _ => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_statuses() {
        assert_eq!(report_failure(&TermuiError::Abort.into()), 1);
        assert_eq!(report_failure(&TermuiError::Interrupted.into()), EXIT_INTERRUPTED);
        let pipe = std::io::Error::from(std::io::ErrorKind::BrokenPipe);
        assert_eq!(report_failure(&TermuiError::from(pipe).into()), 0);
        assert_eq!(report_failure(&anyhow::anyhow!("boom")), 1);
    }

    #[test]
    fn interrupt_survives_context() {
        let err = anyhow::Error::from(TermuiError::Interrupted).context("reading answer");
        assert_eq!(report_failure(&err), EXIT_INTERRUPTED);
    }
}
