//! `termui echo`, `termui style` and `termui unstyle`.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use termui::{unstyle, ColorPolicy};

use crate::cli::{EchoArgs, StyleArgs, UnstyleArgs};
use crate::context::RuntimeContext;

/// Execute `termui echo`.
pub fn run_echo(ctx: &RuntimeContext, args: &EchoArgs) -> Result<()> {
    let text = args.text.join(" ");
    let opts = ctx.echo_options().nl(!args.no_newline);
    let mut console = ctx.console();
    if args.style.any() {
        console.secho(&text, args.style.to_style(), opts)?;
    } else {
        console.echo_with(text, opts)?;
    }
    Ok(())
}

/// Execute `termui style`: always emits the escape sequences.
pub fn run_style(ctx: &RuntimeContext, args: &StyleArgs) -> Result<()> {
    let styled = args.style.to_style().paint(&args.text);
    ctx.console()
        .echo_with(styled, ctx.echo_options().color(ColorPolicy::Always))?;
    Ok(())
}

/// Execute `termui unstyle`.
pub fn run_unstyle(ctx: &RuntimeContext, args: &UnstyleArgs) -> Result<()> {
    let mut console = ctx.console();
    let opts = ctx.echo_options();

    if let Some(text) = &args.text {
        console.echo_with(unstyle(text), opts)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read standard input")?;
        console.echo_with(unstyle(&line), opts)?;
    }
    Ok(())
}
