//! `termui prompt` and `termui confirm`.

use anyhow::Result;
use termui::{Confirm, Prompt};
use tracing::debug;

use crate::cli::{ConfirmArgs, PromptArgs, ValueType};
use crate::context::RuntimeContext;

/// Execute `termui prompt`: the answer goes to stdout, the prompt to the
/// stream selected by `--err`.
pub fn run_prompt(ctx: &RuntimeContext, args: &PromptArgs) -> Result<()> {
    let mut prompt = Prompt::new(&args.message)
        .hide_input(args.hide_input)
        .confirmation(args.confirmation)
        .err(ctx.err);
    if let Some(default) = &args.default {
        prompt = prompt.default(default);
    }
    if let Some(message) = &args.error_message {
        prompt = prompt.error_message(message);
    }

    let mut console = ctx.console();
    let value = match args.value_type {
        ValueType::Text => console.prompt(&prompt)?,
        ValueType::Int => console.prompt(&prompt.parse::<i64>())?.to_string(),
        ValueType::Float => console.prompt(&prompt.parse::<f64>())?.to_string(),
    };
    debug!(value_type = ?args.value_type, "prompt answered");

    console.echo(value)?;
    Ok(())
}

/// Execute `termui confirm`. Returns the answer so `main` can map it to the
/// exit status.
pub fn run_confirm(ctx: &RuntimeContext, args: &ConfirmArgs) -> Result<bool> {
    let confirm = Confirm::new(&args.message)
        .default(args.default_yes)
        .err(ctx.err);
    Ok(ctx.console().confirm_with(&confirm)?)
}
