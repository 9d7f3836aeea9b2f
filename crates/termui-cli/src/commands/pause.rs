//! `termui pause`.

use anyhow::Result;

use crate::cli::PauseArgs;
use crate::context::RuntimeContext;

/// Execute `termui pause`. Returns immediately without a terminal.
pub fn run(ctx: &RuntimeContext, args: &PauseArgs) -> Result<()> {
    ctx.console().pause_with(&args.message, ctx.err)?;
    Ok(())
}
