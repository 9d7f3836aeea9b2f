//! `termui page` -- show a file or stdin through the pager.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::PageArgs;
use crate::context::RuntimeContext;

/// Execute `termui page`. Lines are streamed as they are read; stdin input
/// is never a terminal, so it always takes the echo fallback.
pub fn run(ctx: &RuntimeContext, args: &PageArgs) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", termui::format_filename(path, false)))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    debug!(file = ?args.file, "paging");

    let mut read_error = None;
    let lines = reader.lines().map_while(|line| match line {
        Ok(mut line) => {
            line.push('\n');
            Some(line)
        }
        Err(e) => {
            read_error = Some(e);
            None
        }
    });
    ctx.console().echo_via_pager_iter(lines, ctx.color)?;

    if let Some(e) = read_error {
        return Err(e).context("failed to read input");
    }
    Ok(())
}
