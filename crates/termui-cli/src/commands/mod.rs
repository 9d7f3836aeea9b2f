//! Command handlers, one module per subcommand group.

pub mod output;
pub mod page;
pub mod pause;
pub mod prompt;
