//! Command trait definition for CLI commands.
//!
//! Every `pbheader` subcommand implements [`Command`]; `enum_dispatch` routes the parsed
//! subcommand to its implementation without boxing.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Trait implemented by all pbheader CLI commands.
///
/// The `command_line` parameter contains the full command invocation for @PG records.
#[enum_dispatch]
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
