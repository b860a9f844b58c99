// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs parses arguments, builds the
// probe configuration and dispatches here.

pub mod descriptor;
pub mod diagnostics;
pub mod probe;
