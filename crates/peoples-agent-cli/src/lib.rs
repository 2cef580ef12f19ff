// Library interface so integration tests can reach the command parser.

// commands.rs is also declared in main.rs; reference the same source file
// to avoid "file loaded multiple times" errors.

#[path = "commands.rs"]
pub mod commands;

pub use commands::{handle_command, CommandResult};
