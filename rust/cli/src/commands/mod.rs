//! Command handler modules for the baccarat CLI.
//!
//! Each command lives in its own file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, never taken from the process
//! - Errors propagated via `CliError`; [`crate::run`] turns them into exit codes

pub mod cfg;
pub mod history;
pub mod play;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use history::handle_history_command;
pub use play::handle_play_command;
pub use sim::{SimOptions, handle_sim_command};
pub use stats::handle_stats_command;
