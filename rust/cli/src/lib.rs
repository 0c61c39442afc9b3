//! # Baccarat CLI Library
//!
//! Command-line front end for `baccarat-engine`: batch simulation, an
//! interactive table, and tools for reading the round logs they write.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a command handler and
//! returns the process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["baccarat", "sim", "--rounds", "10", "--no-log"];
//! let code = baccarat_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive table reading bets from stdin
//! - `sim`: Play a batch of rounds with a fixed bet
//! - `history`: Print rounds from a round log
//! - `stats`: Aggregate a round log
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod session;
pub mod ui;
pub mod validation;

use cli::{BaccaratCli, Commands};
use commands::{
    SimOptions, handle_cfg_command, handle_history_command, handle_play_command,
    handle_sim_command, handle_stats_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "history", "stats", "cfg"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let args = ["baccarat", "sim", "--rounds", "3", "--seed", "42", "--no-log"];
/// let code = baccarat_cli::run(args, &mut out, &mut err);
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BaccaratCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Play { table } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(table, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            rounds,
            bet,
            amount,
            until_shoe_end,
            quiet,
            table,
        } => handle_sim_command(
            SimOptions {
                rounds,
                bet: bet.into(),
                amount,
                until_shoe_end,
                quiet,
                table,
            },
            out,
            err,
        ),
        Commands::History { input, last, all } => handle_history_command(input, last, all, out),
        Commands::Stats { input } => handle_stats_command(input, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut usage = format!(
        "{}\nBaccarat CLI\nUsage: baccarat <command> [options]\n\nCommands:\n",
        e
    );
    for c in COMMANDS {
        usage.push_str(&format!("  {}\n", c));
    }
    usage.push_str("\nFor full help, run: baccarat --help");
    let _ = writeln!(err, "{}", usage);
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout_with_success() {
        let (code, out, _) = run_args(&["baccarat", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("sim"));
    }

    #[test]
    fn unknown_command_lists_commands_on_stderr() {
        let (code, _, err) = run_args(&["baccarat", "deal"]);
        assert_eq!(code, exit_code::ERROR);
        for c in COMMANDS {
            assert!(err.contains(c), "missing {c} in {err}");
        }
    }

    #[test]
    fn missing_log_file_is_an_error() {
        let (code, _, err) = run_args(&["baccarat", "stats", "--input", "no/such/file.csv"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.starts_with("Error:"));
    }
}
