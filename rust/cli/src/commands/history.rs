//! Prints rounds recorded in a round log.

use crate::error::CliError;
use crate::formatters::{format_record_row, record_table_header};
use crate::io_utils::resolve_log_input;
use baccarat_engine::logger::read_log;
use std::io::Write;

/// Print the last `last` rounds of a log, or all of them with `all`.
///
/// # Arguments
///
/// * `input` - Log file, or a directory whose newest daily log is read
/// * `last` - Number of trailing rounds to show (ignored with `all`)
/// * `all` - Show every round
pub fn handle_history_command(
    input: String,
    last: usize,
    all: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !all && last == 0 {
        return Err(CliError::InvalidInput("last must be >= 1".to_string()));
    }
    let path = resolve_log_input(&input)?;
    let records = read_log(&path)?;

    let skip = if all {
        0
    } else {
        records.len().saturating_sub(last)
    };
    let shown = &records[skip..];

    writeln!(
        out,
        "{}: showing {} of {} rounds",
        path.display(),
        shown.len(),
        records.len()
    )?;
    if shown.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", record_table_header())?;
    for rec in shown {
        writeln!(out, "{}", format_record_row(rec))?;
    }
    Ok(())
}
