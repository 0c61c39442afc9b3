//! Stdin and log-file helpers shared by the commands.
//!
//! - Reading one trimmed line of interactive input
//! - Resolving a `--input` argument that may name a log directory

use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Returns the trimmed line (possibly empty), or `None` on EOF or a read
/// error.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use baccarat_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Turns a `--input` argument into a log file path.
///
/// A file path is returned as is. For a directory, the newest daily log
/// (`baccarat_YYYY_MM_DD.csv`) inside it is chosen; the date format makes
/// the lexicographically greatest name the most recent.
pub fn resolve_log_input(input: &str) -> Result<PathBuf, String> {
    let path = Path::new(input);
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }
    let entries = std::fs::read_dir(path).map_err(|e| format!("{}: {}", input, e))?;
    let mut logs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_daily_log(p))
        .collect();
    logs.sort();
    logs.pop()
        .ok_or_else(|| format!("no baccarat_*.csv logs in {}", input))
}

fn is_daily_log(p: &Path) -> bool {
    p.is_file()
        && p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("baccarat_") && n.ends_with(".csv"))
}
