//! UI helper functions for terminal output formatting.
//!
//! Errors and warnings go to the error stream with a fixed prefix so that
//! scripted callers can grep for them.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Display a notice on the normal output stream, e.g. a shoe reset.
pub fn display_notice(out: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(out, "*** {} ***", message)
}

/// Prompt without a trailing newline and flush so it shows before input.
pub fn prompt(out: &mut dyn Write, text: &str) -> std::io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_stable() {
        let mut buf = Vec::new();
        write_error(&mut buf, "bad").unwrap();
        display_warning(&mut buf, "careful").unwrap();
        display_notice(&mut buf, "Shoe reset").unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "Error: bad\nWARNING: careful\n*** Shoe reset ***\n");
    }
}
