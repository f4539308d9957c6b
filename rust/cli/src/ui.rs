//! Helpers for consistent messages on the error stream.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Seat ids used by the table-running commands: `p0`, `p1`, ...
pub fn seat_id(seat: usize) -> String {
    format!("p{}", seat)
}
