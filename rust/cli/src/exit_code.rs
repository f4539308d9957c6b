//! Process exit codes shared by every command.

pub const SUCCESS: i32 = 0;

/// Bad input, unreadable files, failed validation or an aborted hand.
pub const ERROR: i32 = 2;

/// A run stopped before finishing its requested work.
pub const INTERRUPTED: i32 = 130;
