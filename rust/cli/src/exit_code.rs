//! Process exit codes returned by [`crate::run`].

/// The command completed.
pub const SUCCESS: i32 = 0;

/// Bad arguments, invalid configuration, unreadable log or engine failure.
pub const ERROR: i32 = 2;

/// A simulation stopped early on request.
pub const INTERRUPTED: i32 = 130;
