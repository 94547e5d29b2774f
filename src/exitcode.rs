//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination, including handled usage failures
pub const OK: i32 = 0;

/// Command line usage error (malformed root options)
pub const USAGE: i32 = 64;

/// Internal software error (fatal dispatch failure)
pub const SOFTWARE: i32 = 70;

/// Configuration error
pub const CONFIG: i32 = 78;
