//! Command dispatch core for the Greengrass device CLI.
//!
//! An argument vector is matched against a declared command tree, the bound
//! handler is built (dependency-resolved first, default-constructed as a
//! fallback), executed, and its outcome mapped to an exit status.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
