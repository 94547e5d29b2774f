//! CLI layer: argument parsing, command wiring and dispatch

pub mod dispatcher;
pub mod error;
pub mod output;
pub mod parser;
pub mod tree;

pub use dispatcher::Dispatcher;
pub use error::{CliError, CliResult};
pub use parser::{ArgumentParser, RootOptionError};
