//! Subcommand handlers
//!
//! Thin collaborators behind the dispatch core: each one reads its bound
//! options, does one thing, and reports failures as [`DispatchError`]s.
//!
//! [`DispatchError`]: crate::application::error::DispatchError

pub mod help;
pub mod logs;
pub mod missing;
pub mod remote;

pub use help::HelpCommand;
pub use logs::{GetLogs, ListLogFiles};
pub use missing::MissingCommand;
pub use remote::{Operation, RemoteCommand};
