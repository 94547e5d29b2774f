//! Domain layer: command tree, invocation data, message ids
//!
//! This layer is independent of external concerns (no I/O, no clap, no config loading).

pub mod command;
pub mod error;
pub mod invocation;
pub mod message;

pub use command::{Arity, CommandSpec, CommandTree, HandlerId, OptionSpec, MISSING_COMMAND};
pub use error::{DomainError, ParseError, ParseErrorKind};
pub use invocation::{Bindings, ParsedInvocation, RootConfig, ROOT_PATH_OPTION};
pub use message::MessageId;
