//! Application layer: handlers, construction, and outcome policy
//!
//! This layer turns a parsed invocation into a result and depends on I/O
//! boundary traits only.

pub mod builder;
pub mod catalog;
pub mod commands;
pub mod error;
pub mod handler;
pub mod outcome;

pub use builder::{build, ConstructionStrategy, DefaultConstructor, HandlerBindings, Injector};
pub use catalog::{MessageCatalog, TomlCatalog};
pub use error::{BuildError, DispatchError, DispatchResult, IoResultExt};
pub use handler::{CommandContext, Handler, UsageRenderer};
pub use outcome::{classify, Outcome};
