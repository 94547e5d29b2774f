//! Handler contract.
//!
//! A handler is the executable unit bound to a resolved command. It is built
//! fresh for one invocation, executed once, then dropped.

use std::io::Write;

use crate::application::catalog::MessageCatalog;
use crate::application::error::DispatchResult;
use crate::domain::{Bindings, MessageId, ParsedInvocation};

/// Renders usage text for a command path.
pub trait UsageRenderer {
    /// `None` if `path` does not name a declared command.
    fn usage(&self, path: &[String]) -> Option<String>;
}

/// What a handler gets to see while it runs.
pub struct CommandContext<'a> {
    pub invocation: &'a ParsedInvocation,
    pub catalog: &'a dyn MessageCatalog,
    pub usage: &'a dyn UsageRenderer,
    pub out: &'a mut dyn Write,
}

impl CommandContext<'_> {
    /// The selected command path.
    pub fn path(&self) -> &[String] {
        self.invocation.path()
    }

    /// Bindings of the selected command.
    pub fn args(&self) -> &Bindings {
        self.invocation.leaf()
    }

    pub fn message(&self, id: MessageId) -> String {
        self.catalog.lookup(id)
    }
}

/// A runnable command.
pub trait Handler {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> DispatchResult<()>;

    /// Type name, for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
