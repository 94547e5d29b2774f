//! Handler for the root and group commands.

use crate::application::error::{DispatchError, DispatchResult};
use crate::application::handler::{CommandContext, Handler};
use crate::domain::MessageId;

/// Fails with [`DispatchError::NoCommandSelected`]; runs only when no
/// subcommand was chosen.
#[derive(Debug, Default)]
pub struct MissingCommand;

impl Handler for MissingCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> DispatchResult<()> {
        Err(DispatchError::NoCommandSelected {
            path: ctx.path().to_vec(),
            message: ctx.message(MessageId::MISSING_COMMAND),
        })
    }
}
