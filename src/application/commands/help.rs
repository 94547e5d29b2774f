//! `help [COMMAND...]`

use tracing::debug;

use crate::application::error::{DispatchResult, IoResultExt};
use crate::application::handler::{CommandContext, Handler};
use crate::domain::{MessageId, ParseError, ParseErrorKind};

/// Positional naming the command to describe.
pub const TOPIC: &str = "command";

/// Prints usage for the named command, or for the root.
#[derive(Debug, Default)]
pub struct HelpCommand;

impl Handler for HelpCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> DispatchResult<()> {
        let topic = ctx.args().get_many(TOPIC).to_vec();
        debug!(?topic, "rendering help");

        let Some(usage) = ctx.usage.usage(&topic) else {
            return Err(ParseError::new(
                ParseErrorKind::UnmatchedArgument,
                format!("{}: '{}'", ctx.message(MessageId::UNKNOWN_HELP_TOPIC), topic.join(" ")),
                ctx.path().to_vec(),
            )
            .into());
        };

        write!(ctx.out, "{usage}").with_context("write help")?;
        if !usage.ends_with('\n') {
            writeln!(ctx.out).with_context("write help")?;
        }
        Ok(())
    }
}
