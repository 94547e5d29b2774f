//! Invocation lifecycle: parse, build, execute, classify, exit code
//!
//! Handled failures are reported here, on the output sink, and end with a
//! success status.
//! Fatal failures are returned to the caller unchanged.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::builder::{build, DefaultConstructor, HandlerBindings, Injector};
use crate::application::catalog::MessageCatalog;
use crate::application::commands::MissingCommand;
use crate::application::error::{DispatchError, DispatchResult, IoResultExt};
use crate::application::handler::{CommandContext, UsageRenderer};
use crate::application::outcome::{classify, Outcome};
use crate::cli::output;
use crate::cli::parser::ArgumentParser;
use crate::config::Settings;
use crate::domain::{CommandTree, ParsedInvocation, RootConfig, MISSING_COMMAND};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

/// Builds the service container of one invocation.
pub type ServiceFactory = Box<dyn Fn(Arc<Settings>, RootConfig) -> ServiceContainer>;

/// Routes argument vectors to handlers and maps the result to an exit code.
pub struct Dispatcher {
    parser: ArgumentParser,
    catalog: Arc<dyn MessageCatalog>,
    bindings: HandlerBindings,
    defaults: DefaultConstructor,
    settings: Arc<Settings>,
    services: ServiceFactory,
}

impl Dispatcher {
    /// A dispatcher with no bindings; only group commands can be built.
    pub fn new(tree: CommandTree, catalog: Arc<dyn MessageCatalog>, settings: Arc<Settings>) -> Self {
        Self {
            parser: ArgumentParser::new(tree, catalog.as_ref()),
            catalog,
            bindings: HandlerBindings::new(),
            defaults: DefaultConstructor::new().register::<MissingCommand>(MISSING_COMMAND),
            settings,
            services: Box::new(ServiceContainer::new),
        }
    }

    pub fn with_bindings(mut self, bindings: HandlerBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_defaults(mut self, defaults: DefaultConstructor) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replaces how the per-invocation service container is made.
    pub fn with_services<F>(mut self, services: F) -> Self
    where
        F: Fn(Arc<Settings>, RootConfig) -> ServiceContainer + 'static,
    {
        self.services = Box::new(services);
        self
    }

    /// Dispatches `argv` (program name excluded) against stdout and stderr.
    pub fn run(&self, argv: &[String]) -> Result<i32, DispatchError> {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        self.run_with(argv, &mut stdout.lock(), &mut stderr.lock())
    }

    /// Dispatches `argv`. Handler output and handled failures go to `out`;
    /// only a malformed root option is reported on `err`.
    ///
    /// `Ok` carries the exit code of a success or a handled failure; `Err`
    /// carries a fatal failure exactly as the failing step raised it.
    #[instrument(level = "debug", skip(self, out, err))]
    pub fn run_with(
        &self,
        argv: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<i32, DispatchError> {
        let root = match self.parser.parse_root(argv) {
            Ok(root) => root.or_default(self.settings.root_path.clone()),
            Err(e) => {
                warn!("root options rejected");
                write!(err, "{e}").with_context("write diagnostic")?;
                return Ok(exitcode::USAGE);
            }
        };

        let invocation = match self.parser.parse(argv) {
            Ok(invocation) => invocation,
            Err(e) => return self.settle(e.into(), &[], out),
        };

        match self.execute(&invocation, root, out) {
            Ok(()) => {
                debug!(command = %invocation.command_line(), "command succeeded");
                Ok(exitcode::OK)
            }
            Err(e) => self.settle(e, invocation.path(), out),
        }
    }

    fn execute(
        &self,
        invocation: &ParsedInvocation,
        root: RootConfig,
        out: &mut dyn Write,
    ) -> DispatchResult<()> {
        let spec = self.parser.tree().find(invocation.path()).ok_or_else(|| {
            DispatchError::unclassified(
                "resolve command",
                format!("no command declared at '{}'", invocation.command_line()),
            )
        })?;

        let services = (self.services)(Arc::clone(&self.settings), root);
        let injector = Injector::new(&self.bindings, &services);
        let mut handler = build(spec.handler, &injector, &self.defaults)?;

        info!(
            command = %invocation.command_line(),
            handler = handler.name(),
            "executing command"
        );
        let mut ctx = CommandContext {
            invocation,
            catalog: self.catalog.as_ref(),
            usage: &self.parser,
            out,
        };
        handler.execute(&mut ctx)
    }

    /// Reports a handled failure on `out`, or hands a fatal one back.
    fn settle(
        &self,
        error: DispatchError,
        selected: &[String],
        out: &mut dyn Write,
    ) -> Result<i32, DispatchError> {
        let outcome = classify(&error);
        let code = outcome.exit_code();
        let (message, show_usage) = match outcome {
            Outcome::HandledFailure {
                message,
                show_usage,
            } => (message, show_usage),
            Outcome::Success => return Ok(code),
            Outcome::FatalFailure(_) => return Err(error),
        };

        debug!(%message, "handled failure");
        writeln!(out, "{}", output::error_text(&message)).with_context("write diagnostic")?;
        if show_usage {
            let path = error.usage_path().unwrap_or(selected);
            if let Some(usage) = self.parser.usage(path) {
                write!(out, "{usage}").with_context("write usage")?;
            }
        }
        Ok(code)
    }
}
