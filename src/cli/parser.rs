//! Argument parsing against the declared command tree
//!
//! The data-driven [`CommandTree`] is lowered to a `clap::Command` once. The
//! tree declares its own `help` subcommand, so clap's automatic help and
//! version flags stay off.

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};
use thiserror::Error;
use tracing::debug;

use crate::application::catalog::MessageCatalog;
use crate::application::handler::UsageRenderer;
use crate::domain::{
    Arity, Bindings, CommandSpec, CommandTree, OptionSpec, ParseError, ParseErrorKind,
    ParsedInvocation, RootConfig,
};

/// Structural failure of a root-level option, reported before anything else
/// is parsed. Displays as clap's error with a synopsis.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct RootOptionError(#[from] clap::Error);

/// Matches argument vectors (program name excluded) against a command tree.
pub struct ArgumentParser {
    tree: CommandTree,
    command: Command,
    root_command: Command,
}

impl ArgumentParser {
    pub fn new(tree: CommandTree, catalog: &dyn MessageCatalog) -> Self {
        let root = tree.root();

        let mut command = lower(root, catalog).no_binary_name(true).bin_name(root.name);
        command.build();

        // Root options only; everything from the first subcommand on is
        // swallowed as an external subcommand and left to `parse`.
        let root_command = root
            .options
            .iter()
            .fold(base_command(root.name), |cmd, option| {
                cmd.arg(lower_option(option, catalog))
            })
            .no_binary_name(true)
            .bin_name(root.name)
            .allow_external_subcommands(true);

        Self {
            tree,
            command,
            root_command,
        }
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// First pass: root-level options only.
    ///
    /// Unknown tokens are not an error here; `parse` reports them.
    pub fn parse_root(&self, argv: &[String]) -> Result<RootConfig, RootOptionError> {
        match self.root_command.clone().try_get_matches_from(argv) {
            Ok(matches) => Ok(RootConfig::from_bindings(&bind(self.tree.root(), &matches))),
            Err(e) if e.kind() == ErrorKind::UnknownArgument => {
                debug!("root pass skipped unknown argument, deferring to full parse");
                Ok(RootConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full parse: selected path plus the bindings of every level.
    pub fn parse(&self, argv: &[String]) -> Result<ParsedInvocation, ParseError> {
        let matches = self
            .command
            .clone()
            .try_get_matches_from(argv)
            .map_err(|e| self.parse_error(&e, argv))?;

        let root = bind(self.tree.root(), &matches);
        let mut path = Vec::new();
        let mut levels = Vec::new();
        let mut spec = self.tree.root();
        let mut current = &matches;

        while let Some((name, sub)) = current.subcommand() {
            let Some(child) = spec.find_subcommand(name) else {
                break;
            };
            path.push(child.name.to_string());
            levels.push(bind(child, sub));
            spec = child;
            current = sub;
        }

        debug!(?path, "parsed invocation");
        Ok(ParsedInvocation::new(root, path, levels))
    }

    fn parse_error(&self, error: &clap::Error, argv: &[String]) -> ParseError {
        let kind = match error.kind() {
            ErrorKind::UnknownArgument | ErrorKind::InvalidSubcommand => {
                ParseErrorKind::UnmatchedArgument
            }
            // No option here has a value parser, so clap's InvalidValue only
            // ever means the value itself was not supplied.
            ErrorKind::MissingRequiredArgument
            | ErrorKind::MissingSubcommand
            | ErrorKind::InvalidValue
            | ErrorKind::TooFewValues
            | ErrorKind::WrongNumberOfValues => ParseErrorKind::MissingParameter,
            _ => ParseErrorKind::InvalidValue,
        };
        ParseError::new(kind, summary(error), self.tree.resolve_prefix(argv))
    }
}

impl UsageRenderer for ArgumentParser {
    fn usage(&self, path: &[String]) -> Option<String> {
        let mut command = &self.command;
        for name in path {
            command = command.find_subcommand(name)?;
        }
        Some(command.clone().render_help().to_string())
    }
}

/// First line of clap's rendering, without the `error: ` prefix.
fn summary(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let line = rendered
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

fn base_command(name: &'static str) -> Command {
    Command::new(name)
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .disable_version_flag(true)
        .color(ColorChoice::Never)
}

fn lower(spec: &CommandSpec, catalog: &dyn MessageCatalog) -> Command {
    let mut command = base_command(spec.name);
    if let Some(about) = spec.about {
        command = command.about(catalog.lookup(about));
    }
    for option in &spec.options {
        command = command.arg(lower_option(option, catalog));
    }
    for child in &spec.subcommands {
        command = command.subcommand(lower(child, catalog));
    }
    command
}

fn lower_option(option: &OptionSpec, catalog: &dyn MessageCatalog) -> Arg {
    let mut arg = Arg::new(option.name).required(option.required);
    if !option.positional {
        arg = arg.long(option.name);
    }
    if let Some(short) = option.short {
        arg = arg.short(short);
    }
    if let Some(value_name) = option.value_name {
        arg = arg.value_name(value_name);
    }
    if let Some(help) = option.help {
        arg = arg.help(catalog.lookup(help));
    }
    if let Some(delimiter) = option.delimiter {
        arg = arg.value_delimiter(delimiter);
    }
    match (option.arity, option.positional) {
        (Arity::Flag, _) => arg.action(ArgAction::SetTrue),
        (Arity::One, _) => arg.action(ArgAction::Set).num_args(1),
        (Arity::Many, true) => arg.action(ArgAction::Append).num_args(1..),
        (Arity::Many, false) => arg.action(ArgAction::Append).num_args(1),
    }
}

fn bind(spec: &CommandSpec, matches: &ArgMatches) -> Bindings {
    let mut bindings = Bindings::new();
    for option in &spec.options {
        match option.arity {
            Arity::Flag => {
                if matches.get_flag(option.name) {
                    bindings.set_flag(option.name);
                }
            }
            Arity::One | Arity::Many => {
                if let Some(values) = matches.get_many::<String>(option.name) {
                    bindings.insert(option.name, values.cloned().collect());
                }
            }
        }
    }
    bindings
}
