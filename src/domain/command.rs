//! Command tree declaration
//!
//! The tree is plain data built at process start. The parser lowers it to
//! clap and the dispatcher reads handler ids from it; nothing here knows how a
//! handler is implemented.

use std::collections::HashSet;
use std::fmt;

use crate::domain::{DomainError, MessageId};

/// Key identifying a handler type in the construction registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(&'static str);

impl HandlerId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Handler bound to the root and to every group command: fails when no
/// subcommand was chosen.
pub const MISSING_COMMAND: HandlerId = HandlerId::new("missing-command");

/// How many values an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Present or absent, no value.
    Flag,
    /// Exactly one value.
    One,
    /// One or more values (repeated, or split on a declared delimiter).
    Many,
}

/// A declared option or positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub short: Option<char>,
    pub arity: Arity,
    pub required: bool,
    pub positional: bool,
    pub value_name: Option<&'static str>,
    pub help: Option<MessageId>,
    /// Splits each occurrence of a multi-valued option into several values.
    pub delimiter: Option<char>,
}

impl OptionSpec {
    fn with_arity(name: &'static str, arity: Arity) -> Self {
        Self {
            name,
            short: None,
            arity,
            required: false,
            positional: false,
            value_name: None,
            help: None,
            delimiter: None,
        }
    }

    /// `--name` without a value.
    pub fn flag(name: &'static str) -> Self {
        Self::with_arity(name, Arity::Flag)
    }

    /// `--name <value>`
    pub fn value(name: &'static str) -> Self {
        Self::with_arity(name, Arity::One)
    }

    /// `--name <value>...`
    pub fn values(name: &'static str) -> Self {
        Self::with_arity(name, Arity::Many)
    }

    /// Matched by position instead of by name.
    pub fn positional(name: &'static str, arity: Arity) -> Self {
        Self {
            positional: true,
            ..Self::with_arity(name, arity)
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value_name(mut self, value_name: &'static str) -> Self {
        self.value_name = Some(value_name);
        self
    }

    pub fn help(mut self, help: MessageId) -> Self {
        self.help = Some(help);
        self
    }

    /// `--name a,b` binds `a` and `b`.
    pub fn delimited(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn takes_value(&self) -> bool {
        self.arity != Arity::Flag
    }
}

/// The declared shape of one command: options plus ordered child commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub about: Option<MessageId>,
    pub handler: HandlerId,
    pub options: Vec<OptionSpec>,
    pub subcommands: Vec<CommandSpec>,
}

impl CommandSpec {
    /// A leaf command executed by `handler`.
    pub fn new(name: &'static str, handler: HandlerId) -> Self {
        Self {
            name,
            about: None,
            handler,
            options: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    /// A command that only groups subcommands.
    pub fn group(name: &'static str) -> Self {
        Self::new(name, MISSING_COMMAND)
    }

    pub fn about(mut self, about: MessageId) -> Self {
        self.about = Some(about);
        self
    }

    pub fn arg(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn subcommand(mut self, command: CommandSpec) -> Self {
        self.subcommands.push(command);
        self
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&CommandSpec> {
        self.subcommands.iter().find(|c| c.name == name)
    }

    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options
            .iter()
            .find(|o| !o.positional && o.name == name)
    }

    pub fn find_short(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.short == Some(short))
    }
}

/// A validated command tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTree {
    root: CommandSpec,
}

impl CommandTree {
    /// Validates sibling-name and option-name uniqueness at every level.
    pub fn new(root: CommandSpec) -> Result<Self, DomainError> {
        validate(&root, root.name)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &CommandSpec {
        &self.root
    }

    /// Finds the command at `path` (names below the root).
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandSpec> {
        path.iter()
            .try_fold(&self.root, |spec, name| spec.find_subcommand(name.as_ref()))
    }

    /// Deepest command path named by `argv`, skipping options and their values.
    ///
    /// Used to choose which usage text to show when parsing fails part way.
    pub fn resolve_prefix(&self, argv: &[String]) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = &self.root;
        let mut tokens = argv.iter();

        while let Some(token) = tokens.next() {
            if token == "--" {
                break;
            }
            if let Some(long) = token.strip_prefix("--") {
                let consumes_next = !long.contains('=')
                    && current.find_option(long).is_some_and(OptionSpec::takes_value);
                if consumes_next {
                    tokens.next();
                }
                continue;
            }
            if let Some(short) = token.strip_prefix('-').filter(|s| !s.is_empty()) {
                let mut chars = short.chars();
                let consumes_next = match (chars.next(), chars.next()) {
                    (Some(c), None) => current.find_short(c).is_some_and(OptionSpec::takes_value),
                    _ => false,
                };
                if consumes_next {
                    tokens.next();
                }
                continue;
            }
            if let Some(child) = current.find_subcommand(token) {
                path.push(child.name.to_string());
                current = child;
            }
        }

        path
    }
}

fn validate(spec: &CommandSpec, path: &str) -> Result<(), DomainError> {
    let mut names = HashSet::new();
    for child in &spec.subcommands {
        if child.name.is_empty() {
            return Err(DomainError::EmptyName {
                parent: path.to_string(),
            });
        }
        if !names.insert(child.name) {
            return Err(DomainError::DuplicateCommand {
                parent: path.to_string(),
                name: child.name.to_string(),
            });
        }
    }

    let mut options = HashSet::new();
    let mut shorts = HashSet::new();
    for option in &spec.options {
        if !options.insert(option.name) {
            return Err(DomainError::DuplicateOption {
                command: path.to_string(),
                name: option.name.to_string(),
            });
        }
        if let Some(short) = option.short {
            if !shorts.insert(short) {
                return Err(DomainError::DuplicateShort {
                    command: path.to_string(),
                    short,
                });
            }
        }
    }

    for child in &spec.subcommands {
        validate(child, &format!("{} {}", path, child.name))?;
    }
    Ok(())
}
