//! The `greengrass-cli` command tree and its handler wiring

use std::sync::Arc;

use crate::application::builder::{DefaultConstructor, HandlerBindings};
use crate::application::catalog::MessageCatalog;
use crate::application::error::BuildError;
use crate::application::commands::{
    help, logs, remote, GetLogs, HelpCommand, ListLogFiles, MissingCommand, Operation,
    RemoteCommand,
};
use crate::application::handler::Handler;
use crate::cli::dispatcher::Dispatcher;
use crate::config::Settings;
use crate::domain::{
    Arity, CommandSpec, CommandTree, DomainError, HandlerId, MessageId, OptionSpec,
    MISSING_COMMAND, ROOT_PATH_OPTION,
};
use crate::infrastructure::di::ServiceContainer;

pub const ROOT: &str = "greengrass-cli";

pub const HELP: HandlerId = HandlerId::new("help");
pub const COMPONENT_LIST: HandlerId = HandlerId::new("component.list");
pub const COMPONENT_DETAILS: HandlerId = HandlerId::new("component.details");
pub const COMPONENT_RESTART: HandlerId = HandlerId::new("component.restart");
pub const COMPONENT_STOP: HandlerId = HandlerId::new("component.stop");
pub const DEPLOYMENT_CREATE: HandlerId = HandlerId::new("deployment.create");
pub const DEPLOYMENT_LIST: HandlerId = HandlerId::new("deployment.list");
pub const DEPLOYMENT_STATUS: HandlerId = HandlerId::new("deployment.status");
pub const SERVICE_STATUS: HandlerId = HandlerId::new("service.status");
pub const LOGS_GET: HandlerId = HandlerId::new("logs.get");
pub const LOGS_LIST_FILES: HandlerId = HandlerId::new("logs.list-log-files");

fn component_commands() -> CommandSpec {
    CommandSpec::group("component")
        .about(MessageId::COMPONENT_ABOUT)
        .subcommand(CommandSpec::new("list", COMPONENT_LIST).about(MessageId::COMPONENT_LIST))
        .subcommand(
            CommandSpec::new("details", COMPONENT_DETAILS)
                .about(MessageId::COMPONENT_DETAILS)
                .arg(
                    OptionSpec::value(remote::NAME)
                        .short('n')
                        .required()
                        .help(MessageId::COMPONENT_NAME),
                ),
        )
        .subcommand(
            CommandSpec::new("restart", COMPONENT_RESTART)
                .about(MessageId::COMPONENT_RESTART)
                .arg(component_names()),
        )
        .subcommand(
            CommandSpec::new("stop", COMPONENT_STOP)
                .about(MessageId::COMPONENT_STOP)
                .arg(component_names()),
        )
}

fn component_names() -> OptionSpec {
    OptionSpec::values(remote::NAMES)
        .short('n')
        .delimited(',')
        .required()
        .help(MessageId::COMPONENT_NAMES)
}

fn deployment_commands() -> CommandSpec {
    CommandSpec::group("deployment")
        .about(MessageId::DEPLOYMENT_ABOUT)
        .subcommand(
            CommandSpec::new("create", DEPLOYMENT_CREATE)
                .about(MessageId::DEPLOYMENT_CREATE)
                .arg(
                    OptionSpec::value(remote::RECIPE_DIR)
                        .short('r')
                        .value_name("DIR")
                        .help(MessageId::DEPLOYMENT_RECIPE_DIR),
                )
                .arg(
                    OptionSpec::value(remote::ARTIFACT_DIR)
                        .short('a')
                        .value_name("DIR")
                        .help(MessageId::DEPLOYMENT_ARTIFACT_DIR),
                )
                .arg(
                    OptionSpec::values(remote::MERGE)
                        .short('m')
                        .value_name("COMPONENT=VERSION")
                        .help(MessageId::DEPLOYMENT_MERGE),
                )
                .arg(
                    OptionSpec::values(remote::REMOVE)
                        .value_name("COMPONENT")
                        .help(MessageId::DEPLOYMENT_REMOVE),
                ),
        )
        .subcommand(CommandSpec::new("list", DEPLOYMENT_LIST).about(MessageId::DEPLOYMENT_LIST))
        .subcommand(
            CommandSpec::new("status", DEPLOYMENT_STATUS)
                .about(MessageId::DEPLOYMENT_STATUS)
                .arg(
                    OptionSpec::value(remote::DEPLOYMENT_ID)
                        .short('i')
                        .required()
                        .help(MessageId::DEPLOYMENT_ID),
                ),
        )
}

fn service_commands() -> CommandSpec {
    CommandSpec::group("service")
        .about(MessageId::SERVICE_ABOUT)
        .subcommand(
            CommandSpec::new("status", SERVICE_STATUS)
                .about(MessageId::SERVICE_STATUS)
                .arg(
                    OptionSpec::values(remote::NAMES)
                        .short('n')
                        .delimited(',')
                        .required()
                        .help(MessageId::COMPONENT_NAMES),
                ),
        )
}

fn logs_commands() -> CommandSpec {
    CommandSpec::group("logs")
        .about(MessageId::LOGS_ABOUT)
        .subcommand(
            CommandSpec::new("get", LOGS_GET)
                .about(MessageId::LOGS_GET)
                .arg(
                    OptionSpec::values(logs::LOG_FILE)
                        .required()
                        .value_name("FILE")
                        .help(MessageId::LOGS_FILE),
                )
                .arg(
                    OptionSpec::values(logs::FILTER)
                        .value_name("REGEX")
                        .help(MessageId::LOGS_FILTER),
                ),
        )
        .subcommand(
            CommandSpec::new("list-log-files", LOGS_LIST_FILES)
                .about(MessageId::LOGS_LIST_FILES)
                .arg(
                    OptionSpec::value(logs::LOG_DIR)
                        .value_name("DIR")
                        .help(MessageId::LOGS_DIR),
                ),
        )
}

/// The full command tree of the tool.
pub fn command_tree() -> Result<CommandTree, DomainError> {
    CommandTree::new(
        CommandSpec::new(ROOT, MISSING_COMMAND)
            .about(MessageId::ROOT_ABOUT)
            .arg(
                OptionSpec::value(ROOT_PATH_OPTION)
                    .value_name("PATH")
                    .help(MessageId::ROOT_PATH),
            )
            .subcommand(
                CommandSpec::new("help", HELP)
                    .about(MessageId::HELP_ABOUT)
                    .arg(
                        OptionSpec::positional(help::TOPIC, Arity::Many)
                            .help(MessageId::HELP_COMMAND),
                    ),
            )
            .subcommand(component_commands())
            .subcommand(deployment_commands())
            .subcommand(service_commands())
            .subcommand(logs_commands()),
    )
}

fn remote_command(
    operation: Operation,
) -> impl Fn(&ServiceContainer) -> Result<Box<dyn Handler>, BuildError> {
    move |c: &ServiceContainer| -> Result<Box<dyn Handler>, BuildError> {
        Ok(Box::new(RemoteCommand::new(operation, c.control_plane.clone())))
    }
}

/// Factories for every handler with dependencies.
pub fn bindings() -> HandlerBindings {
    HandlerBindings::new()
        .bind(COMPONENT_LIST, remote_command(Operation::ListComponents))
        .bind(COMPONENT_DETAILS, remote_command(Operation::GetComponentDetails))
        .bind(COMPONENT_RESTART, remote_command(Operation::RestartComponents))
        .bind(COMPONENT_STOP, remote_command(Operation::StopComponents))
        .bind(DEPLOYMENT_CREATE, remote_command(Operation::CreateLocalDeployment))
        .bind(DEPLOYMENT_LIST, remote_command(Operation::ListLocalDeployments))
        .bind(DEPLOYMENT_STATUS, remote_command(Operation::GetLocalDeploymentStatus))
        .bind(SERVICE_STATUS, remote_command(Operation::GetServiceStatus))
        .bind(LOGS_LIST_FILES, |c: &ServiceContainer| -> Result<Box<dyn Handler>, BuildError> {
            Ok(Box::new(ListLogFiles::new(c.fs.clone(), c.log_dir())))
        })
        .bind(LOGS_GET, |c: &ServiceContainer| -> Result<Box<dyn Handler>, BuildError> {
            Ok(Box::new(GetLogs::new(c.fs.clone())))
        })
}

/// Dependency-free handlers, built by default construction.
pub fn defaults() -> DefaultConstructor {
    DefaultConstructor::new()
        .register::<HelpCommand>(HELP)
        .register::<MissingCommand>(MISSING_COMMAND)
}

/// Dispatcher for the full tool.
pub fn dispatcher(
    settings: Arc<Settings>,
    catalog: Arc<dyn MessageCatalog>,
) -> Result<Dispatcher, DomainError> {
    Ok(Dispatcher::new(command_tree()?, catalog, settings)
        .with_bindings(bindings())
        .with_defaults(defaults()))
}
