//! Message identifiers for user-facing text.
//!
//! The identifiers are a fixed set; the text behind them comes from whichever
//! catalog is injected.

use std::fmt;

/// Key into a message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(&'static str);

impl MessageId {
    pub const MISSING_COMMAND: MessageId = MessageId("exception.missing.command");
    pub const UNKNOWN_HELP_TOPIC: MessageId = MessageId("exception.help.unknown");
    pub const MISSING_LOG_DIR: MessageId = MessageId("exception.logs.missing.dir");
    pub const INVALID_FILTER: MessageId = MessageId("exception.logs.invalid.filter");
    pub const INVALID_COMPONENT_VERSION: MessageId =
        MessageId("exception.deployment.invalid.merge");

    pub const ROOT_ABOUT: MessageId = MessageId("cli.usage.description");
    pub const ROOT_PATH: MessageId = MessageId("cli.ggcRootPath");

    pub const HELP_ABOUT: MessageId = MessageId("help.usage.description");
    pub const HELP_COMMAND: MessageId = MessageId("help.command");

    pub const COMPONENT_ABOUT: MessageId = MessageId("component.usage.description");
    pub const COMPONENT_LIST: MessageId = MessageId("component.list.description");
    pub const COMPONENT_DETAILS: MessageId = MessageId("component.details.description");
    pub const COMPONENT_RESTART: MessageId = MessageId("component.restart.description");
    pub const COMPONENT_STOP: MessageId = MessageId("component.stop.description");
    pub const COMPONENT_NAME: MessageId = MessageId("component.name");
    pub const COMPONENT_NAMES: MessageId = MessageId("component.names");

    pub const DEPLOYMENT_ABOUT: MessageId = MessageId("deployment.usage.description");
    pub const DEPLOYMENT_CREATE: MessageId = MessageId("deployment.create.description");
    pub const DEPLOYMENT_LIST: MessageId = MessageId("deployment.list.description");
    pub const DEPLOYMENT_STATUS: MessageId = MessageId("deployment.status.description");
    pub const DEPLOYMENT_RECIPE_DIR: MessageId = MessageId("deployment.recipeDir");
    pub const DEPLOYMENT_ARTIFACT_DIR: MessageId = MessageId("deployment.artifactDir");
    pub const DEPLOYMENT_MERGE: MessageId = MessageId("deployment.merge");
    pub const DEPLOYMENT_REMOVE: MessageId = MessageId("deployment.remove");
    pub const DEPLOYMENT_ID: MessageId = MessageId("deployment.deploymentId");

    pub const SERVICE_ABOUT: MessageId = MessageId("service.usage.description");
    pub const SERVICE_STATUS: MessageId = MessageId("service.status.description");

    pub const LOGS_ABOUT: MessageId = MessageId("logs.usage.description");
    pub const LOGS_GET: MessageId = MessageId("logs.get.description");
    pub const LOGS_LIST_FILES: MessageId = MessageId("logs.listLogFiles.description");
    pub const LOGS_FILE: MessageId = MessageId("logs.logFile");
    pub const LOGS_DIR: MessageId = MessageId("logs.logDir");
    pub const LOGS_FILTER: MessageId = MessageId("logs.filter");

    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
