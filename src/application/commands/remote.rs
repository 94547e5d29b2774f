//! Commands answered by the control plane.

use std::io::Write;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::application::error::{DispatchError, DispatchResult, IoResultExt};
use crate::application::handler::{CommandContext, Handler};
use crate::domain::{MessageId, ParseError, ParseErrorKind};
use crate::infrastructure::traits::{ControlPlane, Request};

pub const NAME: &str = "name";
pub const NAMES: &str = "names";
pub const RECIPE_DIR: &str = "recipeDir";
pub const ARTIFACT_DIR: &str = "artifactDir";
pub const MERGE: &str = "merge";
pub const REMOVE: &str = "remove";
pub const DEPLOYMENT_ID: &str = "deploymentId";

/// Control-plane operations the CLI can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListComponents,
    GetComponentDetails,
    RestartComponents,
    StopComponents,
    CreateLocalDeployment,
    ListLocalDeployments,
    GetLocalDeploymentStatus,
    GetServiceStatus,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListComponents => "ListComponents",
            Operation::GetComponentDetails => "GetComponentDetails",
            Operation::RestartComponents => "RestartComponents",
            Operation::StopComponents => "StopComponents",
            Operation::CreateLocalDeployment => "CreateLocalDeployment",
            Operation::ListLocalDeployments => "ListLocalDeployments",
            Operation::GetLocalDeploymentStatus => "GetLocalDeploymentStatus",
            Operation::GetServiceStatus => "GetServiceStatus",
        }
    }

    /// Builds the request from the command's bound options.
    pub fn request(&self, ctx: &CommandContext<'_>) -> DispatchResult<Request> {
        let args = ctx.args();
        let request = Request::new(self.name());
        let request = match self {
            Operation::ListComponents
            | Operation::ListLocalDeployments => request,
            Operation::GetComponentDetails => {
                request.param("componentName", args.get_one(NAME).unwrap_or_default())
            }
            Operation::RestartComponents | Operation::StopComponents => {
                request.param("componentNames", args.get_many(NAMES).to_vec())
            }
            Operation::GetServiceStatus => {
                request.param("serviceNames", args.get_many(NAMES).to_vec())
            }
            Operation::GetLocalDeploymentStatus => {
                request.param("deploymentId", args.get_one(DEPLOYMENT_ID).unwrap_or_default())
            }
            Operation::CreateLocalDeployment => {
                let mut versions = Map::new();
                for entry in args.get_many(MERGE) {
                    let (component, version) = entry
                        .split_once('=')
                        .filter(|(c, v)| !c.is_empty() && !v.is_empty())
                        .ok_or_else(|| {
                            ParseError::new(
                                ParseErrorKind::InvalidValue,
                                format!(
                                    "{}: '{}'",
                                    ctx.message(MessageId::INVALID_COMPONENT_VERSION),
                                    entry
                                ),
                                ctx.path().to_vec(),
                            )
                        })?;
                    versions.insert(component.to_string(), Value::from(version));
                }

                let mut request = request
                    .param("rootComponentVersionsToAdd", Value::Object(versions))
                    .param("rootComponentsToRemove", args.get_many(REMOVE).to_vec());
                if let Some(dir) = args.get_one(RECIPE_DIR) {
                    request = request.param("recipeDirectoryPath", dir);
                }
                if let Some(dir) = args.get_one(ARTIFACT_DIR) {
                    request = request.param("artifactsDirectoryPath", dir);
                }
                request
            }
        };
        Ok(request)
    }
}

/// Sends one operation to the control plane and prints the response body.
pub struct RemoteCommand {
    operation: Operation,
    control_plane: Arc<dyn ControlPlane>,
}

impl RemoteCommand {
    pub fn new(operation: Operation, control_plane: Arc<dyn ControlPlane>) -> Self {
        Self {
            operation,
            control_plane,
        }
    }
}

impl Handler for RemoteCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> DispatchResult<()> {
        let request = self.operation.request(ctx)?;
        info!(operation = self.operation.name(), "calling control plane");
        let body = self.control_plane.call(&request)?;
        render(ctx.out, &body)
    }

    fn name(&self) -> &'static str {
        self.operation.name()
    }
}

/// Arrays print one element per line, other values as pretty JSON.
fn render(out: &mut dyn Write, body: &Value) -> DispatchResult<()> {
    match body {
        Value::Null => Ok(()),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) => writeln!(out, "{s}"),
                    other => writeln!(out, "{other}"),
                }
                .with_context("write response")?;
            }
            Ok(())
        }
        other => {
            let pretty = serde_json::to_string_pretty(other)
                .map_err(|e| DispatchError::unclassified("render response", e))?;
            writeln!(out, "{pretty}").with_context("write response")
        }
    }
}
