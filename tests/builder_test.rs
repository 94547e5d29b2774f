//! Tests for two-tier handler construction

use std::sync::Arc;

use ggcli::application::builder::{build, DefaultConstructor, HandlerBindings, Injector};
use ggcli::application::error::{BuildError, DispatchResult};
use ggcli::application::handler::{CommandContext, Handler};
use ggcli::cli::tree;
use ggcli::config::Settings;
use ggcli::domain::{HandlerId, RootConfig};
use ggcli::infrastructure::di::ServiceContainer;

const STATUS: HandlerId = HandlerId::new("status");

/// Records which strategy built it.
struct StatusCommand {
    via: &'static str,
}

impl Default for StatusCommand {
    fn default() -> Self {
        Self { via: "default" }
    }
}

impl Handler for StatusCommand {
    fn execute(&mut self, _ctx: &mut CommandContext<'_>) -> DispatchResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.via
    }
}

fn container(root: Option<&str>) -> ServiceContainer {
    ServiceContainer::new(
        Arc::new(Settings::default()),
        RootConfig::new(root.map(str::to_string)),
    )
}

#[test]
fn given_primary_binding_when_building_then_primary_used() {
    let services = container(Some("/greengrass/v2"));
    let bindings = HandlerBindings::new().bind(STATUS, |c: &ServiceContainer| -> Result<Box<dyn Handler>, BuildError> {
        assert_eq!(c.root.root_path(), Some("/greengrass/v2"));
        Ok(Box::new(StatusCommand { via: "injector" }))
    });
    let defaults = DefaultConstructor::new().register::<StatusCommand>(STATUS);

    let handler = build(STATUS, &Injector::new(&bindings, &services), &defaults).unwrap();

    assert_eq!(handler.name(), "injector");
}

#[test]
fn given_no_primary_binding_when_building_then_falls_back_to_default() {
    let services = container(None);
    let bindings = HandlerBindings::new();
    let defaults = DefaultConstructor::new().register::<StatusCommand>(STATUS);

    let handler = build(STATUS, &Injector::new(&bindings, &services), &defaults).unwrap();

    assert_eq!(handler.name(), "default");
}

#[test]
fn given_neither_strategy_knows_handler_when_building_then_fallback_error_surfaces() {
    let services = container(None);
    let bindings = HandlerBindings::new();
    let defaults = DefaultConstructor::new();

    let err = build(STATUS, &Injector::new(&bindings, &services), &defaults).err().unwrap();

    assert!(matches!(err, BuildError::Unconstructible(id) if id == STATUS));
}

#[test]
fn given_primary_fails_otherwise_when_building_then_no_fallback() {
    let services = container(None);
    let bindings = HandlerBindings::new().bind(STATUS, |_: &ServiceContainer| -> Result<Box<dyn Handler>, BuildError> {
        Err(BuildError::failed(STATUS, "control plane socket unusable"))
    });
    let defaults = DefaultConstructor::new().register::<StatusCommand>(STATUS);

    let err = build(STATUS, &Injector::new(&bindings, &services), &defaults).err().unwrap();

    assert!(matches!(err, BuildError::Failed { id, .. } if id == STATUS));
}

#[test]
fn given_tool_wiring_when_building_each_bound_handler_then_injector_builds_it() {
    let services = container(Some("/greengrass/v2"));
    let bindings = tree::bindings();
    let defaults = DefaultConstructor::new();
    let injector = Injector::new(&bindings, &services);

    for id in [
        tree::COMPONENT_LIST,
        tree::COMPONENT_RESTART,
        tree::DEPLOYMENT_CREATE,
        tree::SERVICE_STATUS,
        tree::LOGS_GET,
        tree::LOGS_LIST_FILES,
    ] {
        assert!(build(id, &injector, &defaults).is_ok(), "{id} not built");
    }
}

#[test]
fn given_tool_wiring_when_building_help_then_default_construction_used() {
    let services = container(None);
    let bindings = tree::bindings();
    let injector = Injector::new(&bindings, &services);

    let handler = build(tree::HELP, &injector, &tree::defaults()).unwrap();

    assert!(handler.name().ends_with("HelpCommand"));
}
