//! End-to-end dispatch: parse, build, execute, classify, exit code

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tempfile::TempDir;

use ggcli::application::catalog::TomlCatalog;
use ggcli::application::error::{BuildError, DispatchError, DispatchResult};
use ggcli::application::handler::{CommandContext, Handler};
use ggcli::cli::tree;
use ggcli::cli::{CliError, Dispatcher};
use ggcli::config::Settings;
use ggcli::exitcode;
use ggcli::infrastructure::di::ServiceContainer;
use ggcli::infrastructure::traits::{ControlPlane, RealFileSystem, Request};
use ggcli::infrastructure::{ServiceError, ServiceResult};

/// Control plane answering every call with a canned reply.
struct StubControlPlane {
    reply: Box<dyn Fn(&Request) -> ServiceResult<Value> + Send + Sync>,
    calls: Mutex<Vec<Request>>,
}

impl StubControlPlane {
    fn new(reply: impl Fn(&Request) -> ServiceResult<Value> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Request> {
        self.calls.lock().unwrap().clone()
    }
}

impl ControlPlane for StubControlPlane {
    fn call(&self, request: &Request) -> ServiceResult<Value> {
        self.calls.lock().unwrap().push(request.clone());
        (self.reply)(request)
    }
}

/// Fails with an error no policy anticipates.
struct Defective;

impl Handler for Defective {
    fn execute(&mut self, _ctx: &mut CommandContext<'_>) -> DispatchResult<()> {
        Err(DispatchError::unclassified(
            "component list",
            "handler state corrupted",
        ))
    }
}

fn dispatcher(settings: Settings) -> Dispatcher {
    tree::dispatcher(Arc::new(settings), Arc::new(TomlCatalog::bundled())).unwrap()
}

fn with_control_plane(settings: Settings, stub: &Arc<StubControlPlane>) -> Dispatcher {
    let control_plane: Arc<dyn ControlPlane> = stub.clone();
    dispatcher(settings).with_services(move |settings, root| {
        ServiceContainer::with_deps(settings, root, Arc::new(RealFileSystem), control_plane.clone())
    })
}

struct Run {
    result: Result<i32, DispatchError>,
    out: String,
    err: String,
}

fn run(dispatcher: &Dispatcher, args: &[&str]) -> Run {
    colored::control::set_override(false);
    let argv: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = dispatcher.run_with(&argv, &mut out, &mut err);
    Run {
        result,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

#[test]
fn given_leaf_command_when_dispatching_then_handler_output_and_success() {
    let stub = StubControlPlane::new(|_| Ok(json!(["main", "aws.greengrass.Nucleus"])));
    let dispatcher = with_control_plane(Settings::default(), &stub);

    let run = run(&dispatcher, &["--ggcRootPath", "/greengrass/v2", "component", "list"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert_eq!(run.out, "main\naws.greengrass.Nucleus\n");
    assert!(run.err.is_empty());
    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].operation, "ListComponents");
}

#[test]
fn given_options_when_dispatching_then_request_carries_them() {
    let stub = StubControlPlane::new(|_| Ok(json!({ "deploymentId": "d-1" })));
    let dispatcher = with_control_plane(Settings::default(), &stub);

    let run = run(
        &dispatcher,
        &["deployment", "create", "-m", "com.example.Hello=1.0.0", "--remove", "old"],
    );

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.contains("\"deploymentId\": \"d-1\""));
    let request = &stub.calls()[0];
    assert_eq!(request.params["rootComponentVersionsToAdd"], json!({ "com.example.Hello": "1.0.0" }));
    assert_eq!(request.params["rootComponentsToRemove"], json!(["old"]));
}

#[test]
fn given_no_arguments_when_dispatching_then_missing_command_and_root_usage() {
    let run = run(&dispatcher(Settings::default()), &[]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.err.is_empty());
    assert!(run.out.contains("Missing required subcommand"));
    assert!(run.out.contains("deployment"));
}

#[test]
fn given_group_without_subcommand_when_dispatching_then_group_usage_shown() {
    let run = run(&dispatcher(Settings::default()), &["logs"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.contains("Missing required subcommand"));
    assert!(run.out.contains("list-log-files"));
}

#[test]
fn given_unknown_subcommand_when_dispatching_then_handled_with_usage() {
    let run = run(&dispatcher(Settings::default()), &["component", "bogus"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.starts_with("error: "));
    assert!(run.out.contains("restart"));
}

#[test]
fn given_unknown_flag_after_group_when_dispatching_then_group_usage_and_success() {
    let run = run(
        &dispatcher(Settings::default()),
        &["--ggcRootPath=/opt/x", "logs", "--unknown-flag"],
    );

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.contains("--unknown-flag"));
    assert!(run.out.contains("list-log-files"));
    assert!(run.err.is_empty());
}

#[test]
fn given_missing_required_option_when_dispatching_then_handled_with_usage() {
    let run = run(&dispatcher(Settings::default()), &["deployment", "status"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.contains("--deploymentId"));
}

#[test]
fn given_rejected_request_when_dispatching_then_handled_like_bad_usage() {
    let stub = StubControlPlane::new(|request| {
        Err(ServiceError::Rejected {
            operation: request.operation.clone(),
            message: "component not found".into(),
        })
    });
    let dispatcher = with_control_plane(Settings::default(), &stub);

    let run = run(&dispatcher, &["component", "restart", "-n", "ghost"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run
        .out
        .contains("RestartComponents rejected by the control plane: component not found"));
    assert!(run.out.contains("--names"));
}

#[test]
fn given_unreachable_control_plane_when_dispatching_then_fatal_propagated() {
    let stub = StubControlPlane::new(|_| {
        Err(ServiceError::transport(
            "/greengrass/v2/ipc.socket",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        ))
    });
    let dispatcher = with_control_plane(Settings::default(), &stub);

    let run = run(&dispatcher, &["service", "status", "-n", "main"]);

    assert!(matches!(
        run.result,
        Err(DispatchError::Service(ServiceError::Transport { .. }))
    ));
    assert!(run.out.is_empty());
}

#[test]
fn given_no_root_path_anywhere_when_calling_control_plane_then_fatal() {
    let run = run(&dispatcher(Settings::default()), &["component", "list"]);

    assert!(matches!(
        run.result,
        Err(DispatchError::Service(ServiceError::NoRootPath))
    ));
}

#[test]
fn given_defective_handler_when_dispatching_then_error_returned_unchanged() {
    let dispatcher = dispatcher(Settings::default()).with_bindings(tree::bindings().bind(
        tree::COMPONENT_LIST,
        |_: &ServiceContainer| -> Result<Box<dyn Handler>, BuildError> { Ok(Box::new(Defective)) },
    ));

    let run = run(&dispatcher, &["component", "list"]);

    let err = match run.result {
        Err(err) => err,
        Ok(code) => panic!("expected fatal failure, got exit code {code}"),
    };
    match &err {
        DispatchError::Unclassified { context, source } => {
            assert_eq!(context, "component list");
            assert_eq!(source.to_string(), "handler state corrupted");
        }
        other => panic!("expected unclassified failure, got {other:?}"),
    }
    assert_ne!(CliError::from(err).exit_code(), exitcode::OK);
    assert!(run.out.is_empty());
}

#[test]
fn given_unbuildable_handler_when_dispatching_then_build_error_is_fatal() {
    let dispatcher = dispatcher(Settings::default()).with_defaults(Default::default());

    let run = run(&dispatcher, &["help"]);

    assert!(matches!(
        run.result,
        Err(DispatchError::Build(BuildError::Unconstructible(id))) if id == tree::HELP
    ));
}

#[test]
fn given_malformed_root_option_when_dispatching_then_usage_exit() {
    let run = run(&dispatcher(Settings::default()), &["--ggcRootPath"]);

    assert_eq!(run.result.unwrap(), exitcode::USAGE);
    assert!(run.err.contains("ggcRootPath"));
}

#[test]
fn given_help_topic_when_dispatching_then_usage_on_stdout() {
    let run = run(&dispatcher(Settings::default()), &["help", "component", "restart"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.contains("--names"));
    assert!(run.err.is_empty());
}

#[test]
fn given_unknown_help_topic_when_dispatching_then_handled() {
    let run = run(&dispatcher(Settings::default()), &["help", "bogus"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.contains("Unknown subcommand: 'bogus'"));
}

#[test]
fn given_root_path_option_when_listing_logs_then_root_log_dir_used() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("logs")).unwrap();
    std::fs::write(temp.path().join("logs").join("greengrass.log"), "").unwrap();
    let root = temp.path().display().to_string();

    let run = run(
        &dispatcher(Settings::default()),
        &["--ggcRootPath", &root, "logs", "list-log-files"],
    );

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.trim_end().ends_with("greengrass.log"));
}

#[test]
fn given_root_path_only_in_settings_when_listing_logs_then_settings_used() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("logs")).unwrap();
    std::fs::write(temp.path().join("logs").join("main.log"), "").unwrap();
    let settings = Settings {
        root_path: Some(temp.path().display().to_string()),
        ..Settings::default()
    };

    let run = run(&dispatcher(settings), &["logs", "list-log-files"]);

    assert_eq!(run.result.unwrap(), exitcode::OK);
    assert!(run.out.trim_end().ends_with("main.log"));
}
