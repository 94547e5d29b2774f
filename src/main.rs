use std::process;
use std::sync::Arc;

use ggcli::application::catalog::{MessageCatalog, TomlCatalog};
use ggcli::cli::output;
use ggcli::cli::{tree, CliError, CliResult};
use ggcli::config::Settings;
use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    setup_logging();

    let argv: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    match run(&argv) {
        Ok(code) => process::exit(code),
        Err(e) => {
            output::fatal(&e);
            process::exit(e.exit_code());
        }
    }
}

fn run(argv: &[String]) -> CliResult<i32> {
    let settings = Arc::new(Settings::load()?);
    let catalog = catalog(&settings)?;
    let dispatcher = tree::dispatcher(settings, catalog)?;
    dispatcher.run(argv).map_err(CliError::from)
}

fn catalog(settings: &Settings) -> CliResult<Arc<dyn MessageCatalog>> {
    let bundled = TomlCatalog::bundled();
    let catalog = match &settings.messages {
        Some(path) => {
            debug!(path = %path.display(), "overlaying message catalog");
            bundled.overlay(TomlCatalog::load(path)?)
        }
        None => bundled,
    };
    Ok(Arc::new(catalog))
}

/// Logs go to stderr, filtered by `GGCLI_LOG` (default: warn).
fn setup_logging() {
    let filter = EnvFilter::try_from_env("GGCLI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
