//! `logs list-log-files` and `logs get`

use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::application::error::{DispatchResult, IoResultExt};
use crate::application::handler::{CommandContext, Handler};
use crate::domain::{MessageId, ParseError, ParseErrorKind};
use crate::infrastructure::traits::FileSystem;

pub const LOG_DIR: &str = "log-dir";
pub const LOG_FILE: &str = "log-file";
pub const FILTER: &str = "filter";

fn is_log_file(path: &std::path::Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
}

/// Lists `*.log` files in `--log-dir`, or in the root's log directory.
pub struct ListLogFiles {
    fs: Arc<dyn FileSystem>,
    default_dir: Option<PathBuf>,
}

impl ListLogFiles {
    pub fn new(fs: Arc<dyn FileSystem>, default_dir: Option<PathBuf>) -> Self {
        Self { fs, default_dir }
    }
}

impl Handler for ListLogFiles {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> DispatchResult<()> {
        let dir = match ctx.args().get_one(LOG_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => self.default_dir.clone().ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::MissingParameter,
                    ctx.message(MessageId::MISSING_LOG_DIR),
                    ctx.path().to_vec(),
                )
            })?,
        };
        debug!(dir = %dir.display(), "listing log files");

        let files = self
            .fs
            .list_files(&dir)
            .with_path_context("list log directory", &dir)?;
        for file in files.iter().filter(|f| is_log_file(f)) {
            writeln!(ctx.out, "{}", file.display()).with_context("write log file list")?;
        }
        Ok(())
    }
}

/// Prints the lines of each `--log-file` matching every `--filter`.
pub struct GetLogs {
    fs: Arc<dyn FileSystem>,
}

impl GetLogs {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    fn filters(ctx: &CommandContext<'_>) -> DispatchResult<Vec<Regex>> {
        let mut filters = Vec::new();
        for pattern in ctx.args().get_many(FILTER) {
            let regex = Regex::new(pattern).map_err(|e| {
                ParseError::new(
                    ParseErrorKind::InvalidValue,
                    format!("{} '{}': {}", ctx.message(MessageId::INVALID_FILTER), pattern, e),
                    ctx.path().to_vec(),
                )
            })?;
            filters.push(regex);
        }
        Ok(filters)
    }
}

impl Handler for GetLogs {
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> DispatchResult<()> {
        let filters = Self::filters(ctx)?;
        let files: Vec<PathBuf> = ctx.args().get_many(LOG_FILE).iter().map(PathBuf::from).collect();

        // Every file is read before anything is written, so a failure leaves
        // no partial output behind.
        let contents = files
            .iter()
            .map(|file| {
                self.fs
                    .read_to_string(file)
                    .with_path_context("read log file", file)
            })
            .collect::<DispatchResult<Vec<String>>>()?;

        for line in contents
            .iter()
            .flat_map(|content| content.lines())
            .filter(|line| filters.iter().all(|f| f.is_match(line)))
        {
            writeln!(ctx.out, "{line}").with_context("write log line")?;
        }
        Ok(())
    }
}
