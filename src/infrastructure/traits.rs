//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing handlers
//! to be tested with mock implementations.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::infrastructure::ServiceResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List the regular files directly inside a directory, sorted.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// One request to the control plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub operation: String,
    pub params: BTreeMap<String, Value>,
}

impl Request {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Client for the device's control plane.
pub trait ControlPlane: Send + Sync {
    /// Send one request, return the response body.
    fn call(&self, request: &Request) -> ServiceResult<Value>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}
