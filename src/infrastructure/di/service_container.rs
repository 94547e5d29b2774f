//! Service container for dependency injection
//!
//! The dependency graph registered handler factories resolve from.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::domain::RootConfig;
use crate::infrastructure::control_plane::SocketControlPlane;
use crate::infrastructure::traits::{ControlPlane, FileSystem, RealFileSystem};

/// Container holding the shared, read-only services of one invocation.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Root-level options, shared by value with every handler
    pub root: RootConfig,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Control-plane client
    pub control_plane: Arc<dyn ControlPlane>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Arc<Settings>, root: RootConfig) -> Self {
        let control_plane = SocketControlPlane::new(
            root.root_path().map(std::path::Path::new),
            &settings.ipc_socket,
            Duration::from_secs(settings.timeout_secs),
        );
        Self::with_deps(
            settings,
            root,
            Arc::new(RealFileSystem),
            Arc::new(control_plane),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Arc<Settings>,
        root: RootConfig,
        fs: Arc<dyn FileSystem>,
        control_plane: Arc<dyn ControlPlane>,
    ) -> Self {
        Self {
            settings,
            root,
            fs,
            control_plane,
        }
    }

    /// Log directory below the installation root, if the root is known.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.root
            .root_path()
            .map(|root| PathBuf::from(root).join(&self.settings.log_dir))
    }
}
