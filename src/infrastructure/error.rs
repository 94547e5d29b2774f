//! Errors raised by the control-plane client

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the control plane the CLI drives.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The control plane answered, and refused the request.
    #[error("{operation} rejected by the control plane: {message}")]
    Rejected { operation: String, message: String },

    #[error("control plane unreachable at {}", socket.display())]
    Transport {
        socket: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed control-plane exchange for {operation}")]
    Protocol {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("installation root path not set; pass --ggcRootPath or set GGCLI_ROOT_PATH")]
    NoRootPath,
}

impl ServiceError {
    pub fn transport(socket: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Transport {
            socket: socket.into(),
            source,
        }
    }

    /// True when the control plane itself refused the call.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Result type for control-plane calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
