//! Control-plane client over the device's local IPC socket.
//!
//! One JSON request per line, one JSON response per line:
//!
//! ```text
//! -> {"operation":"ListComponents","params":{}}
//! <- {"status":"ok","body":[...]}
//! <- {"status":"error","message":"..."}
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::infrastructure::traits::{ControlPlane, Request};
use crate::infrastructure::{ServiceError, ServiceResult};

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Response {
    Ok {
        #[serde(default)]
        body: Value,
    },
    Error {
        message: String,
    },
}

/// Talks to the control plane through `<root>/<socket name>`.
#[derive(Debug, Clone)]
pub struct SocketControlPlane {
    socket: Option<PathBuf>,
    timeout: Duration,
}

impl SocketControlPlane {
    /// `root` is the installation root; `None` makes every call fail with
    /// [`ServiceError::NoRootPath`].
    pub fn new(root: Option<&Path>, socket_name: &str, timeout: Duration) -> Self {
        Self {
            socket: root.map(|r| r.join(socket_name)),
            timeout,
        }
    }

    fn decode(operation: &str, line: &str) -> ServiceResult<Value> {
        let response: Response =
            serde_json::from_str(line.trim_end()).map_err(|source| ServiceError::Protocol {
                operation: operation.to_string(),
                source,
            })?;
        match response {
            Response::Ok { body } => Ok(body),
            Response::Error { message } => Err(ServiceError::Rejected {
                operation: operation.to_string(),
                message,
            }),
        }
    }
}

#[cfg(unix)]
impl ControlPlane for SocketControlPlane {
    #[instrument(skip(self), fields(operation = %request.operation))]
    fn call(&self, request: &Request) -> ServiceResult<Value> {
        use std::io::{BufRead, BufReader, Write};
        use std::os::unix::net::UnixStream;

        let socket = self.socket.as_deref().ok_or(ServiceError::NoRootPath)?;
        let transport = |source| ServiceError::transport(socket, source);

        let mut line = serde_json::to_string(request).map_err(|source| ServiceError::Protocol {
            operation: request.operation.clone(),
            source,
        })?;
        line.push('\n');

        debug!(socket = %socket.display(), "connecting");
        let mut stream = UnixStream::connect(socket).map_err(transport)?;
        stream
            .set_read_timeout(Some(self.timeout))
            .map_err(transport)?;
        stream.write_all(line.as_bytes()).map_err(transport)?;

        let mut response = String::new();
        BufReader::new(&stream)
            .read_line(&mut response)
            .map_err(transport)?;
        debug!(bytes = response.len(), "response received");

        Self::decode(&request.operation, &response)
    }
}

#[cfg(not(unix))]
impl ControlPlane for SocketControlPlane {
    fn call(&self, _request: &Request) -> ServiceResult<Value> {
        let socket = self.socket.as_deref().ok_or(ServiceError::NoRootPath)?;
        Err(ServiceError::transport(
            socket,
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "unix domain sockets are not available on this platform",
            ),
        ))
    }
}
