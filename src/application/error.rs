//! Dispatch errors: the closed set every layer reports through

use std::path::Path;

use thiserror::Error;

use crate::domain::{HandlerId, ParseError};
use crate::infrastructure::ServiceError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures producing a handler instance.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The strategy has no binding for this handler type. Only this variant
    /// sends the builder to its fallback.
    #[error("no binding registered for handler '{0}'")]
    NoBinding(HandlerId),

    #[error("no default construction for handler '{0}'")]
    Unconstructible(HandlerId),

    #[error("failed to construct handler '{id}'")]
    Failed {
        id: HandlerId,
        #[source]
        source: BoxError,
    },
}

impl BuildError {
    pub fn failed(id: HandlerId, source: impl Into<BoxError>) -> Self {
        Self::Failed {
            id,
            source: source.into(),
        }
    }
}

/// Everything that can go wrong between parsing and handler completion.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A root or group command ran without a subcommand.
    #[error("{message}")]
    NoCommandSelected { path: Vec<String>, message: String },

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("{context}")]
    Unclassified {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    pub fn unclassified(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Unclassified {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Command path whose usage belongs with this error, when the error knows it.
    pub fn usage_path(&self) -> Option<&[String]> {
        match self {
            Self::Parse(e) => Some(e.path.as_slice()),
            Self::NoCommandSelected { path, .. } => Some(path.as_slice()),
            _ => None,
        }
    }
}

/// Result type for handler execution.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Extension trait for converting `io::Result` to `DispatchResult` with context.
pub trait IoResultExt<T> {
    /// Add context to an I/O error.
    fn with_context(self, action: &str) -> DispatchResult<T>;

    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read log file", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> DispatchResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_context(self, action: &str) -> DispatchResult<T> {
        self.map_err(|e| DispatchError::unclassified(action, e))
    }

    fn with_path_context(self, action: &str, path: &Path) -> DispatchResult<T> {
        self.map_err(|e| DispatchError::unclassified(format!("{}: {}", action, path.display()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParseErrorKind;
    use std::error::Error as _;

    #[test]
    fn given_io_error_when_adding_path_context_then_unclassified_with_source() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));

        let err = result
            .with_path_context("read log file", Path::new("/var/x.log"))
            .unwrap_err();

        assert_eq!(err.to_string(), "read log file: /var/x.log");
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }

    #[test]
    fn given_parse_error_when_asking_usage_path_then_returns_matched_prefix() {
        let err = DispatchError::from(ParseError::new(
            ParseErrorKind::UnmatchedArgument,
            "unexpected argument",
            vec!["logs".into()],
        ));

        assert_eq!(err.usage_path(), Some(&["logs".to_string()][..]));
        assert_eq!(err.to_string(), "unexpected argument");
    }

    #[test]
    fn given_service_error_when_asking_usage_path_then_none() {
        let err = DispatchError::from(ServiceError::NoRootPath);

        assert!(err.usage_path().is_none());
    }
}
