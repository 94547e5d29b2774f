//! CLI-level errors (wraps dispatch, config and tree errors)

use thiserror::Error;

use crate::application::error::DispatchError;
use crate::config::SettingsError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("configuration: {0}")]
    Config(#[from] SettingsError),

    #[error("command tree: {0}")]
    Tree(#[from] DomainError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Dispatch(_) | CliError::Tree(_) => crate::exitcode::SOFTWARE,
            CliError::Config(_) => crate::exitcode::CONFIG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_fatal_dispatch_error_when_mapping_exit_code_then_software() {
        let err = CliError::from(DispatchError::unclassified("boom", "defect"));

        assert_eq!(err.exit_code(), crate::exitcode::SOFTWARE);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn given_duplicate_command_when_mapping_exit_code_then_software() {
        let err = CliError::from(DomainError::DuplicateCommand {
            parent: "greengrass-cli".into(),
            name: "logs".into(),
        });

        assert_eq!(err.exit_code(), crate::exitcode::SOFTWARE);
    }
}
