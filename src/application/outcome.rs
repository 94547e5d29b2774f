//! Outcome classification: the single place a failure becomes an exit status.
//!
//! | Error | Outcome |
//! |-------|---------|
//! | parse error (any kind) | handled: message + usage, exit 0 |
//! | no subcommand selected | handled: message + usage, exit 0 |
//! | control plane rejected the request | handled: message + usage, exit 0 |
//! | anything else | fatal: propagated unchanged |
//!
//! A rejected control-plane request is reported like bad usage; that mirrors
//! how the tool has always behaved, even though the two failures mean
//! different things.

use crate::application::error::DispatchError;
use crate::domain::ParseErrorKind;
use crate::exitcode;
use crate::infrastructure::ServiceError;

/// How one invocation ends.
#[derive(Debug)]
pub enum Outcome<'e> {
    Success,
    HandledFailure { message: String, show_usage: bool },
    FatalFailure(&'e DispatchError),
}

impl Outcome<'_> {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success | Outcome::HandledFailure { .. } => exitcode::OK,
            Outcome::FatalFailure(_) => exitcode::SOFTWARE,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Outcome::FatalFailure(_))
    }
}

fn handled(message: String) -> Outcome<'static> {
    Outcome::HandledFailure {
        message,
        show_usage: true,
    }
}

/// Maps a failure to its outcome. Pure: depends only on the error's kind
/// and message.
pub fn classify(error: &DispatchError) -> Outcome<'_> {
    match error {
        DispatchError::Parse(e) => match e.kind {
            ParseErrorKind::UnmatchedArgument
            | ParseErrorKind::MissingParameter
            | ParseErrorKind::InvalidValue => handled(e.message.clone()),
        },
        DispatchError::NoCommandSelected { message, .. } => handled(message.clone()),
        DispatchError::Service(e @ ServiceError::Rejected { .. }) => handled(e.to_string()),
        other => Outcome::FatalFailure(other),
    }
}
