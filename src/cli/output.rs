//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::error::Error;

use colored::Colorize;

/// Error line with a red bold "error:" prefix
pub fn error_text(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("{}: {}", "error".red().bold(), msg)
}

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", error_text(msg));
}

/// Print a fatal failure and its source chain to stderr
pub fn fatal(err: &(dyn Error + 'static)) {
    let mut chain = chain(err).into_iter();
    if let Some(head) = chain.next() {
        error(&head);
    }
    for cause in chain {
        eprintln!("  {} {}", "caused by:".yellow(), cause);
    }
}

/// Source chain of `err`, outermost first
pub fn chain(err: &(dyn Error + 'static)) -> Vec<String> {
    std::iter::successors(Some(err), |&e| e.source())
        .map(ToString::to_string)
        .collect()
}
