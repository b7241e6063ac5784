//! The single error surface the pipeline exposes (§4.11).

use thiserror::Error;

/// Every way `minify()` (or the frontend it calls) can fail.
///
/// Each variant formats a one-line message suitable for printing directly
/// to stderr — no ANSI color, no multi-line spans (§7).
#[derive(Debug, Error)]
pub enum CompileError {
    /// The frontend (`ressa`) rejected the source.
    #[error("parse error: {message}")]
    ParseError { message: String },

    /// A contract violation inside the core: an unknown node kind, a
    /// missing scope, or inconsistent rename maps. `invariant` is an
    /// internal tag naming what was violated, surfaced only through
    /// `Debug` and test assertions, never to end users.
    #[error("internal error")]
    InternalError { invariant: &'static str },

    /// Reading the input file or writing the output stream failed.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CompileError {
    pub fn internal(invariant: &'static str) -> Self {
        CompileError::InternalError { invariant }
    }
}
