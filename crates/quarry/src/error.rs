//! Error types for quarry.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while accumulating, compiling, or executing a query.
///
/// The diagnostic code groups variants by kind: `quarry::argument` for
/// malformed input, `quarry::state` for a terminal call on incomplete build
/// state, `quarry::execution` for failures reported by the database.
#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    #[error("{0} requires at least one column/value pair")]
    #[diagnostic(
        code(quarry::argument),
        help("Pass ordered (column, value) pairs, e.g. built with the values! macro")
    )]
    EmptyValues(&'static str),

    #[error("OFFSET {0} without LIMIT")]
    #[diagnostic(
        code(quarry::argument),
        help("SQLite only accepts OFFSET after LIMIT; set a limit or drop the offset")
    )]
    OffsetWithoutLimit(u64),

    #[error("invalid sort direction: {0}")]
    #[diagnostic(code(quarry::argument), help("Use ASC or DESC (case-insensitive)"))]
    InvalidDirection(String),

    #[error("no target table set")]
    #[diagnostic(
        code(quarry::state),
        help("Call table() before a terminal operation")
    )]
    MissingTable,

    #[error("query execution failed: {0}")]
    #[diagnostic(code(quarry::execution))]
    Execution(#[from] rusqlite::Error),

    #[error("database handle poisoned by a panicked thread")]
    #[diagnostic(code(quarry::execution))]
    Poisoned,
}

/// Result type alias for quarry operations.
pub type Result<T> = std::result::Result<T, QueryError>;
