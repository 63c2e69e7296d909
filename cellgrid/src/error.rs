//! Error types

use thiserror::Error;

/// Errors surfaced by the table core.
///
/// Only faults with no safe degraded behavior are reported here. Everything
/// recoverable (a cell whose column vanished, removal of an unknown row) is
/// logged and skipped at the boundary of the offending row or cell.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The supplied row input cannot be diffed at all.
    #[error(
        "cannot find a differ supporting object of type '{type_name}'; only row collections can be diffed"
    )]
    UnsupportedCollection {
        /// Type name of the rejected input.
        type_name: &'static str,
    },

    /// A column width token that does not parse.
    #[error("invalid width '{token}': expected <integer><unit> with unit one of px, %, ch, rem, fr")]
    InvalidWidth {
        /// The offending token.
        token: String,
    },
}

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
