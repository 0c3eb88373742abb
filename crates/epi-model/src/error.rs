//! Error taxonomy shared across pipeline stages.
//!
//! Each crate keeps its own `thiserror` enum; every variant maps onto one of
//! these kinds so the orchestrator can report failures uniformly.

use std::fmt;

/// Classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source file or local transformed file absent.
    NotFound,
    /// Raw file cannot be parsed as a delimited table.
    MalformedInput,
    /// Missing required columns or zero data rows.
    SchemaInvalid,
    /// A caller handed a stage a value it cannot accept.
    ContractViolation,
    /// Environment not ready (e.g. missing credentials).
    Precondition,
    /// Filesystem, dataframe, HTTP or object-store error passed through as-is.
    Upstream,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::MalformedInput => "malformed_input",
            Self::SchemaInvalid => "schema_invalid",
            Self::ContractViolation => "contract_violation",
            Self::Precondition => "precondition",
            Self::Upstream => "upstream",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
