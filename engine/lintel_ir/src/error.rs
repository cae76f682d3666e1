//! The fatal structural-error channel.
//!
//! Ordinary "not found" outcomes are `Option`/`bool` sentinels and lexer
//! failures are recoverable `Result`s; an `InternalError` means the token
//! sequence or its AST violated an invariant that every downstream pass
//! relies on. The per-unit driver catches it, abandons the unit, and
//! continues with the next one.

use std::fmt;

/// Invariant violation inside the tokenized IR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalError {
    /// `"path:line"` of the token nearest the violation, or a pass name.
    pub location: String,
    /// What was violated.
    pub message: String,
    /// Optional human-readable dump of the offending structure.
    pub details: Option<String>,
}

impl InternalError {
    /// Create an error without a dump.
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        InternalError {
            location: location.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach a structure dump to the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal error at {}: {}", self.location, self.message)?;
        if let Some(details) = &self.details {
            write!(f, "\n{details}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InternalError {}
