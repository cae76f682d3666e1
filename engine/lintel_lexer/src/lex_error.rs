//! Recoverable tokenization failure.
//!
//! A `LexError` means the translation unit cannot be analyzed; the caller
//! abandons the unit and moves on. This is the recoverable tier of the
//! error model; structural corruption found later is `InternalError`.

use std::fmt;

/// Why tokenization failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A byte sequence no token class matches.
    InvalidToken,
    /// `#endfile` without a matching `#file`.
    UnbalancedFileDirective,
    /// `#file` not followed by a quoted path.
    MalformedFileDirective,
}

/// Tokenization failure with the line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// 1-based line in the file being read when the failure occurred.
    pub line: u32,
    /// What went wrong.
    pub kind: LexErrorKind,
}

impl LexError {
    pub(crate) fn new(line: u32, kind: LexErrorKind) -> Self {
        LexError { line, kind }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            LexErrorKind::InvalidToken => "invalid token",
            LexErrorKind::UnbalancedFileDirective => "#endfile without matching #file",
            LexErrorKind::MalformedFileDirective => "#file without a quoted path",
        };
        write!(f, "line {}: {}", self.line, what)
    }
}

impl std::error::Error for LexError {}
