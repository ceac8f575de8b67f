//! Stable codes for every diagnostic the parser emits.
//!
//! `E0xx` cover string literals, `E1xx` statement syntax and `E2xx`
//! validation of statements that parsed.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A string literal runs into a newline or the end of input.
    E001,
    /// A backslash not followed by `"`, `\`, `n` or `t`.
    E002,
    /// Input that does not start or continue a statement.
    E100,
    /// Input ends before the statement's `;`.
    E101,
    /// A second `canvas` statement.
    E201,
    /// A `member` attribute other than `tag`.
    E202,
}

impl ErrorCode {
    /// Short label text used next to the offending span.
    pub fn description(self) -> &'static str {
        match self {
            Self::E001 => "unterminated string literal",
            Self::E002 => "invalid escape sequence",
            Self::E100 => "unexpected input",
            Self::E101 => "incomplete statement",
            Self::E201 => "duplicate canvas",
            Self::E202 => "unknown attribute",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names are the codes themselves
        fmt::Debug::fmt(self, f)
    }
}
