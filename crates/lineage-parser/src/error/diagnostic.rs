//! A single reported problem in a `.lineage` source file.

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// Whether a [`Label`] marks the offending text or points at related text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The text that caused the diagnostic.
    Primary,
    /// Related text, such as an earlier declaration.
    Context,
}

/// A message attached to a byte range of the source.
#[derive(Debug, Clone)]
pub struct Label {
    role: LabelRole,
    span: Span,
    message: String,
}

impl Label {
    pub fn role(&self) -> LabelRole {
        self.role
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.role == LabelRole::Primary
    }
}

/// A parse or validation error.
///
/// Every diagnostic is fatal: the tree is only built once the source
/// produces none. Rendered by the CLI roughly as:
///
/// ```text
/// error[E202]: unknown attribute `colour`
///   --> family.lineage:3:22
///    |
///  3 | member 7 "Aunt Rose" [colour="red"];
///    |                       ^^^^^^ unknown attribute
///    |
///    = help: the only supported member attribute is `tag`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    message: String,
    code: Option<ErrorCode>,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Starts a diagnostic with no code, labels or help.
    ///
    /// ```
    /// # use lineage_parser::error::{Diagnostic, ErrorCode};
    /// # use lineage_parser::Span;
    /// let diag = Diagnostic::error("expected `;`")
    ///     .with_code(ErrorCode::E100)
    ///     .with_label(Span::new(12..13), "unexpected input");
    /// assert_eq!(diag.primary_span(), Some(Span::new(12..13)));
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Marks `span` as the offending text.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(LabelRole::Primary, span, message)
    }

    /// Points at related text, e.g. the first of two conflicting statements.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(LabelRole::Context, span, message)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    fn push_label(mut self, role: LabelRole, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            role,
            span,
            message: message.into(),
        });
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "error[{code}]: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
