//! Error and diagnostic system for the Lineage parser.
//!
//! A [`Diagnostic`] is one fatal problem: a message, an optional
//! [`ErrorCode`], labelled source spans and help text. Parsing keeps going
//! after a broken statement, and everything found is handed back at once in
//! a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use lineage_parser::error::{Diagnostic, ErrorCode};
//! # use lineage_parser::Span;
//!
//! let diag = Diagnostic::error("canvas is declared more than once")
//!     .with_code(ErrorCode::E201)
//!     .with_label(Span::new(40..58), "duplicate canvas")
//!     .with_secondary_label(Span::new(0..17), "first declared here")
//!     .with_help("keep a single `canvas` statement");
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "error[E201]: canvas is declared more than once"
//! );
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, Label, LabelRole};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
