//! Turns [`LineageError`] into miette reports.
//!
//! A parse failure becomes one [`Reportable`] per diagnostic, each borrowing
//! the source so miette can draw the labelled snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use lineage::LineageError;
use lineage_parser::{
    Span,
    error::{Diagnostic, Label},
};

type BoxedDisplay<'a> = Box<dyn fmt::Display + 'a>;

/// A single report for the terminal.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic and the text it was found in.
    Source { diag: &'a Diagnostic, src: &'a str },
    /// Any error without a source location.
    Plain(&'a LineageError),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Source { diag, .. } => f.write_str(diag.message()),
            Reportable::Plain(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Source { .. } => None,
            Reportable::Plain(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<BoxedDisplay<'a>> {
        match self {
            Reportable::Source { diag, .. } => {
                diag.code().map(|code| Box::new(code) as BoxedDisplay<'a>)
            }
            Reportable::Plain(err) => plain_code(err).map(|code| Box::new(code) as BoxedDisplay<'a>),
        }
    }

    fn help<'a>(&'a self) -> Option<BoxedDisplay<'a>> {
        let help = match self {
            Reportable::Source { diag, .. } => diag.help()?,
            Reportable::Plain(LineageError::Config(_)) => {
                "check the file given with --config, or lineage/config.toml"
            }
            Reportable::Plain(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Reportable::Source { src, .. } => Some(src as &dyn SourceCode),
            Reportable::Plain(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Source { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }
        Some(Box::new(diag.labels().iter().map(labeled_span)))
    }
}

fn plain_code(err: &LineageError) -> Option<&'static str> {
    match err {
        LineageError::Io(_) => Some("lineage::io"),
        LineageError::Config(_) => Some("lineage::config"),
        LineageError::Export(_) => Some("lineage::export"),
        LineageError::Parse { .. } => None,
    }
}

fn labeled_span(label: &Label) -> LabeledSpan {
    let span = to_source_span(label.span());
    let text = Some(label.message().to_string());
    if label.is_primary() {
        LabeledSpan::new_primary_with_span(text, span)
    } else {
        LabeledSpan::new_with_span(text, span)
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// One report per parser diagnostic, or a single plain report.
pub fn to_reportables(err: &LineageError) -> Vec<Reportable<'_>> {
    match err {
        LineageError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Source { diag, src })
            .collect(),
        _ => vec![Reportable::Plain(err)],
    }
}
