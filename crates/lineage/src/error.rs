use std::io;

use thiserror::Error;

use lineage_parser::{ParseError, error::Diagnostic};

use crate::export;

/// Everything that can stop a family tree from being rendered.
#[derive(Debug, Error)]
pub enum LineageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source diagnostics, with the text they point into.
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl LineageError {
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Parser diagnostics, empty for every other kind of error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Parse { err, .. } => err.diagnostics(),
            _ => &[],
        }
    }
}
