//! Writing laid-out trees to output formats.
//!
//! Backends implement [`Exporter`]; their failures are [`Error`], which
//! becomes [`LineageError::Export`](crate::LineageError::Export) at the
//! crate boundary.

/// SVG export backend.
pub mod svg;

use std::io;

use thiserror::Error;

use lineage_core::semantic::FamilyTree;

use crate::layout::TreeLayout;

/// Abstraction for tree export backends.
pub trait Exporter {
    /// Writes `tree`, positioned by `layout`, to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the output fails.
    fn export_tree(
        &self,
        tree: &FamilyTree,
        layout: &TreeLayout,
        target: &mut dyn io::Write,
    ) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    /// A style value that cannot be turned into SVG attributes.
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
