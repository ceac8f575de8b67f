//! # Lineage Parser
//!
//! Parser for the Lineage family tree source format. A source file is a list
//! of `;`-terminated statements:
//!
//! ```text
//! // comments run to the end of the line
//! canvas 1200 800;
//! member 1 "Grandfather A";
//! member 7 "Aunt Rose" [tag="in-law"];
//! spouse 1 2;
//! child 1 3;
//! sibling 4 6;
//! ```
//!
//! ## Usage
//!
//! ```
//! # use lineage_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         member 1 "Grandfather A";
//!         member 3 "Father";
//!         child 1 3;
//!     "#;
//!
//!     let tree = parse(source)?;
//!     assert_eq!(tree.members_count(), 2);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod parser;
mod span;

pub use error::ParseError;
pub use span::Span;

use log::debug;

use lineage_core::semantic::FamilyTree;

/// Parse source text into a [`FamilyTree`].
///
/// Syntax errors do not stop parsing: the parser skips to the next `;` and
/// continues, so the returned [`ParseError`] carries one diagnostic per
/// broken statement plus any validation errors in the statements that did
/// parse.
pub fn parse(source: &str) -> Result<FamilyTree, ParseError> {
    let (statements, mut diagnostics) = parser::parse_statements(source);
    debug!(statements = statements.len(); "Parsed source statements");

    let tree = elaborate::Builder::new(&mut diagnostics).build(&statements);
    diagnostics.finish()?;

    Ok(tree)
}
