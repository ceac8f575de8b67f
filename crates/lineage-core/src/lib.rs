//! Shared model and drawing primitives for Lineage.
//!
//! [`semantic::FamilyTree`] is what the parser produces and the layout
//! consumes. The [`draw`] module turns positioned members and connector
//! segments into layered SVG nodes.

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
