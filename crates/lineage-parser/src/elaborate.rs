//! Elaboration of parsed statements into a [`FamilyTree`].
//!
//! Statements are applied in source order. This phase also reports the
//! errors that need more than one statement to detect (a second `canvas`)
//! or that concern attribute names rather than syntax.

use log::{debug, trace};

use lineage_core::semantic::{Canvas, FamilyTree};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    parser::{Attribute, Statement},
    span::Span,
};

/// Member attribute carrying the opaque styling tag.
const TAG_ATTRIBUTE: &str = "tag";

/// Builds a [`FamilyTree`] from statements, emitting into `diagnostics`.
pub(crate) struct Builder<'d> {
    tree: FamilyTree,
    canvas_span: Option<Span>,
    diagnostics: &'d mut DiagnosticCollector,
}

impl<'d> Builder<'d> {
    pub fn new(diagnostics: &'d mut DiagnosticCollector) -> Self {
        Self {
            tree: FamilyTree::default(),
            canvas_span: None,
            diagnostics,
        }
    }

    pub fn build(mut self, statements: &[(Statement<'_>, Span)]) -> FamilyTree {
        debug!(statements = statements.len(); "Building family tree");

        for (statement, span) in statements {
            trace!(statement:?; "Applying statement");
            match statement {
                Statement::Canvas { width, height } => self.apply_canvas(*width, *height, *span),
                Statement::Member {
                    id,
                    name,
                    attributes,
                } => {
                    let tag = self.member_tag(attributes);
                    self.tree.add_member(*id, name, tag);
                }
                Statement::Relation { kind, from, to } => {
                    self.tree.add_relation(*from, *to, *kind);
                }
            }
        }

        self.tree
    }

    fn apply_canvas(&mut self, width: f32, height: f32, span: Span) {
        if let Some(first) = self.canvas_span {
            self.diagnostics.emit(
                Diagnostic::error("canvas is declared more than once")
                    .with_code(ErrorCode::E201)
                    .with_label(span, ErrorCode::E201.description())
                    .with_secondary_label(first, "first declared here")
                    .with_help("keep a single `canvas` statement"),
            );
            return;
        }

        self.canvas_span = Some(span);
        self.tree.set_canvas(Canvas::new(width, height));
    }

    /// Returns the `tag` value, reporting every other attribute. A repeated
    /// `tag` keeps the last value.
    fn member_tag<'s>(&mut self, attributes: &'s [Attribute<'_>]) -> Option<&'s str> {
        let mut tag = None;
        for attribute in attributes {
            if attribute.key == TAG_ATTRIBUTE {
                tag = Some(attribute.value.as_str());
            } else {
                self.diagnostics.emit(
                    Diagnostic::error(format!("unknown attribute `{}`", attribute.key))
                        .with_code(ErrorCode::E202)
                        .with_label(attribute.span, ErrorCode::E202.description())
                        .with_help("the only supported member attribute is `tag`"),
                );
            }
        }
        tag
    }
}
