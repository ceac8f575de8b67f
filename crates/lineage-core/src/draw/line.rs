//! Straight connector segments.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
};

/// A straight segment between two absolute points, drawn on a fixed layer.
///
/// Stubs, baselines, trunks and spouse lines are all `Line`s; only their
/// stroke and layer differ.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    stroke: &'a StrokeDefinition,
    start: Point,
    end: Point,
    layer: RenderLayer,
}

impl<'a> Line<'a> {
    pub fn new(stroke: &'a StrokeDefinition, start: Point, end: Point, layer: RenderLayer) -> Self {
        Self {
            stroke,
            start,
            end,
            layer,
        }
    }

    /// Renders the segment as an SVG `<line>` into a single-item output.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let line = svg_element::Line::new()
            .set("x1", self.start.x())
            .set("y1", self.start.y())
            .set("x2", self.end.x())
            .set("y2", self.end.y());
        let line = apply_stroke!(line, self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(self.layer, Box::new(line));
        output
    }
}
