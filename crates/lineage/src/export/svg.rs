//! SVG rendering of laid-out family trees.
//!
//! Output is assembled in a [`LayeredOutput`] so that z-order is fixed by
//! [`RenderLayer`] rather than by emission order: stubs, baselines,
//! parent/child connectors and spouse lines sit below the member boxes.

use std::{collections::BTreeMap, io};

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace};
use svg::{Document, node::element as svg_element};

use lineage_core::{
    color::Color,
    draw::{
        BoxDefinition, Drawable, LabelDefinition, LayeredOutput, Line, MemberBox, RenderLayer,
        StrokeDefinition, WrappedLabel,
    },
    geometry::Point,
    identifier::MemberId,
    semantic::{FamilyTree, RelationKind},
};

use crate::{
    config::StyleConfig,
    export::{self, Exporter},
    layout::TreeLayout,
};

/// Vertical distance between the tallest box of a row and its baseline.
const BASELINE_GUTTER: f32 = 8.0;
/// Horizontal overhang of a baseline past its outermost stubs.
const BASELINE_MARGIN: f32 = 10.0;
/// Distance from a box top to the spouse line.
const SPOUSE_LINE_OFFSET: f32 = 20.0;

/// Builder for [`Svg`] renderers.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    label: Option<LabelDefinition>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors and strokes to render with. Defaults to [`StyleConfig::default`].
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Label wrapping and typography. Must match the definition the layout
    /// was computed with, or box heights will disagree.
    pub fn with_label(mut self, label: LabelDefinition) -> Self {
        self.label = Some(label);
        self
    }

    /// Builds the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color or stroke
    /// pattern cannot be parsed.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style;
        let style = match self.style {
            Some(style) => style,
            None => {
                default_style = StyleConfig::default();
                &default_style
            }
        };

        Ok(Svg {
            connector_stroke: style.connector_stroke().map_err(export::Error::Render)?,
            spouse_stroke: style.spouse_stroke().map_err(export::Error::Render)?,
            box_definition: style.box_definition().map_err(export::Error::Render)?,
            background: style.background_color().map_err(export::Error::Render)?,
            label: self.label.unwrap_or_default(),
        })
    }
}

/// SVG renderer for a [`FamilyTree`] and its [`TreeLayout`].
#[derive(Debug, Clone)]
pub struct Svg {
    connector_stroke: StrokeDefinition,
    spouse_stroke: StrokeDefinition,
    box_definition: BoxDefinition,
    background: Option<Color>,
    label: LabelDefinition,
}

impl Default for Svg {
    fn default() -> Self {
        let connector = Color::new("#444").expect("'#444' is a valid CSS color");
        let spouse = Color::new("#666").expect("'#666' is a valid CSS color");
        Self {
            connector_stroke: StrokeDefinition::solid(connector, 2.0),
            spouse_stroke: StrokeDefinition::dashed(spouse, 2.0),
            box_definition: BoxDefinition::default(),
            background: None,
            label: LabelDefinition::default(),
        }
    }
}

impl Svg {
    /// Renders `tree` at the positions in `layout`.
    ///
    /// The document has the tree's canvas size. Relations whose endpoints
    /// are not members are skipped.
    pub fn render(&self, tree: &FamilyTree, layout: &TreeLayout) -> Document {
        let canvas = tree.canvas();
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", canvas.width(), canvas.height()))
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(color) = self.background {
            let background = svg_element::Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", &color);
            doc = doc.add(background);
        }

        for node in self.render_layers(tree, layout).render() {
            doc = doc.add(node);
        }

        debug!(members = layout.len(); "SVG document rendered");
        doc
    }

    /// Collects every element of the drawing, tagged by layer.
    pub fn render_layers(&self, tree: &FamilyTree, layout: &TreeLayout) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let baselines = self.baselines(layout);
        trace!(baselines:?; "Row baselines");

        output.merge(self.render_stubs(layout, &baselines));
        output.merge(self.render_baselines(layout, &baselines));
        output.merge(self.render_connectors(tree, layout, &baselines));
        output.merge(self.render_spouse_lines(tree, layout));
        output.merge(self.render_members(tree, layout));
        output
    }

    /// Baseline y per row: the lowest box bottom plus the gutter.
    fn baselines(&self, layout: &TreeLayout) -> BTreeMap<i32, f32> {
        let mut baselines: BTreeMap<i32, f32> = BTreeMap::new();
        for (_, placement) in layout.placements() {
            let bottom = placement.position().y() + placement.box_height() + BASELINE_GUTTER;
            baselines
                .entry(placement.row())
                .and_modify(|y| *y = y.max(bottom))
                .or_insert(bottom);
        }
        baselines
    }

    fn render_stubs(&self, layout: &TreeLayout, baselines: &BTreeMap<i32, f32>) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for (id, placement) in layout.placements() {
            let (Some(bounds), Some(&baseline)) = (layout.bounds(id), baselines.get(&placement.row()))
            else {
                continue;
            };
            let bottom = bounds.bottom_center();
            let stub = Line::new(
                &self.connector_stroke,
                bottom,
                Point::new(bottom.x(), baseline),
                RenderLayer::Stub,
            );
            output.merge(stub.render_to_layers());
        }
        output
    }

    fn render_baselines(
        &self,
        layout: &TreeLayout,
        baselines: &BTreeMap<i32, f32>,
    ) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for (row, ids) in layout.rows() {
            let Some(&y) = baselines.get(&row) else {
                continue;
            };
            let mids = ids.iter().filter_map(|id| mid_x(layout, *id));
            let Some((min, max)) = min_max(mids) else {
                continue;
            };
            let line = Line::new(
                &self.connector_stroke,
                Point::new(min - BASELINE_MARGIN, y),
                Point::new(max + BASELINE_MARGIN, y),
                RenderLayer::Baseline,
            );
            output.merge(line.render_to_layers());
        }
        output
    }

    /// Draws one trunk per `(parent row, child row)` group with horizontal
    /// stubs to each distinct parent and child.
    fn render_connectors(
        &self,
        tree: &FamilyTree,
        layout: &TreeLayout,
        baselines: &BTreeMap<i32, f32>,
    ) -> LayeredOutput {
        let mut groups: IndexMap<(i32, i32), (IndexSet<MemberId>, IndexSet<MemberId>)> =
            IndexMap::new();
        for relation in tree.relations_of(RelationKind::Child) {
            let (Some(parent), Some(child)) =
                (layout.placement(relation.from()), layout.placement(relation.to()))
            else {
                continue;
            };
            let (parents, children) = groups.entry((parent.row(), child.row())).or_default();
            parents.insert(relation.from());
            children.insert(relation.to());
        }

        let mut output = LayeredOutput::new();
        for ((parent_row, child_row), (parents, children)) in groups {
            let Some(&parent_y) = baselines.get(&parent_row) else {
                continue;
            };
            let child_y = layout.row_top(child_row);

            let parent_xs: Vec<f32> = parents.iter().filter_map(|id| mid_x(layout, *id)).collect();
            let child_xs: Vec<f32> = children.iter().filter_map(|id| mid_x(layout, *id)).collect();
            let Some((min, max)) = min_max(parent_xs.iter().chain(&child_xs).copied()) else {
                continue;
            };
            let trunk_x = (min + max) / 2.0;

            let trunk = Line::new(
                &self.connector_stroke,
                Point::new(trunk_x, parent_y),
                Point::new(trunk_x, child_y),
                RenderLayer::Connector,
            );
            output.merge(trunk.render_to_layers());

            for x in parent_xs {
                let stub = Line::new(
                    &self.connector_stroke,
                    Point::new(x, parent_y),
                    Point::new(trunk_x, parent_y),
                    RenderLayer::Connector,
                );
                output.merge(stub.render_to_layers());
            }
            for x in child_xs {
                let stub = Line::new(
                    &self.connector_stroke,
                    Point::new(x, child_y),
                    Point::new(trunk_x, child_y),
                    RenderLayer::Connector,
                );
                output.merge(stub.render_to_layers());
            }
        }
        output
    }

    fn render_spouse_lines(&self, tree: &FamilyTree, layout: &TreeLayout) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for relation in tree.relations_of(RelationKind::Spouse) {
            let (Some(from), Some(to)) = (layout.bounds(relation.from()), layout.bounds(relation.to()))
            else {
                continue;
            };
            let y = from.min_y() + SPOUSE_LINE_OFFSET;
            let line = Line::new(
                &self.spouse_stroke,
                Point::new(from.center_x(), y),
                Point::new(to.center_x(), y),
                RenderLayer::Spouse,
            );
            output.merge(line.render_to_layers());
        }
        output
    }

    fn render_members(&self, tree: &FamilyTree, layout: &TreeLayout) -> LayeredOutput {
        let mut box_definition = self.box_definition.clone();
        box_definition.set_width(layout.box_width());

        let mut output = LayeredOutput::new();
        for member in tree.members() {
            let Some(placement) = layout.placement(member.id()) else {
                continue;
            };
            let label = WrappedLabel::new(&self.label, member.name());
            let member_box = MemberBox::new(&box_definition, member.id(), member.tag(), label);
            output.merge(member_box.render_to_layers(placement.position()));
        }
        output
    }
}

impl Exporter for Svg {
    fn export_tree(
        &self,
        tree: &FamilyTree,
        layout: &TreeLayout,
        target: &mut dyn io::Write,
    ) -> Result<(), export::Error> {
        let doc = self.render(tree, layout);
        svg::write(target, &doc)?;
        info!("SVG written");
        Ok(())
    }
}

fn mid_x(layout: &TreeLayout, id: MemberId) -> Option<f32> {
    layout.bounds(id).map(|bounds| bounds.center_x())
}

fn min_max(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    values.fold(None, |acc, x| match acc {
        None => Some((x, x)),
        Some((min, max)) => Some((min.min(x), max.max(x))),
    })
}
