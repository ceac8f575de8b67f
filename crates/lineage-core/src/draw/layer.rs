//! Z-ordered grouping of SVG nodes.
//!
//! Every drawable tags its nodes with a [`RenderLayer`]. [`LayeredOutput`]
//! buckets them per layer and emits one `<g data-layer="...">` per
//! non-empty line layer, lowest first. Member groups come last and stay
//! top-level, so each box covers the lines that run into it and
//! `svg > g[data-id]` still selects it.
//!
//! ```
//! # use lineage_core::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Member, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Stub, Box::new(Line::new()));
//!
//! let groups = output.render();
//! assert!(groups[0].to_string().contains("data-layer=\"stub\""));
//! ```

use std::collections::BTreeMap;

use svg::node::element::Group;

pub type SvgNode = Box<dyn svg::Node>;

/// Drawing order, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Box bottom down to the generation baseline.
    Stub,
    /// One horizontal line per generation.
    Baseline,
    /// Parent/child trunks.
    Connector,
    Spouse,
    Member,
}

impl RenderLayer {
    /// Whether the layer's nodes are wrapped in a `data-layer` group.
    pub fn is_grouped(self) -> bool {
        self != Self::Member
    }

    /// Value of the group's `data-layer` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Baseline => "baseline",
            Self::Connector => "connector",
            Self::Spouse => "spouse",
            Self::Member => "member",
        }
    }
}

/// SVG nodes bucketed by layer; insertion order is kept within a bucket.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Appends every node of `other` after the nodes already in each layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(Vec::is_empty)
    }

    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.layers.get(&layer).map_or(0, Vec::len)
    }

    /// Top-level nodes in drawing order: one group per non-empty line
    /// layer, then the member nodes unwrapped.
    pub fn render(self) -> Vec<SvgNode> {
        let mut rendered = Vec::new();
        for (layer, nodes) in self.layers {
            if nodes.is_empty() {
                continue;
            }
            if !layer.is_grouped() {
                rendered.extend(nodes);
                continue;
            }
            let group = nodes.into_iter().fold(
                Group::new().set("data-layer", layer.as_str()),
                |group, node| group.add(node),
            );
            rendered.push(Box::new(group) as SvgNode);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert_eq!(output.layer_len(RenderLayer::Member), 0);
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_merge_appends_per_layer() {
        let mut stubs = LayeredOutput::new();
        stubs.add_to_layer(RenderLayer::Stub, Box::new(Line::new().set("id", "a")));

        let mut more = LayeredOutput::new();
        more.add_to_layer(RenderLayer::Spouse, Box::new(Line::new()));
        more.add_to_layer(RenderLayer::Stub, Box::new(Line::new().set("id", "b")));

        stubs.merge(more);
        assert_eq!(stubs.layer_len(RenderLayer::Stub), 2);
        assert_eq!(stubs.layer_len(RenderLayer::Spouse), 1);

        let groups = stubs.render();
        assert_eq!(groups.len(), 2);
        let first = groups[0].to_string();
        assert!(first.find("\"a\"").unwrap() < first.find("\"b\"").unwrap());
    }

    #[test]
    fn test_groups_follow_drawing_order() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Member, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));
        output.add_to_layer(RenderLayer::Baseline, Box::new(Line::new()));

        let layers: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();
        assert!(layers[0].contains("data-layer=\"baseline\""));
        assert!(layers[1].contains("data-layer=\"connector\""));
        assert!(layers[2].starts_with("<rect"));
    }

    #[test]
    fn test_member_nodes_are_not_wrapped() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Member, Box::new(Group::new().set("data-id", 1)));
        output.add_to_layer(RenderLayer::Member, Box::new(Group::new().set("data-id", 2)));
        output.add_to_layer(RenderLayer::Spouse, Box::new(Line::new()));

        let nodes: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].contains("data-layer=\"spouse\""));
        assert!(nodes[1].starts_with("<g data-id=\"1\""));
        assert!(nodes[2].starts_with("<g data-id=\"2\""));
        assert!(!nodes.iter().any(|n| n.contains("data-layer=\"member\"")));
        assert!(!RenderLayer::Member.is_grouped());
    }
}
