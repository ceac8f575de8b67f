//! Lineage - generation-based layout and SVG rendering for family trees.
//!
//! The pipeline is strictly linear:
//!
//! ```text
//! source text ─parse─▶ FamilyTree ─infer─▶ Generations ─layout─▶ TreeLayout ─render─▶ SVG
//! ```
//!
//! [`TreeBuilder`] drives every stage with one validated [`AppConfig`];
//! [`render`] is a shortcut that uses the defaults.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use lineage_core::{color, draw, geometry, identifier, semantic};

pub use error::LineageError;
pub use export::svg::{Svg, SvgBuilder};

use std::io;

use log::{debug, info, trace};
use svg::Document;

use lineage_core::draw::LabelDefinition;

use config::AppConfig;
use export::Exporter;
use layout::{Engine, Generations, LayoutSettings, TreeLayout};

/// Builder for parsing, laying out and rendering family trees.
///
/// # Examples
///
/// ```
/// use lineage::{TreeBuilder, config::AppConfig};
///
/// let source = r#"
///     member 1 "Grandfather A";
///     member 2 "Grandmother A";
///     member 3 "Father";
///     spouse 1 2;
///     child 1 3;
///     child 2 3;
/// "#;
///
/// let builder = TreeBuilder::new(AppConfig::default()).expect("default config is valid");
/// let tree = builder.parse(source).expect("source parses");
///
/// let svg = builder.render_svg(&tree);
/// assert!(svg.contains("data-id=\"3\""));
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    config: AppConfig,
    label: LabelDefinition,
    renderer: Svg,
}

impl TreeBuilder {
    /// Creates a builder, validating `config` once up front.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Config`] for non-positive or non-finite
    /// spacing, box or label sizes, a zero pass budget or wrap width, and
    /// colors or stroke patterns that cannot be parsed.
    pub fn new(config: AppConfig) -> Result<Self, LineageError> {
        config.validate().map_err(LineageError::Config)?;
        let label = config.label_definition().map_err(LineageError::Config)?;
        let renderer = SvgBuilder::new()
            .with_style(config.style())
            .with_label(label.clone())
            .build()
            .map_err(|err| LineageError::Config(err.to_string()))?;

        debug!(config:?; "Tree builder configured");
        Ok(Self {
            config,
            label,
            renderer,
        })
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses `.lineage` source text into a family tree.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Parse`] carrying every diagnostic and the
    /// source text.
    pub fn parse(&self, source: &str) -> Result<semantic::FamilyTree, LineageError> {
        info!("Parsing family tree");

        let tree = lineage_parser::parse(source)
            .map_err(|err| LineageError::new_parse_error(err, source))?;

        debug!(
            members = tree.members_count(),
            relations = tree.relations().len();
            "Family tree parsed"
        );
        trace!(tree:?; "Parsed tree");

        Ok(tree)
    }

    /// Infers a generation for every member of `tree`.
    pub fn infer_generations(&self, tree: &semantic::FamilyTree) -> Generations {
        layout::infer(tree, self.config.layout().max_passes())
    }

    /// Infers generations and computes box positions.
    pub fn layout(&self, tree: &semantic::FamilyTree) -> TreeLayout {
        info!(members = tree.members_count(); "Calculating layout");
        let generations = self.infer_generations(tree);
        let settings = LayoutSettings::from(self.config.layout());
        Engine::new(settings, &self.label).calculate(tree, &generations)
    }

    /// Lays out `tree` and renders it to an SVG document.
    pub fn render_document(&self, tree: &semantic::FamilyTree) -> Document {
        let layout = self.layout(tree);
        self.renderer.render(tree, &layout)
    }

    /// Lays out `tree` and renders it to an SVG string.
    ///
    /// Identical trees render to byte-identical output.
    pub fn render_svg(&self, tree: &semantic::FamilyTree) -> String {
        let svg = self.render_document(tree).to_string();
        info!(bytes = svg.len(); "SVG rendered");
        svg
    }

    /// Lays out `tree` and writes the SVG to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Export`] if writing fails.
    pub fn write_svg(
        &self,
        tree: &semantic::FamilyTree,
        target: &mut dyn io::Write,
    ) -> Result<(), LineageError> {
        let layout = self.layout(tree);
        self.renderer.export_tree(tree, &layout, target)?;
        Ok(())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            label: LabelDefinition::default(),
            renderer: Svg::default(),
        }
    }
}

/// Renders `tree` with the default configuration.
///
/// # Examples
///
/// ```
/// use lineage::{identifier::MemberId, semantic::FamilyTree};
///
/// let mut tree = FamilyTree::new(400.0, 300.0);
/// tree.add_member(MemberId::new(1), "Solo", None);
///
/// let svg = lineage::render(&tree);
/// assert!(svg.contains("width=\"400\""));
/// ```
pub fn render(tree: &semantic::FamilyTree) -> String {
    TreeBuilder::default().render_svg(tree)
}
