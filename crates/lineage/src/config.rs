//! Configuration types for Lineage tree rendering.
//!
//! This module provides configuration structures that control how family
//! trees are laid out, labelled and styled. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field has
//! a default, so a configuration file only needs the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Spacing constants and the inference pass budget.
//! - [`StyleConfig`] - Colors and strokes for connectors, spouse lines and boxes.
//! - [`LabelConfig`] - Font size, line height and wrap width for member labels.
//!
//! # Example
//!
//! ```
//! # use lineage::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     min_step = 140
//!
//!     [style]
//!     connector_color = "steelblue"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().min_step(), 140.0);
//! assert_eq!(config.layout().generation_spacing(), 150.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use lineage_core::{
    color::Color,
    draw::{BoxDefinition, LabelDefinition, StrokeDefinition, StrokeStyle},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Label configuration section.
    #[serde(default)]
    label: LabelConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, label: LabelConfig) -> Self {
        Self {
            layout,
            style,
            label,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the label configuration.
    pub fn label(&self) -> &LabelConfig {
        &self.label
    }

    /// Checks every section, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns a message describing a non-positive or non-finite length,
    /// a zero count, or a color or stroke pattern that cannot be parsed.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.label.validate()?;
        self.style.validate()
    }

    /// Builds the [`LabelDefinition`] shared by the layout engine and the
    /// renderer, so that both agree on box heights.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured text color is invalid.
    pub fn label_definition(&self) -> Result<LabelDefinition, String> {
        let mut definition = LabelDefinition::new();
        definition.set_font_size(self.label.font_size);
        definition.set_line_height(self.label.line_height);
        definition.set_padding(self.label.padding);
        definition.set_min_box_height(self.label.min_box_height);
        definition.set_max_chars_per_line(self.label.max_chars_per_line);
        definition.set_font_family(self.style.font_family.as_deref());
        definition.set_color(self.style.text_color()?);
        Ok(definition)
    }
}

/// Spacing constants for the layout engine.
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `generation_spacing` | `150` | vertical distance between generation rows |
/// | `min_step` | `120` | minimum horizontal distance between box origins in a row |
/// | `box_width` | `100` | width of every member box |
/// | `spouse_gap` | `40` | horizontal offset between spouses after compression |
/// | `left_margin` | `100` | x of the first box in a row |
/// | `top_offset` | `100` | y of generation 0 |
/// | `max_passes` | `8` | pass budget for generation inference |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    generation_spacing: f32,
    min_step: f32,
    box_width: f32,
    spouse_gap: f32,
    left_margin: f32,
    top_offset: f32,
    max_passes: usize,
}

impl LayoutConfig {
    pub fn generation_spacing(&self) -> f32 {
        self.generation_spacing
    }

    pub fn min_step(&self) -> f32 {
        self.min_step
    }

    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    pub fn spouse_gap(&self) -> f32 {
        self.spouse_gap
    }

    pub fn left_margin(&self) -> f32 {
        self.left_margin
    }

    pub fn top_offset(&self) -> f32 {
        self.top_offset
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Sets the vertical distance between generation rows.
    pub fn with_generation_spacing(mut self, spacing: f32) -> Self {
        self.generation_spacing = spacing;
        self
    }

    /// Sets the minimum horizontal step between boxes in a row.
    pub fn with_min_step(mut self, min_step: f32) -> Self {
        self.min_step = min_step;
        self
    }

    /// Sets the member box width.
    pub fn with_box_width(mut self, box_width: f32) -> Self {
        self.box_width = box_width;
        self
    }

    /// Sets the spouse gap.
    pub fn with_spouse_gap(mut self, gap: f32) -> Self {
        self.spouse_gap = gap;
        self
    }

    /// Sets the generation inference pass budget.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    fn validate(&self) -> Result<(), String> {
        ensure_positive("layout.generation_spacing", self.generation_spacing)?;
        ensure_positive("layout.min_step", self.min_step)?;
        ensure_positive("layout.box_width", self.box_width)?;
        ensure_non_negative("layout.spouse_gap", self.spouse_gap)?;
        ensure_non_negative("layout.left_margin", self.left_margin)?;
        ensure_non_negative("layout.top_offset", self.top_offset)?;
        if self.max_passes == 0 {
            return Err("layout.max_passes must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            generation_spacing: 150.0,
            min_step: 120.0,
            box_width: 100.0,
            spouse_gap: 40.0,
            left_margin: 100.0,
            top_offset: 100.0,
            max_passes: 8,
        }
    }
}

/// Visual styling for rendered trees.
///
/// Colors are CSS color strings. `spouse_style` accepts `solid`, `dashed`,
/// `dotted` or a raw dasharray such as `"6,3"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    connector_color: String,
    connector_width: f32,
    spouse_color: String,
    spouse_width: f32,
    spouse_style: String,
    box_fill: String,
    box_stroke: String,
    box_stroke_width: f32,
    corner_radius: f32,
    text_color: String,
    font_family: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Stroke for stubs, baselines and parent/child connectors.
    pub fn connector_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = Color::new(&self.connector_color)
            .map_err(|err| format!("Invalid connector color in config: {err}"))?;
        Ok(StrokeDefinition::solid(color, self.connector_width))
    }

    /// Stroke for spouse lines.
    pub fn spouse_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = Color::new(&self.spouse_color)
            .map_err(|err| format!("Invalid spouse color in config: {err}"))?;
        let style = self
            .spouse_style
            .parse::<StrokeStyle>()
            .map_err(|err| format!("Invalid spouse style in config: {err}"))?;
        Ok(StrokeDefinition::new(color, self.spouse_width).with_style(style))
    }

    /// Member box appearance. The width is taken from the layout at render time.
    pub fn box_definition(&self) -> Result<BoxDefinition, String> {
        let fill = Color::new(&self.box_fill)
            .map_err(|err| format!("Invalid box fill in config: {err}"))?;
        let stroke = Color::new(&self.box_stroke)
            .map_err(|err| format!("Invalid box stroke in config: {err}"))?;

        let mut definition = BoxDefinition::new();
        definition.set_fill_color(fill);
        definition.set_stroke(StrokeDefinition::solid(stroke, self.box_stroke_width));
        definition.set_corner_radius(self.corner_radius);
        Ok(definition)
    }

    /// Label text color.
    pub fn text_color(&self) -> Result<Color, String> {
        Color::new(&self.text_color).map_err(|err| format!("Invalid text color in config: {err}"))
    }

    fn validate(&self) -> Result<(), String> {
        ensure_positive("style.connector_width", self.connector_width)?;
        ensure_positive("style.spouse_width", self.spouse_width)?;
        ensure_non_negative("style.box_stroke_width", self.box_stroke_width)?;
        ensure_non_negative("style.corner_radius", self.corner_radius)?;
        self.background_color()?;
        self.connector_stroke()?;
        self.spouse_stroke()?;
        self.box_definition()?;
        self.text_color()?;
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            connector_color: "#444".to_string(),
            connector_width: 2.0,
            spouse_color: "#666".to_string(),
            spouse_width: 2.0,
            spouse_style: "dashed".to_string(),
            box_fill: "#fff".to_string(),
            box_stroke: "#333".to_string(),
            box_stroke_width: 1.0,
            corner_radius: 6.0,
            text_color: "#111".to_string(),
            font_family: None,
        }
    }
}

/// Member label settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    font_size: u16,
    line_height: f32,
    padding: f32,
    min_box_height: f32,
    max_chars_per_line: usize,
}

impl LabelConfig {
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn max_chars_per_line(&self) -> usize {
        self.max_chars_per_line
    }

    /// Sets the wrap budget in characters.
    pub fn with_max_chars_per_line(mut self, max_chars: usize) -> Self {
        self.max_chars_per_line = max_chars;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.font_size == 0 {
            return Err("label.font_size must be at least 1".to_string());
        }
        ensure_positive("label.line_height", self.line_height)?;
        ensure_non_negative("label.padding", self.padding)?;
        ensure_positive("label.min_box_height", self.min_box_height)?;
        if self.max_chars_per_line == 0 {
            return Err("label.max_chars_per_line must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_size: 12,
            line_height: 14.0,
            padding: 10.0,
            min_box_height: 40.0,
            max_chars_per_line: 16,
        }
    }
}

fn ensure_positive(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a positive number, got {value}"))
    }
}

fn ensure_non_negative(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a non-negative number, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let layout = config.layout();
        assert_approx_eq!(f32, layout.generation_spacing(), 150.0);
        assert_approx_eq!(f32, layout.min_step(), 120.0);
        assert_approx_eq!(f32, layout.box_width(), 100.0);
        assert_approx_eq!(f32, layout.spouse_gap(), 40.0);
        assert_approx_eq!(f32, layout.left_margin(), 100.0);
        assert_approx_eq!(f32, layout.top_offset(), 100.0);
        assert_eq!(layout.max_passes(), 8);
        assert_eq!(config.label().max_chars_per_line(), 16);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            spouse_gap = 24

            [label]
            max_chars_per_line = 12
            "#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().spouse_gap(), 24.0);
        assert_approx_eq!(f32, config.layout().min_step(), 120.0);
        assert_eq!(config.label().max_chars_per_line(), 12);
        assert_eq!(config.label().font_size(), 12);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout().max_passes(), 8);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_lengths() {
        let zero_step = AppConfig::new(
            LayoutConfig::default().with_min_step(0.0),
            StyleConfig::default(),
            LabelConfig::default(),
        );
        assert!(zero_step.validate().unwrap_err().contains("layout.min_step"));

        let nan_spacing = AppConfig::new(
            LayoutConfig::default().with_generation_spacing(f32::NAN),
            StyleConfig::default(),
            LabelConfig::default(),
        );
        assert!(nan_spacing.validate().is_err());

        let no_passes = AppConfig::new(
            LayoutConfig::default().with_max_passes(0),
            StyleConfig::default(),
            LabelConfig::default(),
        );
        assert!(no_passes.validate().unwrap_err().contains("max_passes"));

        let no_wrap = AppConfig::new(
            LayoutConfig::default(),
            StyleConfig::default(),
            LabelConfig::default().with_max_chars_per_line(0),
        );
        assert!(no_wrap.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_colors() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            connector_color = "not-a-color"
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("connector color"));

        let config: AppConfig = toml::from_str(
            r#"
            [style]
            spouse_style = "wavy"
            "#,
        )
        .unwrap();
        assert!(config.validate().unwrap_err().contains("spouse style"));
    }

    #[test]
    fn test_spouse_stroke_default_is_dashed() {
        let stroke = StyleConfig::default().spouse_stroke().unwrap();
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
        assert_approx_eq!(f32, stroke.width(), 2.0);
    }

    #[test]
    fn test_label_definition_matches_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [label]
            line_height = 16
            min_box_height = 30
            "#,
        )
        .unwrap();

        let definition = config.label_definition().unwrap();
        assert_approx_eq!(f32, definition.line_height(), 16.0);
        assert_approx_eq!(f32, definition.min_box_height(), 30.0);
        assert_approx_eq!(f32, definition.box_height(3), 58.0);
    }
}
