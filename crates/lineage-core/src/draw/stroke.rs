//! How connectors, spouse lines and box borders are stroked.

use std::str::FromStr;

use thiserror::Error;

use crate::color::Color;

/// Line pattern, written to `stroke-dasharray`.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// `4,2`
    Dashed,
    /// `2,3`
    Dotted,
    /// A user-supplied dasharray such as `10,5,2,5`.
    Custom(String),
}

/// Why a stroke style string was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum StrokeStyleError {
    #[error("empty stroke style")]
    Empty,

    #[error(
        "invalid stroke style `{0}`: expected solid, dashed, dotted or a dasharray like `4,2`"
    )]
    Invalid(String),
}

impl StrokeStyle {
    /// The `stroke-dasharray` value, `None` for solid lines.
    pub fn dasharray(&self) -> Option<&str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("4,2"),
            Self::Dotted => Some("2,3"),
            Self::Custom(pattern) => Some(pattern),
        }
    }
}

impl FromStr for StrokeStyle {
    type Err = StrokeStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(StrokeStyleError::Empty),
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            pattern if is_dasharray(pattern) => Ok(Self::Custom(pattern.to_string())),
            _ => Err(StrokeStyleError::Invalid(s.to_string())),
        }
    }
}

/// Comma or space separated non-negative lengths, not all zero.
fn is_dasharray(pattern: &str) -> bool {
    let lengths: Option<Vec<f32>> = pattern
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f32>().ok().filter(|v| v.is_finite() && *v >= 0.0))
        .collect();
    lengths.is_some_and(|lengths| lengths.iter().any(|v| *v > 0.0))
}

/// Color, width and pattern of a line.
///
/// ```
/// use lineage_core::{color::Color, draw::StrokeDefinition};
///
/// let spouse = StrokeDefinition::dashed(Color::new("#666").unwrap(), 2.0);
/// assert_eq!(spouse.style().dasharray(), Some("4,2"));
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn with_style(self, style: StrokeStyle) -> Self {
        Self { style, ..self }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-width` and, when needed, `stroke-opacity` and
/// `stroke-dasharray` on an `svg` element.
///
/// ```
/// use lineage_core::{color::Color, draw::StrokeDefinition};
/// use svg::node::element::Line;
///
/// let stroke = StrokeDefinition::dashed(Color::new("#666").unwrap(), 2.0);
/// let line = lineage_core::apply_stroke!(Line::new(), &stroke);
/// assert!(line.to_string().contains("stroke-dasharray=\"4,2\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke: &$crate::draw::StrokeDefinition = $stroke;
        let mut element = $element
            .set("stroke", &stroke.color())
            .set("stroke-width", stroke.width());
        if !stroke.color().is_opaque() {
            element = element.set("stroke-opacity", stroke.color().alpha());
        }
        if let Some(pattern) = stroke.style().dasharray() {
            element = element.set("stroke-dasharray", pattern);
        }
        element
    }};
}
