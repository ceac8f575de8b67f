//! Color handling for Lineage diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are parsed from CSS strings and written back
//! out as SVG attribute values.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#444"`,
    /// `"rgb(255, 0, 0)"` or `"white"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lineage_core::color::Color;
    ///
    /// let line = Color::new("#444").unwrap();
    /// let fill = Color::new("white").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color, between
    /// 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns `true` if the color has no transparency.
    pub fn is_opaque(&self) -> bool {
        self.alpha() >= 1.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#444").is_ok());
        assert!(Color::new("#ffffff").is_ok());
        assert!(Color::new("rgb(102, 102, 102)").is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("not-a-color"));
    }

    #[test]
    fn test_color_default_is_opaque() {
        let color = Color::default();
        assert!(color.is_opaque());
        assert!(!color.to_string().is_empty());
    }

    #[test]
    fn test_color_as_attribute_value() {
        let color = Color::new("#444").unwrap();
        let rect = svg::node::element::Rectangle::new().set("fill", &color);
        assert!(rect.to_string().contains(&format!("fill=\"{color}\"")));
    }

    #[test]
    fn test_color_alpha() {
        let translucent = Color::new("rgba(0, 0, 0, 0.5)").unwrap();
        assert!((translucent.alpha() - 0.5).abs() < 0.001);
        assert!(!translucent.is_opaque());
    }

    #[test]
    fn test_color_display_is_stable() {
        let a = Color::new("#333").unwrap();
        let b = Color::new("#333").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }
}
