//! Word-wrapped member labels.
//!
//! This module provides the text side of a member box: the greedy [`wrap`]
//! function, the [`LabelDefinition`] holding font and box-height constants,
//! and [`WrappedLabel`], which pairs wrapped lines with a definition and
//! renders them as an SVG `<text>` element.
//!
//! # Quick Start
//!
//! ```
//! # use lineage_core::draw::{LabelDefinition, WrappedLabel};
//! let definition = LabelDefinition::default();
//! let label = WrappedLabel::new(&definition, "Sir Galahad of the Silvermoon Bastion");
//!
//! assert_eq!(label.lines().len(), 3);
//! assert_eq!(label.box_height(), 52.0);
//! ```

use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{color::Color, geometry::Bounds};

/// Greedily wraps `name` into lines of at most `max_chars` characters.
///
/// Words are separated by whitespace. A line accepts the next word while the
/// projected length (line, one space, word) stays within the budget; otherwise
/// the line is flushed and the word starts a new one. A single word longer than
/// the budget is never split: it occupies its own line unmodified.
///
/// # Examples
///
/// ```
/// # use lineage_core::draw::wrap;
/// assert_eq!(wrap("Grandfather A", 16), vec!["Grandfather A"]);
/// assert_eq!(
///     wrap("Sir Galahad of the Silvermoon Bastion", 16),
///     vec!["Sir Galahad of", "the Silvermoon", "Bastion"],
/// );
/// assert!(wrap("   ", 16).is_empty());
/// ```
pub fn wrap(name: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in name.split_whitespace() {
        let word_len = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= max_chars {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Font and sizing constants for member labels.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font size | `12` |
/// | Line height | `14` |
/// | Vertical padding | `10` |
/// | Minimum box height | `40` |
/// | Characters per line | `16` |
/// | Text color | `#111` |
#[derive(Debug, Clone)]
pub struct LabelDefinition {
    font_size: u16,
    font_family: Option<String>,
    line_height: f32,
    padding: f32,
    min_box_height: f32,
    max_chars_per_line: usize,
    color: Color,
}

impl LabelDefinition {
    /// Creates a new label definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family. `None` leaves the choice to the SVG viewer.
    pub fn set_font_family(&mut self, family: Option<&str>) {
        self.font_family = family.map(str::to_string);
    }

    /// Sets the distance between consecutive baselines.
    pub fn set_line_height(&mut self, line_height: f32) {
        self.line_height = line_height;
    }

    /// Sets the vertical padding added to the text block height.
    pub fn set_padding(&mut self, padding: f32) {
        self.padding = padding;
    }

    /// Sets the minimum box height.
    pub fn set_min_box_height(&mut self, height: f32) {
        self.min_box_height = height;
    }

    /// Sets the wrap budget in characters.
    pub fn set_max_chars_per_line(&mut self, max_chars: usize) {
        self.max_chars_per_line = max_chars;
    }

    /// Sets the text color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn min_box_height(&self) -> f32 {
        self.min_box_height
    }

    pub fn max_chars_per_line(&self) -> usize {
        self.max_chars_per_line
    }

    /// Box height needed for `line_count` lines:
    /// `max(min_box_height, line_count * line_height + padding)`.
    pub fn box_height(&self, line_count: usize) -> f32 {
        (line_count as f32)
            .mul_add(self.line_height, self.padding)
            .max(self.min_box_height)
    }
}

impl Default for LabelDefinition {
    fn default() -> Self {
        Self {
            font_size: 12,
            font_family: None,
            line_height: 14.0,
            padding: 10.0,
            min_box_height: 40.0,
            max_chars_per_line: 16,
            color: Color::new("#111").expect("'#111' is a valid CSS color"),
        }
    }
}

/// A member name wrapped under a [`LabelDefinition`].
#[derive(Debug, Clone)]
pub struct WrappedLabel<'a> {
    definition: &'a LabelDefinition,
    lines: Vec<String>,
}

impl<'a> WrappedLabel<'a> {
    /// Wraps `content` using the definition's character budget.
    pub fn new(definition: &'a LabelDefinition, content: &str) -> Self {
        Self {
            definition,
            lines: wrap(content, definition.max_chars_per_line),
        }
    }

    /// Returns the wrapped lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the height of the box that holds this label.
    pub fn box_height(&self) -> f32 {
        self.definition.box_height(self.lines.len())
    }

    /// Renders the label vertically centred inside `bounds`, one `<tspan>`
    /// per line. Returns `None` for an empty label.
    pub fn render_to_svg(&self, bounds: Bounds) -> Option<svg_element::Text> {
        if self.lines.is_empty() {
            return None;
        }

        let line_height = self.definition.line_height;
        let center_x = bounds.center_x();
        let first_baseline = bounds.min_y() + bounds.height() / 2.0
            - line_height * (self.lines.len() - 1) as f32 / 2.0
            + 4.0;

        let mut text = svg_element::Text::new("")
            .set("x", center_x)
            .set("y", first_baseline)
            .set("font-size", self.definition.font_size)
            .set("fill", &self.definition.color)
            .set("text-anchor", "middle");

        if let Some(family) = &self.definition.font_family {
            text = text.set("font-family", family.as_str());
        }

        for (idx, line) in self.lines.iter().enumerate() {
            let tspan = svg_element::TSpan::new("").set("x", center_x);
            let tspan = if idx == 0 {
                tspan.set("dy", 0)
            } else {
                tspan.set("dy", line_height)
            };
            text = text.add(tspan.add(SvgText::new(line.as_str())));
        }

        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::geometry::{Point, Size};

    #[test]
    fn test_wrap_single_line() {
        assert_eq!(wrap("Father", 16), vec!["Father"]);
        assert_eq!(wrap("Grandmother A", 16), vec!["Grandmother A"]);
    }

    #[test]
    fn test_wrap_reference_name() {
        let lines = wrap("Sir Galahad of the Silvermoon Bastion", 16);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 16, "line `{line}` exceeds budget");
        }
        assert_eq!(lines.join(" "), "Sir Galahad of the Silvermoon Bastion");
    }

    #[test]
    fn test_wrap_long_word_is_not_split() {
        let lines = wrap("Baron Wolfeschlegelsteinhausen the Elder", 16);
        assert_eq!(
            lines,
            vec!["Baron", "Wolfeschlegelsteinhausen", "the Elder"]
        );
    }

    #[test]
    fn test_wrap_exact_budget() {
        // "abcdefg hijklmno" is exactly 16 characters
        assert_eq!(wrap("abcdefg hijklmno", 16), vec!["abcdefg hijklmno"]);
        assert_eq!(wrap("abcdefg hijklmnop", 16), vec!["abcdefg", "hijklmnop"]);
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        // 15 characters, 18 bytes
        let name = "Åsa Ødegård Lie";
        assert_eq!(wrap(name, 16), vec![name]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("", 16).is_empty());
        assert!(wrap("  \t ", 16).is_empty());
    }

    #[test]
    fn test_box_height() {
        let definition = LabelDefinition::default();
        assert_approx_eq!(f32, definition.box_height(0), 40.0);
        assert_approx_eq!(f32, definition.box_height(1), 40.0);
        assert_approx_eq!(f32, definition.box_height(2), 40.0);
        assert_approx_eq!(f32, definition.box_height(3), 52.0);
        assert_approx_eq!(f32, definition.box_height(5), 80.0);
    }

    #[test]
    fn test_box_height_custom_minimum() {
        let mut definition = LabelDefinition::new();
        definition.set_min_box_height(20.0);
        definition.set_line_height(10.0);
        definition.set_padding(4.0);
        assert_approx_eq!(f32, definition.box_height(1), 20.0);
        assert_approx_eq!(f32, definition.box_height(3), 34.0);
    }

    #[test]
    fn test_render_centres_lines() {
        let definition = LabelDefinition::default();
        let label = WrappedLabel::new(&definition, "Sir Galahad of the Silvermoon Bastion");
        let bounds = Bounds::new_from_top_left(
            Point::new(100.0, 400.0),
            Size::new(100.0, label.box_height()),
        );

        let rendered = label
            .render_to_svg(bounds)
            .expect("non-empty label renders")
            .to_string();

        // 400 + 52/2 - 14*2/2 + 4
        assert!(rendered.contains("y=\"416\""), "{rendered}");
        assert!(rendered.contains("x=\"150\""));
        assert_eq!(rendered.matches("<tspan").count(), 3);
        assert_eq!(rendered.matches("dy=\"0\"").count(), 1);
        assert_eq!(rendered.matches("dy=\"14\"").count(), 2);
        assert!(rendered.contains("the Silvermoon"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let definition = LabelDefinition::default();
        let label = WrappedLabel::new(&definition, "Tom & <Jerry>");
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 40.0));

        let rendered = label.render_to_svg(bounds).unwrap().to_string();
        assert!(!rendered.contains("<Jerry>"));
    }

    #[test]
    fn test_render_empty_label() {
        let definition = LabelDefinition::default();
        let label = WrappedLabel::new(&definition, "");
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 40.0));

        assert!(label.render_to_svg(bounds).is_none());
        assert_approx_eq!(f32, label.box_height(), 40.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn wrapped_lines_respect_budget(
            words in prop::collection::vec("[a-zA-Z]{1,24}", 0..12),
            max_chars in 1usize..30,
        ) {
            let name = words.join(" ");
            let lines = wrap(&name, max_chars);

            for line in &lines {
                let fits = line.chars().count() <= max_chars;
                let single_long_word = !line.contains(' ');
                prop_assert!(fits || single_long_word, "line {line:?} exceeds {max_chars}");
            }

            let rejoined: Vec<&str> = lines.iter().flat_map(|line| line.split(' ')).collect();
            prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
