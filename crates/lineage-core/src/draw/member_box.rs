//! Member box drawable.
//!
//! A [`MemberBox`] is a rounded rectangle of fixed width holding a
//! [`WrappedLabel`]. Its height follows from the label's line count. Boxes are
//! emitted on [`RenderLayer::Member`] as a group carrying the member id and tag.

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, WrappedLabel},
    geometry::{Bounds, Point, Size},
    identifier::MemberId,
};

/// Visual definition shared by all member boxes.
///
/// Defaults to a 100px wide white box with a `#333` border and 6px corner radius.
#[derive(Debug, Clone)]
pub struct BoxDefinition {
    width: f32,
    corner_radius: f32,
    fill_color: Color,
    stroke: Rc<StrokeDefinition>,
}

impl BoxDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius;
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = Rc::new(stroke);
    }
}

impl Default for BoxDefinition {
    fn default() -> Self {
        Self {
            width: 100.0,
            corner_radius: 6.0,
            fill_color: Color::new("#fff").expect("'#fff' is a valid CSS color"),
            stroke: Rc::new(StrokeDefinition::new(
                Color::new("#333").expect("'#333' is a valid CSS color"),
                1.0,
            )),
        }
    }
}

/// A single member's box and label.
#[derive(Debug, Clone)]
pub struct MemberBox<'a> {
    definition: &'a BoxDefinition,
    id: MemberId,
    tag: Option<&'a str>,
    label: WrappedLabel<'a>,
}

impl<'a> MemberBox<'a> {
    pub fn new(
        definition: &'a BoxDefinition,
        id: MemberId,
        tag: Option<&'a str>,
        label: WrappedLabel<'a>,
    ) -> Self {
        Self {
            definition,
            id,
            tag,
            label,
        }
    }
}

impl Drawable for MemberBox<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let size = self.size();

        let rect = svg_element::Rectangle::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", self.definition.corner_radius)
            .set("ry", self.definition.corner_radius)
            .set("fill", &self.definition.fill_color);
        let rect = apply_stroke!(rect, self.definition.stroke());

        let mut group = svg_element::Group::new().set("data-id", self.id);
        if let Some(tag) = self.tag.filter(|tag| !tag.is_empty()) {
            group = group.set("class", tag);
        }
        group = group.add(rect);

        if let Some(text) = self
            .label
            .render_to_svg(Bounds::new_from_top_left(position, size))
        {
            group = group.add(text);
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Member, Box::new(group));
        output
    }

    fn size(&self) -> Size {
        Size::new(self.definition.width, self.label.box_height())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::LabelDefinition;

    #[test]
    fn test_box_size_follows_label() {
        let box_def = BoxDefinition::default();
        let label_def = LabelDefinition::default();

        let short = MemberBox::new(
            &box_def,
            MemberId::new(3),
            None,
            WrappedLabel::new(&label_def, "Father"),
        );
        assert_approx_eq!(f32, short.size().width(), 100.0);
        assert_approx_eq!(f32, short.size().height(), 40.0);

        let long = MemberBox::new(
            &box_def,
            MemberId::new(5),
            None,
            WrappedLabel::new(&label_def, "Sir Galahad of the Silvermoon Bastion"),
        );
        assert_approx_eq!(f32, long.size().height(), 52.0);
    }

    #[test]
    fn test_render_member_group() {
        let box_def = BoxDefinition::default();
        let label_def = LabelDefinition::default();
        let member = MemberBox::new(
            &box_def,
            MemberId::new(7),
            Some("matriline"),
            WrappedLabel::new(&label_def, "Aunt Rose"),
        );

        let output = member.render_to_layers(Point::new(100.0, 250.0));
        assert_eq!(output.layer_len(RenderLayer::Member), 1);

        let rendered = output.render()[0].to_string();
        assert!(rendered.contains("data-id=\"7\""));
        assert!(rendered.contains("class=\"matriline\""));
        assert!(rendered.contains("rx=\"6\""));
        assert!(rendered.contains("x=\"100\""));
        assert!(rendered.contains("y=\"250\""));
        assert!(rendered.contains("Aunt Rose"));
    }

    #[test]
    fn test_render_without_tag_omits_class() {
        let box_def = BoxDefinition::default();
        let label_def = LabelDefinition::default();

        for tag in [None, Some("")] {
            let member = MemberBox::new(
                &box_def,
                MemberId::new(1),
                tag,
                WrappedLabel::new(&label_def, "Grandfather A"),
            );
            let rendered = member.render_to_layers(Point::default()).render()[0].to_string();
            assert!(!rendered.contains("class="));
        }
    }

    #[test]
    fn test_render_empty_name_keeps_rect() {
        let box_def = BoxDefinition::default();
        let label_def = LabelDefinition::default();
        let member = MemberBox::new(
            &box_def,
            MemberId::new(1),
            None,
            WrappedLabel::new(&label_def, "   "),
        );

        let rendered = member.render_to_layers(Point::default()).render()[0].to_string();
        assert!(rendered.contains("<rect"));
        assert!(!rendered.contains("<text"));
    }
}
