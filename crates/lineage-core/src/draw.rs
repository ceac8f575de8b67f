//! Drawable primitives for family tree rendering.
//!
//! Every visual element renders into a [`LayeredOutput`], tagged with the
//! [`RenderLayer`] that fixes its z-order. Member boxes implement the
//! [`Drawable`] trait; straight connector segments are described by [`Line`].

mod layer;
mod line;
mod member_box;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use line::Line;
pub use member_box::{BoxDefinition, MemberBox};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{LabelDefinition, WrappedLabel, wrap};

use crate::geometry::{Point, Size};

/// A visual element that can render itself at a position.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element with its top-left corner at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the outer size of the element.
    fn size(&self) -> Size;
}
