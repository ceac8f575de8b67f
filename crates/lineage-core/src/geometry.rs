//! Points, sizes and axis-aligned boxes in SVG user space.
//!
//! `x` grows to the right and `y` grows downward, so each generation is
//! drawn below its parents.

/// A position on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// The same point moved horizontally to `x`.
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a box or of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// The rectangle covered by a member box.
///
/// ```
/// # use lineage_core::geometry::{Bounds, Point, Size};
/// let father = Bounds::new_from_top_left(Point::new(150.0, 250.0), Size::new(100.0, 40.0));
/// assert_eq!(father.center_x(), 200.0);
/// assert_eq!(father.bottom_center(), Point::new(200.0, 290.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    origin: Point,
    size: Size,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            origin: top_left,
            size,
        }
    }

    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn width(self) -> f32 {
        self.size.width
    }

    pub fn height(self) -> f32 {
        self.size.height
    }

    /// Horizontal middle; connectors attach here.
    pub fn center_x(self) -> f32 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn bottom_center(self) -> Point {
        Point::new(self.center_x(), self.max_y())
    }
}
