//! Rectangle and line primitives.

use serde::{Deserialize, Serialize};

use crate::{
    color::HexColor,
    draw::{DashStyle, HeadStyle},
    geometry::{Bounds, Point, Size},
};

/// Horizontal text alignment inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// An axis-aligned rectangle, optionally carrying text.
///
/// A new rectangle is bordered, unfilled and has no text. Alignment left unset
/// means the sink's default.
///
/// # Examples
///
/// ```
/// use seqshape_core::{
///     color::HexColor,
///     draw::{HorizontalAlign, Rectangle, VerticalAlign},
///     geometry::{Point, Size},
/// };
///
/// let header = Rectangle::new(Point::new(20.0, 20.0), Size::new(120.0, 60.0))
///     .with_text("browser")
///     .with_align(HorizontalAlign::Center, VerticalAlign::Center)
///     .with_fill(HexColor::white());
///
/// assert!(header.filled());
/// assert!(header.bordered());
/// assert_eq!(header.text(), "browser");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    left_top: Point,
    size: Size,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    horizontal_align: Option<HorizontalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_color: Option<HexColor>,
    filled: bool,
    bordered: bool,
}

impl Rectangle {
    /// Creates a bordered, unfilled rectangle without text.
    pub fn new(left_top: Point, size: Size) -> Self {
        Self {
            left_top,
            size,
            text: String::new(),
            horizontal_align: None,
            vertical_align: None,
            fill_color: None,
            filled: false,
            bordered: true,
        }
    }

    /// Sets the text shown inside the rectangle.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets both text alignments.
    pub fn with_align(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.horizontal_align = Some(horizontal);
        self.vertical_align = Some(vertical);
        self
    }

    /// Fills the rectangle with `color`.
    pub fn with_fill(mut self, color: HexColor) -> Self {
        self.fill_color = Some(color);
        self.filled = true;
        self
    }

    /// Sets whether the border is drawn.
    pub fn with_border(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    pub fn left_top(&self) -> Point {
        self.left_top
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn horizontal_align(&self) -> Option<HorizontalAlign> {
        self.horizontal_align
    }

    pub fn vertical_align(&self) -> Option<VerticalAlign> {
        self.vertical_align
    }

    pub fn fill_color(&self) -> Option<&HexColor> {
        self.fill_color.as_ref()
    }

    pub fn filled(&self) -> bool {
        self.filled
    }

    pub fn bordered(&self) -> bool {
        self.bordered
    }

    pub fn bounds(&self) -> Bounds {
        self.left_top.to_bounds(self.size)
    }
}

/// A straight line segment with a dash pattern and an optional head at its end point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    start: Point,
    end: Point,
    dash: DashStyle,
    head: HeadStyle,
}

impl Line {
    /// Creates a solid line without a head.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            dash: DashStyle::Solid,
            head: HeadStyle::None,
        }
    }

    pub fn with_dash(mut self, dash: DashStyle) -> Self {
        self.dash = dash;
        self
    }

    pub fn with_head(mut self, head: HeadStyle) -> Self {
        self.head = head;
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn dash(&self) -> DashStyle {
        self.dash
    }

    pub fn head(&self) -> HeadStyle {
        self.head
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y() == self.end.y()
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x() == self.end.x()
    }

    /// Returns the smallest bounds enclosing both end points.
    pub fn bounds(&self) -> Bounds {
        let start = self.start.to_bounds(Size::default());
        let end = self.end.to_bounds(Size::default());
        start.merge(&end)
    }
}

/// A positioned drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Line(Line),
}

impl Shape {
    /// Returns the rectangle if this shape is one.
    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Self::Rectangle(rect) => Some(rect),
            Self::Line(_) => None,
        }
    }

    /// Returns the line if this shape is one.
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Self::Line(line) => Some(line),
            Self::Rectangle(_) => None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rectangle(rect) => rect.bounds(),
            Self::Line(line) => line.bounds(),
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Self::Rectangle(rect)
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}
