//! Positioned drawing primitives and the sink that receives them.
//!
//! The layout engine produces two kinds of primitives, [`Rectangle`] and
//! [`Line`], wrapped in the [`Shape`] enum. They are handed to a [`ShapeSink`]
//! which decides how to persist them. Insertion order is a layering contract:
//! [`ShapeSink::append`] draws above everything inserted so far and
//! [`ShapeSink::prepend`] draws beneath it.

mod shape;
mod sink;
mod stroke;

pub use shape::{HorizontalAlign, Line, Rectangle, Shape, VerticalAlign};
pub use sink::{ShapeBuffer, ShapeSink, SinkError};
pub use stroke::{DashStyle, HeadStyle};
