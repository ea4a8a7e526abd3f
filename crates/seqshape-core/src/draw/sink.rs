//! The shape sink contract and an in-memory implementation.
//!
//! # Example
//!
//! ```
//! # use seqshape_core::draw::{Line, ShapeBuffer, ShapeSink};
//! # use seqshape_core::geometry::Point;
//! let mut buffer = ShapeBuffer::new();
//!
//! let message = Line::new(Point::new(0.0, 10.0), Point::new(50.0, 10.0));
//! let lifeline = Line::new(Point::new(0.0, 0.0), Point::new(0.0, 100.0));
//!
//! buffer.append(message.clone().into());
//! buffer.prepend(lifeline.clone().into());
//!
//! // The prepended lifeline renders beneath the message.
//! let lines: Vec<_> = buffer.shapes().filter_map(|shape| shape.as_line()).collect();
//! assert_eq!(lines, vec![&lifeline, &message]);
//! ```

use std::{collections::VecDeque, fs, io, path::Path};

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::draw::Shape;

/// Errors raised while persisting shapes.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize shapes: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Receiver of positioned shapes.
///
/// The insertion methods define the visual stacking order: shapes inserted
/// with [`append`](ShapeSink::append) are drawn above everything inserted
/// before them, shapes inserted with [`prepend`](ShapeSink::prepend) are drawn
/// beneath everything inserted before them, including earlier prepends.
pub trait ShapeSink {
    /// Inserts `shape` on top of all previously inserted shapes.
    fn append(&mut self, shape: Shape);

    /// Inserts `shape` beneath all previously inserted shapes.
    fn prepend(&mut self, shape: Shape);

    /// Flushes all accumulated shapes to `path`.
    fn persist(&mut self, path: &Path) -> Result<(), SinkError>;
}

/// In-memory [`ShapeSink`] keeping shapes in bottom-to-top order.
///
/// [`persist`](ShapeSink::persist) writes a TOML snapshot with one
/// `[[shapes]]` table per shape, which is handy for inspecting layouts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShapeBuffer {
    shapes: VecDeque<Shape>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    shapes: Vec<&'a Shape>,
}

impl ShapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shapes from bottom-most to top-most.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Consumes the buffer, returning the shapes bottom to top.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes.into()
    }

    /// Renders the TOML snapshot written by `persist`.
    pub fn to_toml(&self) -> Result<String, SinkError> {
        let snapshot = Snapshot {
            shapes: self.shapes.iter().collect(),
        };
        Ok(toml::to_string(&snapshot)?)
    }
}

impl ShapeSink for ShapeBuffer {
    fn append(&mut self, shape: Shape) {
        self.shapes.push_back(shape);
    }

    fn prepend(&mut self, shape: Shape) {
        self.shapes.push_front(shape);
    }

    fn persist(&mut self, path: &Path) -> Result<(), SinkError> {
        let content = self.to_toml()?;
        fs::write(path, content)?;
        debug!(path:? = path, shapes = self.shapes.len(); "Shapes persisted");
        Ok(())
    }
}
