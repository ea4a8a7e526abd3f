//! Layout engine for scanned sequence diagrams.
//!
//! The engine converts a [`SequenceDiagram`] into positioned shapes in a single
//! forward pass over its messages. A vertical cursor advances message by
//! message while a stack of open fragment regions keeps nested fragment boxes
//! strictly inside their parents.
//!
//! Lifelines are drawn last but *prepended* to the sink, so that every
//! message, note and fragment renders above them.

use log::{debug, trace};

use seqshape_core::{
    draw::{
        DashStyle, HeadStyle, HorizontalAlign, Line, Rectangle, Shape, ShapeSink, VerticalAlign,
    },
    geometry::{Point, Size},
};

use crate::{
    config::{LayoutConfig, Palette},
    model::{
        Fragment, LifelineIdx, Message, MessageIdx, MessageKind, Note, NoteSide, Separator,
        SeparatorKind, SequenceDiagram,
    },
};

/// Sequence diagram layout engine.
///
/// # Examples
///
/// ```
/// use seqshape::{
///     config::LayoutConfig,
///     draw::ShapeBuffer,
///     layout::Engine,
///     model::{LifelineIdx, MessageKind, SequenceDiagram},
/// };
/// use seqshape_core::color::HexColor;
///
/// let mut diagram = SequenceDiagram::with_lifeline_names(["client", "server"]);
/// diagram.push_message(
///     LifelineIdx::new(0),
///     LifelineIdx::new(1),
///     MessageKind::Synchronous,
///     "GET /",
///     HexColor::black(),
/// );
///
/// let mut buffer = ShapeBuffer::new();
/// let extent = Engine::new(LayoutConfig::default()).layout(&mut buffer, &diagram);
///
/// // Two lifelines of header and line each, one message line and its label.
/// assert_eq!(buffer.len(), 6);
/// assert!(extent > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: LayoutConfig,
    palette: Palette,
}

impl Engine {
    /// Creates an engine using the default [`Palette`].
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            palette: Palette::default(),
        }
    }

    /// Sets the palette used for lifeline headers and separator labels.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `diagram` into `sink` and returns the final vertical extent,
    /// the bottom of the lifeline tails.
    ///
    /// The diagram is expected to come from the timeline scanner; the engine
    /// does not validate it.
    pub fn layout(&self, sink: &mut impl ShapeSink, diagram: &SequenceDiagram) -> f32 {
        let mut pass = LayoutPass::new(self, sink, diagram);
        pass.run();
        let extent = pass.finish();

        debug!(
            lifelines = diagram.lifeline_count(),
            messages = diagram.messages().len(),
            extent;
            "Layout calculated"
        );
        extent
    }

    /// Horizontal center of lifeline `index`.
    pub fn center_x(&self, index: LifelineIdx) -> f32 {
        self.config.margin_x
            + index.get() as f32 * self.config.lifeline_spacing
            + self.config.header_width / 2.0
    }

    /// Width of the canvas holding `lifelines` lifelines.
    pub fn canvas_width(&self, lifelines: usize) -> f32 {
        let columns = match lifelines {
            0 => 0.0,
            n => (n - 1) as f32 * self.config.lifeline_spacing + self.config.header_width,
        };
        2.0 * self.config.margin_x + columns
    }

    /// Vertical position of the first message row.
    pub fn first_row_y(&self) -> f32 {
        self.config.margin_y + self.config.header_height + self.config.message_spacing
    }

    /// Size of a box holding `text` with `padding` around it.
    fn text_size(&self, text: &str, padding: f32) -> Size {
        let (lines, longest) = text.lines().fold((0usize, 0usize), |(lines, longest), line| {
            (lines + 1, longest.max(line.chars().count()))
        });
        Size::new(
            longest as f32 * self.config.char_width,
            lines.max(1) as f32 * self.config.line_height,
        )
        .add_padding(padding)
    }
}

/// A fragment whose box is open on the layout stack.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FragmentRegion<'a> {
    fragment: &'a Fragment,
    left: f32,
    right: f32,
    top: f32,
}

/// Mutable state of one layout call.
struct LayoutPass<'a, S> {
    engine: &'a Engine,
    sink: &'a mut S,
    diagram: &'a SequenceDiagram,
    y: f32,
    regions: Vec<FragmentRegion<'a>>,
    limits: (f32, f32),
}

impl<'a, S: ShapeSink> LayoutPass<'a, S> {
    fn new(engine: &'a Engine, sink: &'a mut S, diagram: &'a SequenceDiagram) -> Self {
        Self {
            engine,
            sink,
            diagram,
            y: engine.first_row_y(),
            regions: Vec::new(),
            limits: (0.0, engine.canvas_width(diagram.lifeline_count())),
        }
    }

    fn config(&self) -> &'a LayoutConfig {
        &self.engine.config
    }

    fn canvas_limits(&self) -> (f32, f32) {
        (0.0, self.engine.canvas_width(self.diagram.lifeline_count()))
    }

    fn run(&mut self) {
        let diagram = self.diagram;

        for separator in diagram.separators_before(None) {
            self.draw_separator(separator);
        }

        for message in diagram.messages() {
            let index = message.index();

            for fragment in diagram.fragments().iter().filter(|f| f.begin() == index) {
                self.open_fragment(fragment);
            }

            self.draw_message(message);

            let mut tallest_note = 0.0_f32;
            for note in diagram.notes_of(index) {
                tallest_note = tallest_note.max(self.draw_note(message, note));
            }

            self.close_fragments(index);

            let spacing = if message.is_self_reference() {
                self.config().self_reference_spacing
            } else {
                self.config().message_spacing
            };
            let note_clearance = if tallest_note > 0.0 {
                tallest_note + self.config().note_gap
            } else {
                0.0
            };
            self.y += spacing.max(note_clearance);

            for separator in diagram.separators_before(Some(index)) {
                self.draw_separator(separator);
            }
        }
    }

    /// Prepends the lifelines and returns the final extent.
    fn finish(mut self) -> f32 {
        let config = self.config();
        let extent = self.y + config.lifeline_tail;

        for lifeline in self.diagram.lifelines().rev() {
            let left = config.margin_x + lifeline.index().get() as f32 * config.lifeline_spacing;
            let header_bottom = config.margin_y + config.header_height;
            let center = self.engine.center_x(lifeline.index());

            let header = Rectangle::new(
                Point::new(left, config.margin_y),
                Size::new(config.header_width, config.header_height),
            )
            .with_text(lifeline.name())
            .with_align(HorizontalAlign::Center, VerticalAlign::Center)
            .with_fill(self.engine.palette.lifeline().clone());
            self.sink.prepend(header.into());

            let line = Line::new(Point::new(center, header_bottom), Point::new(center, extent))
                .with_dash(DashStyle::Dashed);
            self.sink.prepend(line.into());
        }

        extent
    }

    fn emit(&mut self, shape: impl Into<Shape>) {
        self.sink.append(shape.into());
    }

    /// Horizontal extent of the messages `begin..=end`.
    fn message_span(&self, begin: MessageIdx, end: MessageIdx) -> (f32, f32) {
        let loop_width = self.config().self_loop_width;
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let covered = self
            .diagram
            .messages()
            .get(begin.get()..=end.get())
            .unwrap_or_default();
        for message in covered {
            let from = self.engine.center_x(message.from());
            let to = self.engine.center_x(message.to());
            let reach = if message.is_self_reference() {
                loop_width
            } else {
                0.0
            };
            min_x = min_x.min(from.min(to));
            max_x = max_x.max(from.max(to) + reach);
        }
        (min_x, max_x)
    }

    fn open_fragment(&mut self, fragment: &'a Fragment) {
        let config = self.config();
        let (min_x, max_x) = self.message_span(fragment.begin(), fragment.end());
        let (parent_left, parent_right) = self.limits;

        // Narrow parents shrink the inset so that children never reach their edges.
        let inset = config
            .fragment_inset
            .min((parent_right - parent_left) / 4.0)
            .max(0.0);
        let (inner_left, inner_right) = (parent_left + inset, parent_right - inset);

        let mut left = (min_x - config.fragment_padding).max(inner_left).min(inner_right);
        let mut right = (max_x + config.fragment_padding).min(inner_right).max(inner_left);
        if left >= right {
            left = inner_left;
            right = inner_right;
        }

        trace!(
            fragment = fragment.index().get(),
            left,
            right,
            top = self.y;
            "Fragment opened"
        );

        self.regions.push(FragmentRegion {
            fragment,
            left,
            right,
            top: self.y,
        });
        self.limits = (left, right);
        self.y += config.fragment_header;
    }

    fn close_fragments(&mut self, index: MessageIdx) {
        let config = self.config();
        let mut closed = false;

        while let Some(region) = self.regions.pop_if(|region| region.fragment.end() == index) {
            self.y += config.fragment_footer;
            let bottom = self.y;

            let frame = Rectangle::new(
                Point::new(region.left, region.top),
                Size::new(region.right - region.left, bottom - region.top),
            )
            .with_text(region.fragment.kind().keyword())
            .with_align(HorizontalAlign::Left, VerticalAlign::Top);
            self.emit(frame);
            self.draw_guard(region.left, region.top);
            closed = true;
        }

        if closed {
            self.limits = match self.regions.last() {
                Some(region) => (region.left, region.right),
                None => self.canvas_limits(),
            };
        }
    }

    /// Draws the flagged corner under the keyword of a fragment box.
    fn draw_guard(&mut self, left: f32, top: f32) {
        let config = self.config();
        let bottom = top + config.guard_height;
        let right = left + config.guard_width;

        let corner = [
            Point::new(left, bottom),
            Point::new(right - config.guard_notch, bottom),
            Point::new(right, bottom - config.guard_notch),
            Point::new(right, top),
        ];
        for segment in corner.windows(2) {
            self.emit(Line::new(segment[0], segment[1]));
        }
    }

    fn draw_message(&mut self, message: &Message) {
        let config = self.config();
        let from = self.engine.center_x(message.from());
        let to = self.engine.center_x(message.to());
        let y = self.y;

        if message.is_self_reference() {
            let out = from + config.self_loop_width;
            let down = y + config.self_loop_height;
            self.emit(Line::new(Point::new(from, y), Point::new(out, y)));
            self.emit(Line::new(Point::new(out, y), Point::new(out, down)));
            self.emit(
                Line::new(Point::new(out, down), Point::new(from, down))
                    .with_head(HeadStyle::Triangle),
            );
        } else {
            let (dash, head) = stroke_of(message.kind());
            self.emit(
                Line::new(Point::new(from, y), Point::new(to, y))
                    .with_dash(dash)
                    .with_head(head),
            );
        }

        if !message.text().is_empty() {
            let text = self.engine.text_size(message.text(), 0.0);
            let width = text.width() + 2.0 * config.label_padding;
            let height = text.height().max(config.label_height);
            let label = Rectangle::new(
                Point::new(from.min(to) + config.label_padding, y - height),
                Size::new(width, height),
            )
            .with_text(message.text())
            .with_align(HorizontalAlign::Left, VerticalAlign::Bottom)
            .with_border(false);
            self.emit(label);
        }
    }

    /// Draws `note` next to `message` and returns its height.
    fn draw_note(&mut self, message: &Message, note: &Note) -> f32 {
        let config = self.config();
        let size = self.engine.text_size(note.text(), config.note_padding);

        let left = match note.side() {
            NoteSide::Left => self.engine.center_x(message.from()) - config.note_gap - size.width(),
            NoteSide::Right => self.engine.center_x(message.to()) + config.note_gap,
        };

        let shape = Rectangle::new(Point::new(left, self.y), size)
            .with_text(note.text())
            .with_align(HorizontalAlign::Left, VerticalAlign::Top)
            .with_fill(note.color().clone());
        self.emit(shape);

        size.height()
    }

    fn draw_separator(&mut self, separator: &Separator) {
        let config = self.config();
        let (left, right) = self.canvas_limits();
        let dash = match separator.kind() {
            SeparatorKind::Divider => DashStyle::Solid,
            SeparatorKind::Delay => DashStyle::Dashed,
        };

        for y in [self.y, self.y + config.separator_gap] {
            self.emit(Line::new(Point::new(left, y), Point::new(right, y)).with_dash(dash));
        }

        let size = self.engine.text_size(separator.text(), config.label_padding);
        let size = Size::new(size.width(), config.label_height);
        let middle = Point::new((left + right) / 2.0, self.y + config.separator_gap / 2.0);
        let label = Rectangle::new(
            Point::new(
                middle.x() - size.width() / 2.0,
                middle.y() - size.height() / 2.0,
            ),
            size,
        )
        .with_text(separator.text())
        .with_align(HorizontalAlign::Center, VerticalAlign::Center)
        .with_fill(self.engine.palette.lifeline().clone());
        self.emit(label);

        self.y += config.separator_height;
    }
}

/// Dash pattern and head of a two-party message line.
fn stroke_of(kind: MessageKind) -> (DashStyle, HeadStyle) {
    match kind {
        MessageKind::Asynchronous => (DashStyle::Solid, HeadStyle::OpenArrow),
        MessageKind::Reply => (DashStyle::Dashed, HeadStyle::OpenArrow),
        MessageKind::Synchronous
        | MessageKind::Found
        | MessageKind::Lost
        | MessageKind::SelfReference => (DashStyle::Solid, HeadStyle::Triangle),
    }
}
