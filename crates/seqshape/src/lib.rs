//! Seqshape - Sequence diagrams as native drawing shapes.
//!
//! Scans a sequence diagram syntax tree into a time-ordered model and lays the
//! model out as positioned rectangles and lines, ready to be written as
//! editable shapes of a document.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. [`extract::extract_lifelines`] discovers the participants;
//! 2. [`scan::TimelineScanner`] builds messages, fragments, notes and separators;
//! 3. [`layout::Engine`] positions everything and feeds a [`draw::ShapeSink`].
//!
//! [`DiagramBuilder`] runs them in order.

pub mod config;
pub mod extract;
pub mod layout;
pub mod model;
pub mod scan;

mod error;

pub use seqshape_core::{color, draw, geometry};
pub use seqshape_syntax as syntax;

pub use error::{ScanError, SeqshapeError};

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use draw::{ShapeBuffer, ShapeSink};
use model::SequenceDiagram;

/// Builder for scanning and rendering sequence diagrams.
///
/// # Examples
///
/// ```
/// use seqshape::{
///     DiagramBuilder,
///     draw::ShapeBuffer,
///     syntax::{Diagram, EdgeStatement, FragmentStatement},
/// };
///
/// let tree = Diagram::new(vec![
///     EdgeStatement::chain("browser", &[("=>", "web")])
///         .unwrap()
///         .with_option("label", "GET /")
///         .into(),
///     FragmentStatement::new("loop", vec![
///         EdgeStatement::chain("web", &[("->>", "cache")]).unwrap().into(),
///     ])
///     .into(),
/// ]);
///
/// let builder = DiagramBuilder::default();
/// let diagram = builder.build(&tree).expect("valid diagram");
/// assert_eq!(diagram.messages().len(), 3);
///
/// let mut buffer = ShapeBuffer::new();
/// let extent = builder.render(&diagram, &mut buffer);
/// assert!(extent > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Scan a syntax tree into a sequence diagram model.
    ///
    /// # Errors
    ///
    /// Returns [`SeqshapeError::Scan`] when the tree is structurally invalid,
    /// e.g. it contains an empty fragment.
    pub fn build(&self, tree: &syntax::Diagram) -> Result<SequenceDiagram, SeqshapeError> {
        info!(statements = tree.statements().len(); "Scanning diagram");

        let lifelines = extract::extract_lifelines(tree);
        let mut diagram = SequenceDiagram::new(lifelines);
        scan::TimelineScanner::new(self.config.palette().clone()).scan(tree, &mut diagram)?;

        debug!("Diagram scanned successfully");
        trace!(diagram:?; "Scanned diagram");

        Ok(diagram)
    }

    /// Lay out a scanned diagram into `sink`, returning its vertical extent.
    pub fn render(&self, diagram: &SequenceDiagram, sink: &mut impl ShapeSink) -> f32 {
        info!(lifelines = diagram.lifeline_count(); "Laying out diagram");
        self.engine().layout(sink, diagram)
    }

    /// Scan `tree` and lay it out into a fresh [`ShapeBuffer`].
    ///
    /// # Errors
    ///
    /// Returns [`SeqshapeError::Scan`] when the tree is structurally invalid;
    /// nothing is laid out in that case.
    pub fn render_tree(
        &self,
        tree: &syntax::Diagram,
    ) -> Result<(ShapeBuffer, f32), SeqshapeError> {
        let diagram = self.build(tree)?;
        let mut buffer = ShapeBuffer::new();
        let extent = self.render(&diagram, &mut buffer);
        Ok((buffer, extent))
    }

    /// Scan `tree`, lay it out and persist the shapes to `path` through `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`SeqshapeError::Scan`] for an invalid tree and
    /// [`SeqshapeError::Sink`] when the sink cannot persist.
    pub fn export(
        &self,
        tree: &syntax::Diagram,
        sink: &mut impl ShapeSink,
        path: impl AsRef<Path>,
    ) -> Result<f32, SeqshapeError> {
        let path = path.as_ref();
        let diagram = self.build(tree)?;
        let extent = self.render(&diagram, sink);
        sink.persist(path)?;

        info!(path:?, extent; "Diagram exported");
        Ok(extent)
    }

    fn engine(&self) -> layout::Engine {
        layout::Engine::new(self.config.layout().clone())
            .with_palette(self.config.palette().clone())
    }
}
