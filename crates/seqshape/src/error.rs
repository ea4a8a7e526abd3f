//! Error types for seqshape operations.
//!
//! [`SeqshapeError`] is the error returned by the [`DiagramBuilder`](crate::DiagramBuilder)
//! facade. It wraps the stage errors, each of which can also be used on its
//! own when driving a stage directly.

use thiserror::Error;

use seqshape_core::draw::SinkError;
use seqshape_syntax::SyntaxError;

use crate::{config::ConfigError, model::MessageIdx};

/// Structural violations found while scanning a syntax tree.
///
/// Any scan error means the diagram is invalid; the partially built model
/// must not be laid out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("empty `{keyword}` fragment is not allowed (at message {at_message})")]
    EmptyFragment {
        keyword: String,
        at_message: MessageIdx,
    },

    #[error("participant `{name}` has no lifeline")]
    UnresolvedLifeline { name: String },

    #[error("diagram already holds timeline entities")]
    TimelineNotEmpty,
}

/// The main error type for seqshape operations.
#[derive(Debug, Error)]
pub enum SeqshapeError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}
