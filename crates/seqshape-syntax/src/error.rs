use thiserror::Error;

/// Errors raised while building a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unknown arrow `{0}`")]
    UnknownArrow(String),

    #[error("edge statement must contain at least one hop")]
    EmptyEdge,
}
