//! Arrow lexemes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::SyntaxError;

/// One of the nine arrow lexemes of the notation.
///
/// Arrows ending with `>` point from the left participant to the right one,
/// all others point from right to left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Arrow {
    /// `->`
    Forward,
    /// `->>`
    ForwardOpen,
    /// `=>`, a synchronous call with an implicit reply
    RoundTrip,
    /// `-->`
    Dashed,
    /// `-->>`
    DashedOpen,
    /// `<-`
    Backward,
    /// `<<-`
    BackwardOpen,
    /// `<--`
    BackwardDashed,
    /// `<<--`
    BackwardDashedOpen,
}

impl Arrow {
    pub const ALL: [Arrow; 9] = [
        Self::Forward,
        Self::ForwardOpen,
        Self::RoundTrip,
        Self::Dashed,
        Self::DashedOpen,
        Self::Backward,
        Self::BackwardOpen,
        Self::BackwardDashed,
        Self::BackwardDashedOpen,
    ];

    /// Returns the lexeme as written in the notation.
    pub fn lexeme(self) -> &'static str {
        match self {
            Self::Forward => "->",
            Self::ForwardOpen => "->>",
            Self::RoundTrip => "=>",
            Self::Dashed => "-->",
            Self::DashedOpen => "-->>",
            Self::Backward => "<-",
            Self::BackwardOpen => "<<-",
            Self::BackwardDashed => "<--",
            Self::BackwardDashedOpen => "<<--",
        }
    }

    /// Whether the arrow points from its left participant to its right one.
    pub fn is_forward(self) -> bool {
        self.lexeme().ends_with('>')
    }
}

impl FromStr for Arrow {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arrow| arrow.lexeme() == s)
            .ok_or_else(|| SyntaxError::UnknownArrow(s.to_string()))
    }
}

impl TryFrom<String> for Arrow {
    type Error = SyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Arrow> for String {
    fn from(arrow: Arrow) -> Self {
        arrow.lexeme().to_string()
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}
