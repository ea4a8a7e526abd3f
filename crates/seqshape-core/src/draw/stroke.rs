//! Line dash and arrow head styles.
//!
//! Both enums use the vocabulary of office drawing formats (`dash`, `arrow`,
//! `triangle`) for their string forms so that sinks can pass them through.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Dash pattern of a line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line, used for replies, lifelines and delay separators
    Dashed,
}

impl DashStyle {
    /// Returns the drawing-format name of this style.
    pub fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dash",
        }
    }
}

impl FromStr for DashStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dash" | "dashed" => Ok(Self::Dashed),
            _ => Err(format!("invalid dash style `{s}`, valid values: solid, dash")),
        }
    }
}

impl fmt::Display for DashStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoration at the end point of a line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadStyle {
    /// Plain line end (default)
    #[default]
    None,
    /// Open, unfilled arrow head used for asynchronous messages and replies
    OpenArrow,
    /// Filled triangular head used for synchronous messages
    Triangle,
}

impl HeadStyle {
    /// Returns the drawing-format name of this head.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OpenArrow => "arrow",
            Self::Triangle => "triangle",
        }
    }
}

impl FromStr for HeadStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "arrow" | "open_arrow" => Ok(Self::OpenArrow),
            "triangle" => Ok(Self::Triangle),
            _ => Err(format!(
                "invalid head style `{s}`, valid values: none, arrow, triangle"
            )),
        }
    }
}

impl fmt::Display for HeadStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
