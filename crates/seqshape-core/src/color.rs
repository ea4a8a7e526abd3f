//! Pass-through hex colors.
//!
//! Colors are never interpreted by the layout engine; they are validated once
//! and handed to the shape sink as normalized six-digit lowercase hex strings
//! (without a leading `#`), which is what document writers expect.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a six-digit hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color `{0}`, expected six hex digits such as `ffb6c1`")]
pub struct ColorError(String);

/// A validated RGB color written as six hex digits.
///
/// # Examples
///
/// ```
/// use seqshape_core::color::HexColor;
///
/// let note: HexColor = "#FFB6C1".parse().unwrap();
/// assert_eq!(note.as_str(), "ffb6c1");
/// assert!("pink".parse::<HexColor>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Black, the default message color.
    pub fn black() -> Self {
        Self("000000".to_string())
    }

    /// White, the default lifeline header fill.
    pub fn white() -> Self {
        Self("ffffff".to_string())
    }

    /// Light pink, the default note fill.
    pub fn light_pink() -> Self {
        Self("ffb6c1".to_string())
    }

    /// Returns the normalized hex digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(s.to_string()));
        }
        Ok(Self(digits.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
