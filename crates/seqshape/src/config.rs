//! Configuration types for seqshape.
//!
//! All types implement [`serde::Deserialize`] and fall back to their defaults
//! for every missing field, so a partial TOML document is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and palette settings.
//! - [`LayoutConfig`] - Geometry constants used by the layout engine.
//! - [`Palette`] - Colors assigned to scanned entities.
//!
//! # Example
//!
//! ```
//! # use seqshape::config::AppConfig;
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [layout]
//!     lifeline_spacing = 240.0
//!
//!     [palette]
//!     note = "fffacd"
//!     "#,
//! )
//! .expect("valid config");
//!
//! assert_eq!(config.layout().lifeline_spacing, 240.0);
//! assert_eq!(config.layout().message_spacing, 40.0);
//! assert_eq!(config.palette().note().as_str(), "fffacd");
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use seqshape_core::color::HexColor;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration combining layout and palette settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Palette configuration section.
    #[serde(default)]
    palette: Palette,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, palette: Palette) -> Self {
        Self { layout, palette }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown value types
    /// or invalid colors.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] when `path` does not exist, and
    /// [`ConfigError::Io`] or [`ConfigError::Parse`] when it cannot be read or
    /// parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        debug!(path:? = path; "Configuration loaded");
        Ok(config)
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

/// Geometry constants of the layout engine, in drawing units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance from the canvas edge to the first lifeline header.
    pub margin_x: f32,
    /// Vertical distance from the canvas top to the lifeline headers.
    pub margin_y: f32,
    pub header_width: f32,
    pub header_height: f32,
    /// Distance between the left edges of neighboring lifeline headers.
    pub lifeline_spacing: f32,
    /// Length of the lifeline below the last drawn element.
    pub lifeline_tail: f32,
    /// Vertical advance after an ordinary message.
    pub message_spacing: f32,
    /// Vertical advance after a self-reference message.
    pub self_reference_spacing: f32,
    pub self_loop_width: f32,
    pub self_loop_height: f32,
    /// Height of message and separator label boxes.
    pub label_height: f32,
    pub label_padding: f32,
    /// Estimated advance of one text character.
    pub char_width: f32,
    /// Estimated height of one text line.
    pub line_height: f32,
    pub note_padding: f32,
    /// Distance between a note and its lifeline.
    pub note_gap: f32,
    /// Horizontal widening of a fragment beyond its outermost lifelines.
    pub fragment_padding: f32,
    /// Minimum horizontal distance between a fragment and its parent.
    pub fragment_inset: f32,
    /// Vertical advance when a fragment opens, leaving room for its keyword.
    pub fragment_header: f32,
    /// Vertical advance when a fragment closes.
    pub fragment_footer: f32,
    pub guard_width: f32,
    pub guard_height: f32,
    /// Size of the cut corner of the guard glyph.
    pub guard_notch: f32,
    /// Vertical advance after a separator.
    pub separator_height: f32,
    /// Distance between the two rules of a separator.
    pub separator_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_x: 20.0,
            margin_y: 20.0,
            header_width: 120.0,
            header_height: 60.0,
            lifeline_spacing: 192.0,
            lifeline_tail: 60.0,
            message_spacing: 40.0,
            self_reference_spacing: 60.0,
            self_loop_width: 30.0,
            self_loop_height: 20.0,
            label_height: 18.0,
            label_padding: 4.0,
            char_width: 8.0,
            line_height: 16.0,
            note_padding: 8.0,
            note_gap: 8.0,
            fragment_padding: 40.0,
            fragment_inset: 8.0,
            fragment_header: 28.0,
            fragment_footer: 12.0,
            guard_width: 40.0,
            guard_height: 16.0,
            guard_notch: 6.0,
            separator_height: 30.0,
            separator_gap: 4.0,
        }
    }
}

/// Colors assigned to scanned entities.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    message: HexColor,
    note: HexColor,
    lifeline: HexColor,
}

impl Palette {
    pub fn new(message: HexColor, note: HexColor, lifeline: HexColor) -> Self {
        Self {
            message,
            note,
            lifeline,
        }
    }

    /// Color of message lines, `000000` by default.
    pub fn message(&self) -> &HexColor {
        &self.message
    }

    /// Fill color of notes, `ffb6c1` by default.
    pub fn note(&self) -> &HexColor {
        &self.note
    }

    /// Fill color of lifeline headers, `ffffff` by default.
    pub fn lifeline(&self) -> &HexColor {
        &self.lifeline
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            message: HexColor::black(),
            note: HexColor::light_pink(),
            lifeline: HexColor::white(),
        }
    }
}
