#![forbid(unsafe_code)]

//! Playground settings as data.
//!
//! ```toml
//! # fcell-playground.toml
//! background = "#336699"
//!
//! [font]
//! sizes = [9, 10, 12, 14, 18]
//! default_size = 12
//! ```
//!
//! ```rust,ignore
//! let config = PlaygroundConfig::from_toml_file("fcell-playground.toml")?.validated()?;
//! ```
//!
//! `PlaygroundConfig::default()` reproduces the built-in ladder and a white
//! background.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::ladder::{DEFAULT_FONT_SIZE, DEFAULT_FONT_SIZES, FontSizeLadder};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PlaygroundConfig {
    /// Initial quick-theme background. `None` renders white.
    pub background: Option<Rgb>,

    /// Font ladder for the quick theme.
    pub font: FontPolicyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FontPolicyConfig {
    /// Sizes offered by the ladder, in points.
    pub sizes: Vec<u32>,

    /// Starting size, the fallback for off-ladder sizes, and the `100%`
    /// reference.
    pub default_size: u32,
}

impl Default for FontPolicyConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_FONT_SIZES.to_vec(),
            default_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl PlaygroundConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PlaygroundConfigError> {
        toml::from_str(s).map_err(PlaygroundConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PlaygroundConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PlaygroundConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, PlaygroundConfigError> {
        serde_json::from_str(s).map_err(PlaygroundConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlaygroundConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PlaygroundConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format by extension (`.json` is JSON,
    /// everything else TOML).
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PlaygroundConfigError> {
        let path = path.as_ref();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Serialize to TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, PlaygroundConfigError> {
        toml::to_string_pretty(self).map_err(PlaygroundConfigError::TomlSerialize)
    }

    /// Check every field. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.font.sizes.is_empty() {
            errors.push("font.sizes must not be empty".into());
        }
        if self.font.sizes.contains(&0) {
            errors.push("font.sizes must all be > 0".into());
        }
        if self.font.default_size == 0 {
            errors.push("font.default_size must be > 0".into());
        } else if !self.font.sizes.is_empty() && !self.font.sizes.contains(&self.font.default_size)
        {
            errors.push(format!(
                "font.default_size {} is not one of font.sizes",
                self.font.default_size
            ));
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) reports nothing.
    pub fn validated(self) -> Result<Self, PlaygroundConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PlaygroundConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn ladder(&self) -> FontSizeLadder {
        FontSizeLadder::new(self.font.sizes.iter().copied(), self.font.default_size)
    }
}

/// Errors from loading or validating a [`PlaygroundConfig`].
#[derive(Debug)]
pub enum PlaygroundConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PlaygroundConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PlaygroundConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSerialize(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
