#![forbid(unsafe_code)]

//! Stylesheet playground for fcell tables.
//!
//! Generates a quick theme from a base color and a font size, encodes
//! stylesheets as `data:` URIs, and swaps them in and out of every open
//! window's scene without disturbing the application's own sheets.

pub mod cli;
pub mod color;
pub mod config;
pub mod data_uri;
pub mod error;
pub mod ladder;
pub mod playground;
pub mod theme;

pub use cli::run_from_env;
pub use color::{ParseColorError, Rgb};
pub use config::{FontPolicyConfig, PlaygroundConfig, PlaygroundConfigError};
pub use data_uri::{decode_data_uri, encode_data_uri};
pub use error::{PlaygroundError, Result};
pub use ladder::{DEFAULT_FONT_SIZE, DEFAULT_FONT_SIZES, FontSizeLadder};
pub use playground::{Playground, Scene, SheetSlot, Window};
pub use theme::QuickTheme;
