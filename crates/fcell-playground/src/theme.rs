#![forbid(unsafe_code)]

//! Quick theme: a two-knob stylesheet covering base color and font size.

use std::fmt::Write as _;

use crate::color::Rgb;
use crate::ladder::DEFAULT_FONT_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickTheme {
    /// `None` renders as white.
    pub background: Option<Rgb>,
    pub font_size: u32,
    /// Size that maps to `100%`.
    pub base_font_size: u32,
}

impl Default for QuickTheme {
    fn default() -> Self {
        Self {
            background: None,
            font_size: DEFAULT_FONT_SIZE,
            base_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl QuickTheme {
    #[must_use]
    pub fn new(background: Option<Rgb>, font_size: u32) -> Self {
        Self {
            background,
            font_size,
            ..Self::default()
        }
    }

    /// Font size relative to the base, in percent.
    #[must_use]
    pub fn font_percent(&self) -> f64 {
        f64::from(self.font_size) * 100.0 / f64::from(self.base_font_size.max(1))
    }

    /// Render the `.root` rule.
    ///
    /// ```
    /// use fcell_playground::{QuickTheme, Rgb};
    ///
    /// let css = QuickTheme::new(Some(Rgb::new(0x33, 0x66, 0x99)), 12).generate();
    /// assert_eq!(css, ".root {\n -fc-base: #336699;\n-fc-font-size: 100.0%;\n}\n");
    /// ```
    #[must_use]
    pub fn generate(&self) -> String {
        let background = self.background.unwrap_or(Rgb::WHITE);
        let mut css = String::with_capacity(64);
        css.push_str(".root {\n");
        let _ = writeln!(css, " -fc-base: {};", background.to_css_hex());
        let _ = writeln!(css, "-fc-font-size: {:?}%;", self.font_percent());
        css.push_str("}\n");
        css
    }
}
