#![forbid(unsafe_code)]

//! Live stylesheet swapping across every open window.
//!
//! The playground owns two stylesheet slots. Each slot remembers the URI it
//! last installed so that applying a new sheet replaces the old one instead
//! of stacking on top of it:
//!
//! ```text
//!   apply(Quick, css1)   scene: [app.css, q1]
//!   apply(Custom, css2)  scene: [app.css, q1, c2]
//!   apply(Quick, css3)   scene: [app.css, c2, q3]
//!   reset()              scene: [app.css]
//! ```

use std::fmt;

use tracing::{debug, debug_span, trace};

use crate::color::Rgb;
use crate::config::PlaygroundConfig;
use crate::data_uri::encode_data_uri;
use crate::ladder::FontSizeLadder;
use crate::theme::QuickTheme;

/// Ordered stylesheet list of a scene. Later sheets win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    stylesheets: Vec<String>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stylesheets(stylesheets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            stylesheets: stylesheets.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn add_stylesheet(&mut self, uri: impl Into<String>) {
        self.stylesheets.push(uri.into());
    }

    /// Remove the first occurrence of `uri`. Returns whether one was found.
    pub fn remove_stylesheet(&mut self, uri: &str) -> bool {
        match self.stylesheets.iter().position(|s| s == uri) {
            Some(ix) => {
                self.stylesheets.remove(ix);
                true
            }
            None => false,
        }
    }
}

/// A top-level window. Windows may exist before they get a scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    pub title: String,
    pub scene: Option<Scene>,
}

impl Window {
    #[must_use]
    pub fn new(title: impl Into<String>, scene: Option<Scene>) -> Self {
        Self {
            title: title.into(),
            scene,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetSlot {
    /// Hand-written CSS.
    Custom,
    /// Generated [`QuickTheme`] CSS.
    Quick,
}

impl SheetSlot {
    pub const ALL: [Self; 2] = [Self::Custom, Self::Quick];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Quick => "quick",
        }
    }
}

impl fmt::Display for SheetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Playground {
    ladder: FontSizeLadder,
    font_size: u32,
    background: Option<Rgb>,
    custom: Option<String>,
    quick: Option<String>,
}

impl Default for Playground {
    fn default() -> Self {
        Self::new(&PlaygroundConfig::default())
    }
}

impl Playground {
    #[must_use]
    pub fn new(config: &PlaygroundConfig) -> Self {
        Self {
            ladder: config.ladder(),
            font_size: config.font.default_size,
            background: config.background,
            custom: None,
            quick: None,
        }
    }

    #[must_use]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    #[must_use]
    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    #[must_use]
    pub fn ladder(&self) -> &FontSizeLadder {
        &self.ladder
    }

    /// URI most recently installed in `slot`.
    #[must_use]
    pub fn applied(&self, slot: SheetSlot) -> Option<&str> {
        match slot {
            SheetSlot::Custom => self.custom.as_deref(),
            SheetSlot::Quick => self.quick.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: SheetSlot) -> &mut Option<String> {
        match slot {
            SheetSlot::Custom => &mut self.custom,
            SheetSlot::Quick => &mut self.quick,
        }
    }

    /// Theme built from the current background and font size.
    #[must_use]
    pub fn quick_theme(&self) -> QuickTheme {
        QuickTheme {
            background: self.background,
            font_size: self.font_size,
            base_font_size: self.ladder.default_size(),
        }
    }

    /// Install `css` in `slot` on every window that has a scene, replacing
    /// whatever the slot installed before. Returns the new URI.
    pub fn apply(&mut self, slot: SheetSlot, css: &str, windows: &mut [Window]) -> String {
        let uri = encode_data_uri(css);
        let span = debug_span!(
            "fcell.playground.apply",
            slot = slot.as_str(),
            windows = windows.len(),
            updated = tracing::field::Empty
        );
        let _guard = span.enter();

        let mut updated = 0usize;
        for window in windows.iter_mut() {
            let Some(scene) = window.scene.as_mut() else {
                trace!(title = %window.title, "window has no scene; skipped");
                continue;
            };
            if let Some(old) = self.applied(slot) {
                scene.remove_stylesheet(old);
            }
            scene.add_stylesheet(uri.clone());
            updated += 1;
        }
        span.record("updated", updated);
        debug!(updated, bytes = css.len(), "stylesheet applied");

        *self.slot_mut(slot) = Some(uri.clone());
        uri
    }

    /// Apply the current quick theme.
    pub fn update_quick(&mut self, windows: &mut [Window]) -> String {
        let css = self.quick_theme().generate();
        self.apply(SheetSlot::Quick, &css, windows)
    }

    pub fn set_background(&mut self, background: Option<Rgb>, windows: &mut [Window]) -> String {
        self.background = background;
        self.update_quick(windows)
    }

    /// Move the font one rung and re-apply the quick theme.
    pub fn step_font_size(&mut self, larger: bool, windows: &mut [Window]) -> String {
        self.font_size = self.ladder.step(self.font_size, larger);
        debug!(font_size = self.font_size, larger, "font size stepped");
        self.update_quick(windows)
    }

    /// Remove both slots' sheets from every scene and forget them.
    pub fn reset(&mut self, windows: &mut [Window]) {
        let mut removed = 0usize;
        for scene in windows.iter_mut().filter_map(|w| w.scene.as_mut()) {
            for slot in SheetSlot::ALL {
                if let Some(old) = self.applied(slot)
                    && scene.remove_stylesheet(old)
                {
                    removed += 1;
                }
            }
        }
        self.custom = None;
        self.quick = None;
        debug!(removed, "playground stylesheets reset");
    }
}
