#![forbid(unsafe_code)]

//! Discrete font-size ladder for the quick theme.

/// Sizes offered when stepping the quick theme's font.
pub const DEFAULT_FONT_SIZES: [u32; 12] = [7, 8, 9, 10, 11, 12, 13, 14, 16, 18, 20, 22];

/// Base size; the quick theme expresses font size as a percentage of it.
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Ordered list of font sizes with a fallback.
///
/// Stepping moves one rung up or down and sticks at either end. A size that
/// is not on the ladder steps back to the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSizeLadder {
    sizes: Vec<u32>,
    default_size: u32,
}

impl Default for FontSizeLadder {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_FONT_SIZES.to_vec(),
            default_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl FontSizeLadder {
    /// Build a ladder. Sizes are sorted and deduplicated.
    #[must_use]
    pub fn new(sizes: impl IntoIterator<Item = u32>, default_size: u32) -> Self {
        let mut sizes: Vec<u32> = sizes.into_iter().collect();
        sizes.sort_unstable();
        sizes.dedup();
        Self {
            sizes,
            default_size,
        }
    }

    #[must_use]
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    #[must_use]
    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    #[must_use]
    pub fn contains(&self, size: u32) -> bool {
        self.sizes.binary_search(&size).is_ok()
    }

    /// Next size after `current`, one rung `larger` or smaller.
    #[must_use]
    pub fn step(&self, current: u32, larger: bool) -> u32 {
        let Ok(ix) = self.sizes.binary_search(&current) else {
            return self.default_size;
        };
        let ix = if larger {
            (ix + 1).min(self.sizes.len() - 1)
        } else {
            ix.saturating_sub(1)
        };
        self.sizes[ix]
    }

    /// Apply `steps` single steps; positive grows, negative shrinks.
    #[must_use]
    pub fn step_by(&self, current: u32, steps: i32) -> u32 {
        let larger = steps > 0;
        (0..steps.unsigned_abs()).fold(current, |size, _| self.step(size, larger))
    }
}
