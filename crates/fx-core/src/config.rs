use crate::constants::*;
use crate::surface::Space;
use std::ops::RangeInclusive;

/// Colors and glyphs particles draw from.
#[derive(Clone, Debug)]
pub struct Palette {
    pub confetti: &'static [&'static str],
    pub hearts: &'static [&'static str],
    pub glyphs: &'static [&'static str],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            confetti: CONFETTI_COLORS,
            hearts: HEART_COLORS,
            glyphs: EMOJI_GLYPHS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Hard cap on live particles; spawns beyond it are dropped.
    pub capacity: usize,
    /// Coordinate space particles live in; the engine derives its bounds
    /// from it and surfaces map it onto the viewport.
    pub space: Space,
    /// Distance past the left, right or bottom edge before a particle is pruned.
    pub exit_margin: f32,
    pub max_frame_dt_ms: f32,
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::confetti()
    }
}

impl EngineConfig {
    pub fn confetti() -> Self {
        Self {
            capacity: CONFETTI_CAPACITY,
            space: Space::Pixels,
            exit_margin: CONFETTI_EXIT_MARGIN,
            max_frame_dt_ms: MAX_FRAME_DT_MS,
            palette: Palette::default(),
        }
    }

    pub fn emoji() -> Self {
        Self {
            capacity: EMOJI_CAPACITY,
            ..Self::confetti()
        }
    }

    pub fn hearts() -> Self {
        Self {
            capacity: HEART_CAPACITY,
            ..Self::confetti()
        }
    }

    pub fn ambient() -> Self {
        Self {
            capacity: AMBIENT_CAPACITY,
            space: Space::Percent,
            exit_margin: 0.0,
            ..Self::confetti()
        }
    }

    pub fn floating() -> Self {
        Self {
            capacity: FLOATING_CAPACITY,
            space: Space::Percent,
            exit_margin: 0.0,
            palette: Palette {
                glyphs: FLOATING_GLYPHS,
                ..Palette::default()
            },
            ..Self::confetti()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Options for the floating emoji overlay.
#[derive(Clone, Debug)]
pub struct EmojiOverlayConfig {
    pub interval_ms: u32,
    pub click_count: usize,
    pub periodic_count: RangeInclusive<usize>,
    pub glyphs: &'static [&'static str],
}

impl Default for EmojiOverlayConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2600,
            click_count: 6,
            periodic_count: 3..=5,
            glyphs: EMOJI_GLYPHS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AmbientConfig {
    pub hearts: usize,
    pub sparkles: usize,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            hearts: AMBIENT_HEARTS,
            sparkles: AMBIENT_SPARKLES,
        }
    }
}

/// Options for the floating glyph hearts layer.
#[derive(Clone, Debug)]
pub struct FloatingHeartsConfig {
    pub count: usize,
    /// Layer stays empty when set.
    pub reduced_motion: bool,
}

impl Default for FloatingHeartsConfig {
    fn default() -> Self {
        Self {
            count: FLOATING_COUNT,
            reduced_motion: false,
        }
    }
}
