use crate::constants::FADE_EDGE;
use glam::Vec2;

/// Visual shape of a particle, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    Rect { w: f32, h: f32 },
    Streamer { w: f32, h: f32 },
    Glyph { glyph: &'static str, font_px: f32 },
    Heart,
    Sparkle,
}

impl Visual {
    pub fn is_confetti(&self) -> bool {
        matches!(self, Visual::Rect { .. } | Visual::Streamer { .. })
    }
}

/// Opacity over a particle's life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fade {
    Constant(f32),
    /// Ramp up over the first fifth of the lifetime, down over the last fifth.
    InOut { peak: f32 },
    /// Slow sinusoidal shimmer around `base`.
    Twinkle { base: f32, rate: f32, phase: f32 },
}

/// Horizontal sinusoidal offset applied at render time only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sway {
    pub amp: f32,
    pub rate: f32, // rad/s
    pub phase: f32,
}

impl Sway {
    pub const NONE: Sway = Sway {
        amp: 0.0,
        rate: 0.0,
        phase: 0.0,
    };

    #[inline]
    pub fn offset(&self, age_ms: f32) -> f32 {
        if self.amp == 0.0 {
            return 0.0;
        }
        (self.phase + self.rate * age_ms / 1000.0).sin() * self.amp
    }
}

/// What happens when a particle crosses the visible region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Exit {
    /// Removed once past the left, right or bottom edge by the engine margin.
    Prune,
    /// Re-enters at the opposite edge of the `top..bottom` band with a fresh
    /// x in `x_min..x_max` once it leaves the band.
    Wrap {
        top: f32,
        bottom: f32,
        x_min: f32,
        x_max: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Share of velocity kept per second; 1.0 disables damping.
    pub damping: f32,
    pub rotation: f32,
    pub spin: f32,
    pub visual: Visual,
    pub scale: f32,
    pub color: &'static str,
    pub age_ms: f32,
    pub ttl_ms: Option<f32>,
    pub fade: Fade,
    pub sway: Sway,
    pub exit: Exit,
}

impl Particle {
    /// Fraction of the lifetime consumed, 0 for particles without a lifetime.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        match self.ttl_ms {
            Some(ttl) if ttl > 0.0 => (self.age_ms / ttl).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        matches!(self.ttl_ms, Some(ttl) if self.age_ms >= ttl)
    }

    pub fn opacity(&self) -> f32 {
        match self.fade {
            Fade::Constant(a) => a,
            Fade::InOut { peak } => peak * fade_in_out(self.life_fraction()),
            Fade::Twinkle { base, rate, phase } => {
                let wave = 0.5 + 0.5 * (self.age_ms / 1000.0 * rate + phase).sin();
                base * (0.6 + 0.4 * wave)
            }
        }
    }

    /// Position as drawn, including sway.
    #[inline]
    pub fn render_pos(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.sway.offset(self.age_ms), self.pos.y)
    }
}

/// Trapezoid envelope over `t` in `0..=1`.
#[inline]
pub fn fade_in_out(t: f32) -> f32 {
    if t < FADE_EDGE {
        t / FADE_EDGE
    } else if t > 1.0 - FADE_EDGE {
        ((1.0 - t) / FADE_EDGE).max(0.0)
    } else {
        1.0
    }
}
