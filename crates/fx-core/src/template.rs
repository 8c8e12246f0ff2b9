//! Particle templates and spawn requests.

use crate::config::Palette;
use crate::constants::*;
use crate::particle::{Exit, Fade, Particle, Sway, Visual};
use crate::surface::Bounds;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Look and behavior preset a particle is created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Template {
    /// Small falling confetti rectangle.
    Rect,
    /// Long falling confetti strip.
    Streamer,
    /// Emoji glyph floating upward with a wobble.
    Emoji,
    /// Small heart rising and fading out.
    Heart,
    /// Backdrop heart drifting down forever.
    AmbientHeart,
    /// Backdrop sparkle drifting down forever, twinkling.
    AmbientSparkle,
    /// Glyph heart rising through the viewport forever.
    FloatingHeart { size: HeartSize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeartSize {
    Large,
    Medium,
    Small,
}

impl HeartSize {
    /// Large, medium, small, large, ...
    pub fn cycle(i: usize) -> Self {
        match i % 3 {
            0 => HeartSize::Large,
            1 => HeartSize::Medium,
            _ => HeartSize::Small,
        }
    }

    pub fn font_px(self) -> f32 {
        FLOATING_FONT_PX[self as usize]
    }
}

/// Where a spawn batch originates. Resolved once per request against the
/// current surface bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Origin {
    At(Vec2),
    /// Fractions of the surface width and height.
    Fraction(Vec2),
    /// Uniformly random x across the width, fixed y (usually above the top).
    TopEdge { y: f32 },
    /// Uniformly random point within fractional x and y ranges.
    Region { x: (f32, f32), y: (f32, f32) },
}

impl Origin {
    pub fn resolve<R: Rng>(&self, bounds: Bounds, rng: &mut R) -> Vec2 {
        match *self {
            Origin::At(p) => p,
            Origin::Fraction(f) => bounds.at_fraction(f.x, f.y),
            Origin::TopEdge { y } => Vec2::new(rng.gen::<f32>() * bounds.width, y),
            Origin::Region { x, y } => {
                bounds.at_fraction(uniform(rng, x.0, x.1), uniform(rng, y.0, y.1))
            }
        }
    }
}

/// One spawn call: `count` particles leaving `origin` inside a cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub origin: Origin,
    /// Cone axis in degrees; 0 is +x, 90 is +y (down the screen).
    pub direction_deg: f32,
    /// Full cone width in degrees.
    pub spread_deg: f32,
    /// Speed range in units per second.
    pub speed: (f32, f32),
    pub count: usize,
    pub template: Template,
    /// Per-particle random offset from the origin, +/- on each axis.
    pub jitter: Vec2,
}

impl SpawnRequest {
    pub fn new(origin: Origin, template: Template) -> Self {
        Self {
            origin,
            direction_deg: 90.0,
            spread_deg: 0.0,
            speed: (0.0, 0.0),
            count: 1,
            template,
            jitter: Vec2::ZERO,
        }
    }

    pub fn cone(mut self, direction_deg: f32, spread_deg: f32) -> Self {
        self.direction_deg = direction_deg;
        self.spread_deg = spread_deg;
        self
    }

    pub fn speed(mut self, min: f32, max: f32) -> Self {
        self.speed = (min, max);
        self
    }

    /// Speed given in units per frame at the reference frame rate.
    pub fn speed_per_frame(self, min: f32, max: f32) -> Self {
        self.speed(min * REFERENCE_FPS, max * REFERENCE_FPS)
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn jitter(mut self, x: f32, y: f32) -> Self {
        self.jitter = Vec2::new(x, y);
        self
    }

    /// Velocity for one particle: random angle within the cone, random speed.
    pub fn sample_velocity<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let deg = self.direction_deg + (rng.gen::<f32>() - 0.5) * self.spread_deg;
        let speed = uniform(rng, self.speed.0, self.speed.1);
        Vec2::from_angle(deg.to_radians()) * speed
    }
}

/// Uniform sample from `min..max`, tolerating empty or inverted ranges.
#[inline]
pub fn uniform<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn pick<R: Rng>(rng: &mut R, items: &[&'static str], fallback: &'static str) -> &'static str {
    items.choose(rng).copied().unwrap_or(fallback)
}

impl Template {
    pub fn instantiate<R: Rng>(
        self,
        id: u32,
        pos: Vec2,
        vel: Vec2,
        palette: &Palette,
        rng: &mut R,
    ) -> Particle {
        let base = Particle {
            id,
            pos,
            vel,
            accel: Vec2::ZERO,
            damping: 1.0,
            rotation: 0.0,
            spin: 0.0,
            visual: Visual::Heart,
            scale: 1.0,
            color: "#fff",
            age_ms: 0.0,
            ttl_ms: None,
            fade: Fade::Constant(1.0),
            sway: Sway::NONE,
            exit: Exit::Prune,
        };
        match self {
            Template::Rect | Template::Streamer => {
                let visual = if self == Template::Streamer {
                    Visual::Streamer {
                        w: uniform(rng, STREAMER_WIDTH.0, STREAMER_WIDTH.1),
                        h: uniform(rng, STREAMER_HEIGHT.0, STREAMER_HEIGHT.1),
                    }
                } else {
                    Visual::Rect {
                        w: uniform(rng, RECT_WIDTH.0, RECT_WIDTH.1),
                        h: uniform(rng, RECT_HEIGHT.0, RECT_HEIGHT.1),
                    }
                };
                Particle {
                    accel: Vec2::new(0.0, CONFETTI_GRAVITY),
                    damping: CONFETTI_AIR_DAMPING_PER_SEC,
                    rotation: rng.gen::<f32>() * TAU,
                    spin: uniform(rng, -CONFETTI_SPIN_MAX, CONFETTI_SPIN_MAX),
                    visual,
                    color: pick(rng, palette.confetti, "#fff"),
                    ttl_ms: Some(uniform(rng, CONFETTI_TTL_MS.0, CONFETTI_TTL_MS.1)),
                    ..base
                }
            }
            Template::Emoji => {
                let font_px = EMOJI_FONT_PX
                    .choose(rng)
                    .copied()
                    .unwrap_or(EMOJI_FONT_PX[0]);
                Particle {
                    accel: Vec2::new(uniform(rng, -EMOJI_WIND_MAX, EMOJI_WIND_MAX), 0.0),
                    visual: Visual::Glyph {
                        glyph: pick(rng, palette.glyphs, "💖"),
                        font_px,
                    },
                    scale: uniform(rng, EMOJI_SCALE.0, EMOJI_SCALE.1),
                    ttl_ms: Some(uniform(rng, EMOJI_TTL_MS.0, EMOJI_TTL_MS.1)),
                    fade: Fade::InOut { peak: 1.0 },
                    sway: Sway {
                        amp: uniform(rng, EMOJI_WOBBLE_AMP.0, EMOJI_WOBBLE_AMP.1),
                        rate: EMOJI_WOBBLE_RATE,
                        phase: rng.gen::<f32>() * TAU,
                    },
                    ..base
                }
            }
            Template::Heart => Particle {
                damping: HEART_DAMPING_PER_SEC,
                rotation: uniform(rng, -HEART_TILT_DEG, HEART_TILT_DEG).to_radians(),
                visual: Visual::Heart,
                color: pick(rng, palette.hearts, "#ff9ec5"),
                ttl_ms: Some(uniform(rng, HEART_TTL_MS.0, HEART_TTL_MS.1)),
                fade: Fade::InOut { peak: 0.95 },
                ..base
            },
            Template::AmbientHeart | Template::AmbientSparkle => {
                let (visual, scale, fade) = if self == Template::AmbientHeart {
                    (
                        Visual::Heart,
                        uniform(rng, AMBIENT_HEART_SCALE.0, AMBIENT_HEART_SCALE.1),
                        Fade::Constant(AMBIENT_OPACITY),
                    )
                } else {
                    (
                        Visual::Sparkle,
                        uniform(rng, AMBIENT_SPARKLE_SCALE.0, AMBIENT_SPARKLE_SCALE.1),
                        Fade::Twinkle {
                            base: AMBIENT_OPACITY,
                            rate: AMBIENT_TWINKLE_RATE,
                            phase: rng.gen::<f32>() * TAU,
                        },
                    )
                };
                Particle {
                    visual,
                    scale,
                    color: pick(rng, palette.hearts, "#ff9ec5"),
                    fade,
                    sway: Sway {
                        amp: uniform(rng, AMBIENT_SWAY_AMP.0, AMBIENT_SWAY_AMP.1),
                        rate: AMBIENT_SWAY_RATE,
                        phase: rng.gen::<f32>() * TAU,
                    },
                    exit: Exit::Wrap {
                        top: AMBIENT_WRAP_TOP,
                        bottom: AMBIENT_WRAP_BOTTOM,
                        x_min: AMBIENT_X_RANGE.0,
                        x_max: AMBIENT_X_RANGE.1,
                    },
                    ..base
                }
            }
            Template::FloatingHeart { size } => Particle {
                visual: Visual::Glyph {
                    glyph: pick(rng, palette.glyphs, "💖"),
                    font_px: size.font_px(),
                },
                fade: Fade::Constant(FLOATING_OPACITY),
                sway: Sway {
                    amp: uniform(rng, FLOATING_SWAY_AMP.0, FLOATING_SWAY_AMP.1),
                    rate: FLOATING_SWAY_RATE,
                    phase: rng.gen::<f32>() * TAU,
                },
                exit: Exit::Wrap {
                    top: FLOATING_WRAP_TOP,
                    bottom: FLOATING_WRAP_BOTTOM,
                    x_min: 0.0,
                    x_max: AMBIENT_EXTENT,
                },
                ..base
            },
        }
    }
}
