use crate::constants::AMBIENT_EXTENT;
use crate::error::SurfaceError;
use crate::particle::Particle;
use glam::Vec2;

/// Coordinate space a surface draws in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    /// CSS pixels of the viewport.
    Pixels,
    /// Fixed 0..100 on both axes, independent of the viewport.
    Percent,
}

impl Space {
    /// Position in CSS pixels of `viewport`.
    pub fn to_css(self, pos: Vec2, viewport: Viewport) -> Vec2 {
        match self {
            Space::Pixels => pos,
            Space::Percent => Vec2::new(
                pos.x * viewport.width / AMBIENT_EXTENT,
                pos.y * viewport.height / AMBIENT_EXTENT,
            ),
        }
    }

    /// Position as a percentage of `viewport`.
    pub fn to_percent(self, pos: Vec2, viewport: Viewport) -> Vec2 {
        match self {
            Space::Percent => pos,
            Space::Pixels => Vec2::new(
                pos.x * AMBIENT_EXTENT / viewport.width.max(1.0),
                pos.y * AMBIENT_EXTENT / viewport.height.max(1.0),
            ),
        }
    }
}

/// Viewport as reported by the page: CSS size plus device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr: dpr.max(1.0),
        }
    }

    /// Backing store size in device pixels, never zero.
    pub fn backing_px(&self) -> (u32, u32) {
        let w = (self.width * self.dpr).floor() as u32;
        let h = (self.height * self.dpr).floor() as u32;
        (w.max(1), h.max(1))
    }
}

/// Extent of the simulation region in surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn for_space(space: Space, viewport: Viewport) -> Self {
        match space {
            Space::Pixels => Self::new(viewport.width, viewport.height),
            Space::Percent => Self::new(AMBIENT_EXTENT, AMBIENT_EXTENT),
        }
    }

    #[inline]
    pub fn at_fraction(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.at_fraction(0.5, 0.5)
    }

    /// Whether `pos` has left the region by more than `margin` on the left,
    /// right or bottom. The top edge is open.
    #[inline]
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin || pos.x > self.width + margin || pos.y > self.height + margin
    }
}

/// A render target owned by exactly one engine. The engine decides the
/// coordinate space; the surface reports the viewport it covers.
pub trait Surface {
    /// Create the underlying element on first use. Safe to call repeatedly.
    fn ensure(&mut self) -> Result<Viewport, SurfaceError>;
    /// Recompute dimensions after a viewport change.
    fn resize(&mut self, viewport: Viewport);
    fn viewport(&self) -> Viewport;
    /// Blank the surface, removing anything drawn.
    fn clear(&mut self);
    /// Draw the current particle set, positioned in `space`, replacing the
    /// previous frame.
    fn draw(&mut self, particles: &[Particle], space: Space);
}
