use crate::config::Palette;
use crate::particle::{Exit, Particle};
use crate::surface::Bounds;
use crate::template::{uniform, SpawnRequest};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Bounded set of live particles and the simulation step over them.
#[derive(Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
    next_id: u32,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn room(&self) -> usize {
        self.capacity.saturating_sub(self.particles.len())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Create up to `req.count` particles; anything beyond the capacity is
    /// dropped. Returns how many were created.
    pub fn spawn<R: Rng>(
        &mut self,
        req: &SpawnRequest,
        bounds: Bounds,
        palette: &Palette,
        rng: &mut R,
    ) -> usize {
        let n = req.count.min(self.room());
        if n < req.count {
            log::debug!(
                "[pool] at capacity {}: dropped {} of {} {:?}",
                self.capacity,
                req.count - n,
                req.count,
                req.template
            );
        }
        if n == 0 {
            return 0;
        }
        let origin = req.origin.resolve(bounds, rng);
        for _ in 0..n {
            let offset = Vec2::new(
                uniform(rng, -req.jitter.x, req.jitter.x),
                uniform(rng, -req.jitter.y, req.jitter.y),
            );
            let vel = req.sample_velocity(rng);
            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            self.particles
                .push(req.template.instantiate(id, origin + offset, vel, palette, rng));
        }
        n
    }

    /// Advance every particle by `dt_ms` and remove the ones that expired or
    /// left `bounds` by more than `margin`. Returns the number removed.
    pub fn tick<R: Rng>(&mut self, dt_ms: f32, bounds: Bounds, margin: f32, rng: &mut R) -> usize {
        let dt_ms = dt_ms.max(0.0);
        let dt = dt_ms / 1000.0;
        for p in &mut self.particles {
            // exact for constant acceleration, so step size does not matter
            p.pos += p.vel * dt + p.accel * (0.5 * dt * dt);
            p.vel += p.accel * dt;
            if p.damping < 1.0 {
                p.vel *= p.damping.powf(dt);
            }
            p.rotation += p.spin * dt;
            p.age_ms += dt_ms;

            if let Exit::Wrap {
                top,
                bottom,
                x_min,
                x_max,
            } = p.exit
            {
                let reenter = if p.pos.y > bottom {
                    Some(top)
                } else if p.pos.y < top {
                    Some(bottom)
                } else {
                    None
                };
                if let Some(y) = reenter {
                    p.pos = Vec2::new(uniform(rng, x_min, x_max), y);
                    p.sway.phase = rng.gen::<f32>() * TAU;
                }
            }
        }
        let before = self.particles.len();
        self.particles.retain(|p| {
            !p.is_expired() && !(p.exit == Exit::Prune && bounds.is_outside(p.pos, margin))
        });
        before - self.particles.len()
    }

    /// Re-randomize every sway phase so floaters stop moving in step.
    /// Positions are untouched.
    pub fn desync<R: Rng>(&mut self, rng: &mut R) {
        for p in &mut self.particles {
            if p.sway.amp != 0.0 {
                p.sway.phase = rng.gen::<f32>() * TAU;
            }
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
