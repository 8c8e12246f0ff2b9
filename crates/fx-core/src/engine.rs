use crate::config::EngineConfig;
use crate::error::SurfaceError;
use crate::frame::{FrameScheduler, LoopState};
use crate::pool::ParticlePool;
use crate::shows;
use crate::surface::{Bounds, Surface, Viewport};
use crate::template::SpawnRequest;
use crate::timeline::{Action, Show, Timeline};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceHealth {
    /// Not created yet, or the page was not ready on the last attempt.
    Pending,
    Ready,
    /// Context could not be obtained; the engine is a no-op from now on.
    Disabled,
}

/// One particle effect layer: a pool, the surface it draws on, and the
/// frame loop that drives both.
///
/// The loop is `Idle` until something is spawned or a show is played, and
/// returns to `Idle` on its own once the pool is empty and no steps are
/// pending. At most one frame request is outstanding at any time.
pub struct Engine<S: Surface, F: FrameScheduler> {
    config: EngineConfig,
    pool: ParticlePool,
    surface: S,
    frames: F,
    timeline: Timeline,
    state: LoopState,
    health: SurfaceHealth,
    bounds: Bounds,
    clock_ms: f64,
    last_frame_ms: Option<f64>,
    rng: StdRng,
}

impl<S: Surface, F: FrameScheduler> Engine<S, F> {
    pub fn new(config: EngineConfig, surface: S, frames: F, seed: u64) -> Self {
        let bounds = Bounds::for_space(config.space, surface.viewport());
        Self {
            pool: ParticlePool::new(config.capacity),
            config,
            surface,
            frames,
            timeline: Timeline::new(),
            state: LoopState::Idle,
            health: SurfaceHealth::Pending,
            bounds,
            clock_ms: 0.0,
            last_frame_ms: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn active(&self) -> usize {
        self.pool.len()
    }

    pub fn pending_steps(&self) -> usize {
        self.timeline.len()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn health(&self) -> SurfaceHealth {
        self.health
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Simulation clock: total elapsed frame time while running.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    /// Create the surface if needed. Returns whether it can be drawn on.
    pub fn ensure_surface(&mut self) -> bool {
        match self.health {
            SurfaceHealth::Ready => true,
            SurfaceHealth::Disabled => false,
            SurfaceHealth::Pending => match self.surface.ensure() {
                Ok(viewport) => {
                    self.bounds = Bounds::for_space(self.config.space, viewport);
                    self.health = SurfaceHealth::Ready;
                    true
                }
                Err(SurfaceError::NotReady(why)) => {
                    log::debug!("[fx] surface not ready yet: {}", why);
                    false
                }
                Err(e @ SurfaceError::Unavailable(_)) => {
                    log::warn!("[fx] disabling effects: {}", e);
                    self.stop();
                    self.health = SurfaceHealth::Disabled;
                    false
                }
            },
        }
    }

    /// Recompute surface dimensions. Live particles keep their coordinates.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.health == SurfaceHealth::Disabled {
            return;
        }
        self.surface.resize(viewport);
        self.bounds = Bounds::for_space(self.config.space, viewport);
    }

    /// Spawn immediately and wake the loop. Returns the number created,
    /// which is zero at capacity or when the surface is unavailable.
    pub fn spawn(&mut self, req: &SpawnRequest) -> usize {
        if self.health == SurfaceHealth::Disabled {
            return 0;
        }
        self.ensure_surface();
        if self.health == SurfaceHealth::Disabled {
            return 0;
        }
        let n = self
            .pool
            .spawn(req, self.bounds, &self.config.palette, &mut self.rng);
        if n > 0 {
            self.wake();
        }
        n
    }

    /// Advance the simulation by `dt_ms`. Returns the number of particles
    /// retired.
    pub fn tick(&mut self, dt_ms: f32) -> usize {
        self.pool
            .tick(dt_ms, self.bounds, self.config.exit_margin, &mut self.rng)
    }

    pub fn render(&mut self) {
        if self.ensure_surface() {
            self.surface.draw(self.pool.particles(), self.config.space);
        }
    }

    /// Empty the pool and blank the surface. Pending steps are kept.
    pub fn clear(&mut self) {
        self.pool.clear();
        if self.health == SurfaceHealth::Ready {
            self.surface.clear();
        }
    }

    /// Queue a show relative to the current clock and wake the loop.
    pub fn play(&mut self, show: &Show) -> bool {
        if self.health == SurfaceHealth::Disabled {
            return false;
        }
        self.ensure_surface();
        if self.health == SurfaceHealth::Disabled || show.is_empty() {
            return false;
        }
        log::debug!("[fx] play {} ({} steps)", show.name, show.len());
        self.timeline.schedule(self.clock_ms, show);
        self.wake()
    }

    /// Launch the celebratory show alongside whatever is already running.
    /// No-op while an earlier launch still has steps pending.
    pub fn start(&mut self, origin_hint: Option<Vec2>) -> bool {
        if self.timeline.has_pending(shows::LAUNCH) {
            log::debug!("[fx] start ignored: launch already pending");
            return false;
        }
        self.play(&shows::launch(origin_hint))
    }

    pub fn burst(&mut self, x: f32, y: f32, count: Option<usize>) -> bool {
        let count = count.unwrap_or(shows::DEFAULT_BURST_COUNT);
        self.play(&shows::burst(Vec2::new(x, y), count))
    }

    pub fn firework(&mut self, x: f32, y: f32) -> bool {
        self.play(&shows::firework(Vec2::new(x, y)))
    }

    pub fn drizzle(&mut self, duration_ms: f64) -> bool {
        self.play(&shows::drizzle(duration_ms))
    }

    pub fn popper(&mut self, x: f32, y: f32) -> bool {
        self.play(&shows::popper(Vec2::new(x, y)))
    }

    /// Re-randomize sway phases of the live particles.
    pub fn desync(&mut self) {
        self.pool.desync(&mut self.rng);
    }

    /// Hard stop: cancel the frame request and every pending step, clear the
    /// pool, blank the surface.
    pub fn stop(&mut self) {
        if let LoopState::Running(handle) = self.state {
            self.frames.cancel(handle);
        }
        self.state = LoopState::Idle;
        self.last_frame_ms = None;
        let canceled = self.timeline.cancel_all();
        if canceled > 0 {
            log::debug!("[fx] stop canceled {} pending steps", canceled);
        }
        self.clear();
    }

    /// Per-frame callback. `now_ms` is a monotonic timestamp; the first frame
    /// after waking advances by zero.
    pub fn on_frame(&mut self, now_ms: f64) {
        if !self.is_running() {
            return;
        }
        let dt_ms = match self.last_frame_ms {
            Some(prev) => ((now_ms - prev) as f32).clamp(0.0, self.config.max_frame_dt_ms),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.clock_ms += f64::from(dt_ms);

        self.run_due();
        if !self.is_running() {
            return;
        }
        self.tick(dt_ms);
        self.render();

        if self.pool.is_empty() && self.timeline.is_empty() {
            log::debug!("[fx] pool drained, loop idle");
            self.state = LoopState::Idle;
            self.last_frame_ms = None;
        } else {
            self.schedule_frame();
        }
    }

    fn run_due(&mut self) {
        for action in self.timeline.take_due(self.clock_ms) {
            match action {
                Action::Spawn(req) => {
                    self.spawn(&req);
                }
                Action::Stop => {
                    self.stop();
                    break;
                }
            }
        }
    }

    /// Idle -> Running. Returns whether the loop is running afterwards.
    fn wake(&mut self) -> bool {
        if !self.is_running() {
            self.last_frame_ms = None;
            self.schedule_frame();
        }
        self.is_running()
    }

    fn schedule_frame(&mut self) {
        self.state = match self.frames.request() {
            Some(handle) => LoopState::Running(handle),
            None => {
                log::warn!("[fx] cannot schedule frames; effects paused");
                LoopState::Idle
            }
        };
    }
}
