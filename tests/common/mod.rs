// Shared host-side doubles: a surface that records what it was asked to do,
// and helpers that drive an engine with the manual frame scheduler.

#![allow(dead_code)]

use fx_core::*;

#[derive(Debug)]
pub struct RecordingSurface {
    pub viewport: Viewport,
    pub ensure_calls: usize,
    pub draws: usize,
    pub clears: usize,
    pub last_drawn: usize,
    pub last_space: Option<Space>,
    pub fail_with: Option<SurfaceError>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height, 1.0),
            ensure_calls: 0,
            draws: 0,
            clears: 0,
            last_drawn: 0,
            last_space: None,
            fail_with: None,
        }
    }

    pub fn failing(err: SurfaceError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new(1000.0, 600.0)
        }
    }
}

impl Surface for RecordingSurface {
    fn ensure(&mut self) -> Result<Viewport, SurfaceError> {
        self.ensure_calls += 1;
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(self.viewport),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.last_drawn = 0;
    }

    fn draw(&mut self, particles: &[Particle], space: Space) {
        self.draws += 1;
        self.last_drawn = particles.len();
        self.last_space = Some(space);
    }
}

pub type TestEngine = Engine<RecordingSurface, ManualFrames>;

pub fn engine(config: EngineConfig) -> TestEngine {
    Engine::new(config, RecordingSurface::new(1000.0, 600.0), ManualFrames::new(), 42)
}

pub fn confetti_engine() -> TestEngine {
    engine(EngineConfig::confetti())
}

/// Fire the outstanding frame request, if any, at `now_ms`.
pub fn fire_frame(e: &mut TestEngine, now_ms: f64) -> bool {
    if e.frames_mut().take_due().is_empty() {
        return false;
    }
    e.on_frame(now_ms);
    true
}

/// Fire frames every `step_ms` from `start_ms` until the loop goes idle or
/// `limit_ms` passes. Returns the timestamp of the last frame fired.
pub fn run_until_idle(e: &mut TestEngine, start_ms: f64, step_ms: f64, limit_ms: f64) -> f64 {
    let mut now = start_ms;
    while now <= limit_ms {
        if !fire_frame(e, now) {
            break;
        }
        if !e.is_running() {
            break;
        }
        now += step_ms;
    }
    now
}
