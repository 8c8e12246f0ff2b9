//! Per-frame callback scheduling.
//!
//! The browser front-end backs this with `requestAnimationFrame`; host-side
//! drivers and tests use [`ManualFrames`], which only records requests.

/// Opaque id of an outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    /// Ask for one callback on the next display frame. `None` when the host
    /// cannot schedule frames at all.
    fn request(&mut self) -> Option<FrameHandle>;
    fn cancel(&mut self, handle: FrameHandle);
}

/// Loop state of an engine. `Running` always carries the one outstanding
/// frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running(FrameHandle),
}

impl LoopState {
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running(_))
    }
}

/// Scheduler that tracks requests without a display. The driver fires a
/// frame by calling [`ManualFrames::take_due`] and then the engine's frame
/// callback.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_id: i32,
    outstanding: Vec<FrameHandle>,
    requested_total: usize,
    canceled_total: usize,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests not yet fired or canceled.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    pub fn requested_total(&self) -> usize {
        self.requested_total
    }

    pub fn canceled_total(&self) -> usize {
        self.canceled_total
    }

    /// Consume the outstanding requests as if the display had fired them.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.outstanding)
    }
}

impl FrameScheduler for ManualFrames {
    fn request(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.outstanding.push(handle);
        self.requested_total += 1;
        Some(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let before = self.outstanding.len();
        self.outstanding.retain(|h| *h != handle);
        if self.outstanding.len() != before {
            self.canceled_total += 1;
        }
    }
}
