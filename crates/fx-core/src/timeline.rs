//! Declarative effect sequences and the single cancelable scheduler that
//! runs them.

use crate::template::SpawnRequest;
use smallvec::SmallVec;

/// Upper bound on the steps a single `repeat` call expands into.
pub const MAX_REPEATS: usize = 2048;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Spawn(SpawnRequest),
    /// Hard stop: cancel everything pending, clear the pool, blank the surface.
    Stop,
}

/// One entry of a show, relative to the moment the show is played.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub delay_ms: f64,
    pub action: Action,
}

/// A named list of timed actions.
#[derive(Clone, Debug, PartialEq)]
pub struct Show {
    pub name: &'static str,
    pub steps: SmallVec<[Step; 8]>,
}

impl Show {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: SmallVec::new(),
        }
    }

    pub fn spawn(mut self, delay_ms: f64, req: SpawnRequest) -> Self {
        self.push_spawn(delay_ms, req);
        self
    }

    pub fn push_spawn(&mut self, delay_ms: f64, req: SpawnRequest) {
        self.steps.push(Step {
            delay_ms,
            action: Action::Spawn(req),
        });
    }

    pub fn stop_at(mut self, delay_ms: f64) -> Self {
        self.steps.push(Step {
            delay_ms,
            action: Action::Stop,
        });
        self
    }

    /// Expand a repeating interval into discrete steps at `start`,
    /// `start + every`, ... strictly before `until`, at most [`MAX_REPEATS`]
    /// times. `make` receives the repetition index and returns that
    /// repetition's spawns. Non-finite bounds expand to nothing.
    pub fn repeat(
        mut self,
        start_ms: f64,
        every_ms: f64,
        until_ms: f64,
        mut make: impl FnMut(usize) -> SmallVec<[SpawnRequest; 4]>,
    ) -> Self {
        if !(every_ms > 0.0 && start_ms.is_finite() && until_ms.is_finite()) {
            return self;
        }
        let mut i = 0usize;
        loop {
            let t = start_ms + every_ms * i as f64;
            if t >= until_ms {
                break;
            }
            if i == MAX_REPEATS {
                log::warn!("[show] {} truncated at {} repetitions", self.name, i);
                break;
            }
            for req in make(i) {
                self.push_spawn(t, req);
            }
            i += 1;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Delay of the last step.
    pub fn duration_ms(&self) -> f64 {
        self.steps.iter().map(|s| s.delay_ms).fold(0.0, f64::max)
    }
}

#[derive(Clone, Debug)]
struct Entry {
    due_ms: f64,
    seq: u64,
    show: &'static str,
    action: Action,
}

/// Pending actions ordered by due time, then by insertion order.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.entries.first().map(|e| e.due_ms)
    }

    /// Whether any step of the show named `name` is still waiting.
    pub fn has_pending(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.show == name)
    }

    /// Queue every step of `show` relative to `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, show: &Show) {
        for step in &show.steps {
            let entry = Entry {
                due_ms: now_ms + step.delay_ms.max(0.0),
                seq: self.seq,
                show: show.name,
                action: step.action,
            };
            self.seq += 1;
            let at = self
                .entries
                .partition_point(|e| (e.due_ms, e.seq) <= (entry.due_ms, entry.seq));
            self.entries.insert(at, entry);
        }
    }

    /// Remove and return every action due at or before `now_ms`, in order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Action> {
        let n = self.entries.partition_point(|e| e.due_ms <= now_ms);
        self.entries.drain(..n).map(|e| e.action).collect()
    }

    /// Drop every pending action. Returns how many were canceled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }
}
