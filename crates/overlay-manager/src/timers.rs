//! Cancel-on-supersede timer slots

use crate::host::{Scheduler, TimerId, TimerKind};

/// At most one scheduled callback of a given kind.
///
/// Scheduling into an occupied slot cancels the previous callback first,
/// so only the latest request of each kind can ever fire.
#[derive(Debug)]
pub struct TimerSlot {
    kind: TimerKind,
    pending: Option<TimerId>,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            pending: None,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn schedule<S: Scheduler>(&mut self, scheduler: &S, delay_ms: u32) -> TimerId {
        self.cancel(scheduler);
        let id = scheduler.schedule(self.kind, delay_ms);
        self.pending = Some(id);
        id
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Claim a fired timer. Returns false for stale ids, which must be ignored.
    pub fn claim(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
