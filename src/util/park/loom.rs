use loom::sync::atomic::{
    AtomicBool,
    Ordering::{AcqRel, Release},
};
use loom::sync::Notify;
use std::time::Instant;

/// loom mock implementation of [`Parker`](crate::util::park::real::Parker)
pub(crate) struct Parker {
    notify: Notify,
    token: AtomicBool,
}

impl Parker {
    pub(crate) fn new() -> Self {
        Self {
            notify: Notify::new(),
            token: AtomicBool::new(false),
        }
    }

    pub(crate) unsafe fn park(&self) {
        if !self.token.swap(false, AcqRel) {
            self.notify.wait();
        }
    }

    /// loom has no clock, so the deadline counts as passed unless
    /// an unpark already happened in this schedule.
    pub(crate) unsafe fn park_deadline(&self, _deadline: Instant) -> bool {
        self.token.swap(false, AcqRel)
    }

    pub(crate) fn unpark(&self) {
        self.token.store(true, Release);
        self.notify.notify();
    }
}
