use crate::cell::UnsafeCell;
use crate::sync::atomic::{
    AtomicBool,
    Ordering::{Acquire, Release},
};
use crate::util::park::Parker;
use std::time::Instant;

/// A consumer blocked in [`dequeue`](super::HandoffQueue::dequeue).
///
/// The slot is filled at most once, by the producer that pops the waiter
/// off the queue's waiter list. Only the consumer that created the waiter
/// parks on it or takes the item out.
///
/// Wake-ups can be spurious, so the consumer only trusts the slot
/// once [`is_resolved`](Waiter::is_resolved) says so.
pub(super) struct Waiter<T> {
    slot: UnsafeCell<Option<T>>,
    resolved: AtomicBool,
    parker: Parker,
}

impl<T> Waiter<T> {
    pub(super) fn new() -> Self {
        Self {
            slot: UnsafeCell::new(None),
            resolved: AtomicBool::new(false),
            parker: Parker::new(),
        }
    }

    /// Fills the slot. Call [`wake`](Waiter::wake) once the queue lock is released.
    ///
    /// # Safety
    ///
    /// The caller must hold the queue lock and must have just removed
    /// this waiter from the waiter list.
    pub(super) unsafe fn resolve(&self, item: T) {
        self.slot.with_mut(|ptr| {
            /*SAFETY:
             *the waiter was in the list until now, so its consumer
             *hasn't read the slot yet and no other producer can reach it.
             */
            let slot = unsafe { &mut *ptr };
            debug_assert!(slot.is_none(), "waiter resolved twice.");
            *slot = Some(item);
        });
        self.resolved.store(true, Release);
    }

    /// Once this returns `true` the slot holds the item and nobody writes it again.
    pub(super) fn is_resolved(&self) -> bool {
        self.resolved.load(Acquire)
    }

    pub(super) fn wake(&self) {
        self.parker.unpark();
    }

    /// # Safety
    ///
    /// Only the consumer that created the waiter may call this.
    pub(super) unsafe fn park(&self) {
        unsafe { self.parker.park() }
    }

    /// Returns `false` if `deadline` passed first. The waiter might still
    /// have been resolved in the meantime, check under the queue lock.
    ///
    /// # Safety
    ///
    /// Only the consumer that created the waiter may call this.
    pub(super) unsafe fn park_deadline(&self, deadline: Instant) -> bool {
        unsafe { self.parker.park_deadline(deadline) }
    }

    /// # Safety
    ///
    /// Only the consumer that created the waiter may call this, after seeing
    /// [`is_resolved`](Waiter::is_resolved) return `true`, or while holding the
    /// queue lock after the waiter left the list.
    pub(super) unsafe fn take(&self) -> Option<T> {
        /*SAFETY:
         *the producer wrote the slot before setting `resolved` and
         *before releasing the queue lock, either of which the caller
         *synchronised with.
         */
        self.slot.with_mut(|ptr| unsafe { (*ptr).take() })
    }
}

// The slot is only touched under the rules documented on the methods above.
unsafe impl<T: Send> Send for Waiter<T> {}
unsafe impl<T: Send> Sync for Waiter<T> {}
