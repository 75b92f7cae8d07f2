use super::waiter::Waiter;
use crate::error::{CapacityExceeded, Cancelled};
use crate::sync::{Arc, Mutex, MutexGuard, PoisonError};
use log::{debug, trace};
use std::collections::VecDeque;
use std::time::Instant;

pub(crate) struct Inner<T> {
    capacity: usize,
    state: Mutex<State<T>>,
}

/// Never holds buffered items and waiters at the same time.
struct State<T> {
    buffer: VecDeque<T>,
    waiters: VecDeque<Arc<Waiter<T>>>,
}

/// Outcome of the non-blocking half of a dequeue.
enum Claim<T> {
    Ready(T),
    Wait(Arc<Waiter<T>>),
}

impl<T> Inner<T> {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(State {
                buffer: VecDeque::new(),
                waiters: VecDeque::new(),
            }),
        }
    }

    pub(super) fn enqueue(&self, item: T) -> Result<(), CapacityExceeded<T>> {
        let mut state = self.lock();

        if let Some(waiter) = state.waiters.pop_front() {
            debug_assert!(state.buffer.is_empty());
            /*SAFETY:
             *we hold the lock and just popped the waiter,
             *so nobody else can resolve it.
             */
            unsafe { waiter.resolve(item) };
            let waiting = state.waiters.len();
            drop(state);

            trace!("handed item to a blocked consumer ({waiting} still waiting)");
            waiter.wake();
            return Ok(());
        }

        if state.buffer.len() < self.capacity {
            state.buffer.push_back(item);
            trace!(
                "buffered item ({}/{} slots used)",
                state.buffer.len(),
                self.capacity
            );
            return Ok(());
        }

        debug!(
            "rejected item, buffer full and no consumer waiting (capacity {})",
            self.capacity
        );
        Err(CapacityExceeded::new(item, self.capacity))
    }

    pub(super) fn try_dequeue(&self) -> Option<T> {
        self.lock().buffer.pop_front()
    }

    pub(super) fn dequeue(&self) -> T {
        let waiter = match self.claim() {
            Claim::Ready(item) => return item,
            Claim::Wait(waiter) => waiter,
        };

        /*SAFETY:
         *the waiter was created by this call, so we're the only one
         *parking on it and taking from it.
         */
        while !waiter.is_resolved() {
            unsafe { waiter.park() };
        }
        match unsafe { waiter.take() } {
            Some(item) => item,
            None => panic!("resolved waiter without an item."),
        }
    }

    pub(super) fn dequeue_deadline(&self, deadline: Instant) -> Result<T, Cancelled> {
        let waiter = match self.claim() {
            Claim::Ready(item) => return Ok(item),
            Claim::Wait(waiter) => waiter,
        };

        //SAFETY: same as in dequeue.
        while !waiter.is_resolved() {
            if !unsafe { waiter.park_deadline(deadline) } {
                return self.withdraw(&waiter);
            }
        }
        match unsafe { waiter.take() } {
            Some(item) => Ok(item),
            None => panic!("resolved waiter without an item."),
        }
    }

    /// Removes a timed out waiter, unless a producer resolved it first.
    fn withdraw(&self, waiter: &Arc<Waiter<T>>) -> Result<T, Cancelled> {
        let mut state = self.lock();
        let position = state.waiters.iter().position(|w| Arc::ptr_eq(w, waiter));
        match position {
            Some(at) => {
                // Still listed, so no producer got to it.
                state.waiters.remove(at);
                drop(state);
                debug!("dequeue timed out, withdrew blocked consumer");
                Err(Cancelled {})
            }
            None => {
                //SAFETY: a producer resolved the waiter under the lock we now hold.
                match unsafe { waiter.take() } {
                    Some(item) => Ok(item),
                    None => panic!("consumer left the waiter list without an item."),
                }
            }
        }
    }

    /// Wakes every blocked consumer without handing it anything.
    #[cfg(test)]
    pub(super) fn wake_spuriously(&self) {
        self.lock().waiters.iter().for_each(|w| w.wake());
    }

    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Buffered items and blocked consumers, in that order.
    pub(super) fn snapshot(&self) -> (usize, usize) {
        let state = self.lock();
        (state.buffer.len(), state.waiters.len())
    }

    /// Takes the oldest buffered item, or registers a new waiter.
    fn claim(&self) -> Claim<T> {
        let mut state = self.lock();
        if let Some(item) = state.buffer.pop_front() {
            return Claim::Ready(item);
        }

        let waiter = Arc::new(Waiter::new());
        state.waiters.push_back(waiter.clone());
        trace!(
            "consumer blocked waiting for an item ({} waiting)",
            state.waiters.len()
        );
        Claim::Wait(waiter)
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // No user code runs under the lock, so the state is consistent even if poisoned.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
