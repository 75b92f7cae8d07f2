use crate::sync::atomic::{
    AtomicUsize,
    Ordering::{Acquire, Release},
};
use crate::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// park/unpark equivalent, except can be embedded in objects.
///
/// Every blocked consumer of a [`HandoffQueue`](crate::handoff::HandoffQueue)
/// sleeps on its own `Parker`, so producers wake exactly the consumer they
/// handed an item to.
///
/// based on https://doc.rust-lang.org/src/std/sys_common/thread_parking/futex.rs.html
/*If we're unlucky enough to have a Parker split across
 *cachelines, it's important to have state at the top.*/
#[repr(C)]
pub(crate) struct Parker {
    state: AtomicUsize,
    condvar: Condvar,
    mutex: Mutex<()>,
}

const NOTIFIED: usize = 0;
const EMPTY: usize = 1;
const PARKED: usize = 2;

impl Parker {
    #[cfg(not(feature = "loom"))]
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicUsize::new(EMPTY),
            condvar: Condvar::new(),
            mutex: Mutex::new(()),
        }
    }
    #[cfg(feature = "loom")]
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicUsize::new(EMPTY),
            condvar: Condvar::new(),
            mutex: Mutex::new(()),
        }
    }

    /// Blocks until [`unpark`](Parker::unpark) is called, returning immediately
    /// if it already was.
    ///
    /// SAFETY: this method can't _EVER_ be called concurrently.
    #[inline(always)]
    pub(crate) unsafe fn park(&self) {
        // Do NOTIFIED=>EMPTY or EMPTY=>PARKED
        match self.state.fetch_add(1, Acquire) {
            NOTIFIED => return,
            EMPTY => self.park_slow(),
            _ => panic!("Invalid call to Parker::park."),
        }
    }

    /// Like [`park`](Parker::park), but gives up at `deadline`.
    ///
    /// Returns `true` if the parker was unparked, `false` if it timed out.
    /// A notification racing with the timeout is consumed and reported as `true`.
    ///
    /// SAFETY: this method can't be called concurrently with itself or [`park`](Parker::park).
    pub(crate) unsafe fn park_deadline(&self, deadline: Instant) -> bool {
        match self.state.fetch_add(1, Acquire) {
            NOTIFIED => return true,
            EMPTY => {}
            _ => panic!("Invalid call to Parker::park_deadline."),
        }

        let mut m = self.lock();
        loop {
            if self
                .state
                .compare_exchange(NOTIFIED, EMPTY, Acquire, Acquire)
                .is_ok()
            {
                return true;
            }
            match self.wait_until(m, deadline) {
                Some(g) => m = g,
                None => break, //the guard was released on the way out.
            }
        }

        // PARKED=>EMPTY, unless an unpark got in first.
        self.state.swap(EMPTY, Acquire) == NOTIFIED
    }

    #[inline(never)]
    fn park_slow(&self) {
        let mut m = self.lock();

        loop {
            if self
                .state
                .compare_exchange(NOTIFIED, EMPTY, Acquire, Acquire)
                .is_ok()
            {
                return; //got our notification.
            } else {
                //spurious wake-up.
            }

            m = self.condvar.wait(m).unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub(crate) fn unpark(&self) {
        if self.state.swap(NOTIFIED, Release) == PARKED {
            /*
             * The parked thread might hold the mutex and be between
             * checking the state and waiting on the condvar, where
             * notify_one would be lost. Taking the lock after writing
             * NOTIFIED, but before notifying, rules that out; the
             * state check in park_slow covers the thread that hasn't
             * locked yet.
             */
            drop(self.mutex.lock());
            self.condvar.notify_one();
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        //thread::park doesn't transmit panics, so we ignore poison.
        self.mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits on the condvar once. `None` once `deadline` has passed.
    #[cfg(not(feature = "loom"))]
    fn wait_until<'a>(
        &self,
        m: MutexGuard<'a, ()>,
        deadline: Instant,
    ) -> Option<MutexGuard<'a, ()>> {
        let timeout = deadline.checked_duration_since(Instant::now())?;
        if timeout.is_zero() {
            return None;
        }
        let (m, _) = self
            .condvar
            .wait_timeout(m, timeout)
            .unwrap_or_else(PoisonError::into_inner);
        Some(m)
    }

    /// loom has no clock, so every deadline is treated as already passed.
    #[cfg(feature = "loom")]
    fn wait_until<'a>(
        &self,
        _m: MutexGuard<'a, ()>,
        _deadline: Instant,
    ) -> Option<MutexGuard<'a, ()>> {
        None
    }
}

unsafe impl Send for Parker {}
unsafe impl Sync for Parker {}
