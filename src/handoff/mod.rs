use crate::error::{CapacityExceeded, Cancelled, InvalidCapacity};
use crate::sync::Arc;
use std::fmt;
use std::time::{Duration, Instant};

mod inner;
use inner::Inner;

mod waiter;

/// A handle to a bounded handoff queue.
///
/// Cloning the handle is cheap and every clone refers to the same queue.
/// Any number of threads may [`enqueue`](HandoffQueue::enqueue) and
/// [`dequeue`](HandoffQueue::dequeue) concurrently.
///
/// The queue holds either buffered items or blocked consumers, never both:
/// an item only gets buffered when nobody is waiting for it, and a consumer
/// only blocks when there is nothing buffered.
pub struct HandoffQueue<T> {
    inner: Arc<Inner<T>>,
}

impl<T> HandoffQueue<T> {
    /// Creates a queue that buffers at most `capacity` items.
    ///
    /// A zero capacity queue never buffers. Enqueueing into it only
    /// succeeds while a consumer is blocked in [`dequeue`](HandoffQueue::dequeue).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner::new(capacity)),
        }
    }

    /// Creates a queue from any integer capacity.
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is negative or doesn't fit in a `usize`.
    ///
    /// ```
    /// use handoff_qs::handoff::HandoffQueue;
    ///
    /// assert!(HandoffQueue::<()>::try_new(-1).is_err());
    /// assert_eq!(HandoffQueue::<()>::try_new(3u64).unwrap().capacity(), 3);
    /// ```
    pub fn try_new<C: TryInto<usize>>(capacity: C) -> Result<Self, InvalidCapacity> {
        let capacity = capacity.try_into().map_err(|_| InvalidCapacity {})?;
        Ok(Self::new(capacity))
    }

    /// Hands `item` to the longest waiting consumer, or buffers it if nobody is waiting.
    ///
    /// Never blocks. If the buffer is full and no consumer is waiting, the queue
    /// is left as it was and `item` is returned inside [`CapacityExceeded`].
    #[inline]
    pub fn enqueue(&self, item: T) -> Result<(), CapacityExceeded<T>> {
        self.inner.enqueue(item)
    }

    /// Takes the oldest buffered item.
    ///
    /// If the buffer is empty, blocks until a producer hands over an item.
    /// Blocked consumers are served in the order they called `dequeue`.
    /// This may block forever if nothing is ever enqueued.
    #[inline]
    pub fn dequeue(&self) -> T {
        self.inner.dequeue()
    }

    /// Like [`dequeue`](HandoffQueue::dequeue), but gives up after `timeout`.
    ///
    /// On timeout the consumer stops waiting and [`Cancelled`] is returned;
    /// the queue continues as if the call never blocked.
    pub fn dequeue_timeout(&self, timeout: Duration) -> Result<T, Cancelled> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.dequeue_deadline(deadline),
            // too far in the future to ever expire.
            None => Ok(self.dequeue()),
        }
    }

    /// Like [`dequeue`](HandoffQueue::dequeue), but gives up at `deadline`.
    ///
    /// An item handed over just as the deadline passes is still returned.
    #[inline]
    pub fn dequeue_deadline(&self, deadline: Instant) -> Result<T, Cancelled> {
        self.inner.dequeue_deadline(deadline)
    }

    /// Takes the oldest buffered item without blocking.
    ///
    /// Returns `None` if nothing is buffered. Unlike the blocking methods
    /// this never registers as a waiting consumer.
    #[inline]
    pub fn try_dequeue(&self) -> Option<T> {
        self.inner.try_dequeue()
    }

    /// The maximum number of buffered items.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// The number of buffered items.
    pub fn len(&self) -> usize {
        self.inner.snapshot().0
    }

    /// Checks if no items are buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the buffer is at capacity.
    ///
    /// A full queue still accepts items while consumers are waiting,
    /// which is only possible for a zero capacity queue.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// The number of consumers blocked waiting for an item.
    pub fn waiting(&self) -> usize {
        self.inner.snapshot().1
    }
}

impl<T> Clone for HandoffQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for HandoffQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (len, waiting) = self.inner.snapshot();
        f.debug_struct("HandoffQueue")
            .field("capacity", &self.capacity())
            .field("len", &len)
            .field("waiting", &waiting)
            .finish()
    }
}
