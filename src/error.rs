use std::fmt;
use thiserror::Error;

/// Error for the [`enqueue`](crate::handoff::HandoffQueue::enqueue) method.
///
/// Returned when the buffer was already full and no consumer was waiting.
/// The queue is left untouched and the rejected item is handed back,
/// retrievable with [`into_inner`](CapacityExceeded::into_inner).
#[derive(Error, PartialEq, Eq, Clone, Copy)]
#[error("enqueueing into a full queue (capacity {capacity})")]
pub struct CapacityExceeded<T> {
    item: T,
    capacity: usize,
}

impl<T> CapacityExceeded<T> {
    pub(crate) fn new(item: T, capacity: usize) -> Self {
        Self { item, capacity }
    }

    /// Returns the item that couldn't be enqueued.
    pub fn into_inner(self) -> T {
        self.item
    }

    /// The capacity of the queue that rejected the item.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> fmt::Debug for CapacityExceeded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityExceeded")
            .field("item", &format_args!(".."))
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Error for [`HandoffQueue::try_new`](crate::handoff::HandoffQueue::try_new).
///
/// The requested capacity was negative or didn't fit in a `usize`.
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
#[error("queue capacity must be a non-negative integer that fits in usize")]
pub struct InvalidCapacity {}

/// Error for the timed dequeue methods.
///
/// Returned when the wait expired before a producer handed over an item.
/// The waiting consumer is withdrawn, so no item is ever delivered to it.
///
/// The timed methods are
/// - [dequeue_timeout](crate::handoff::HandoffQueue::dequeue_timeout)
/// - [dequeue_deadline](crate::handoff::HandoffQueue::dequeue_deadline)
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
#[error("dequeue was cancelled before an item arrived")]
pub struct Cancelled {}
