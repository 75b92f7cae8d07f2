#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

// loom integration
#[doc(hidden)]
macro_rules! cfg_loom {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "loom")]
            $item
        )*
    };
}
#[doc(hidden)]
macro_rules! cfg_not_loom {
    ($($item:item)*) => {
        $(
            #[cfg(not(feature = "loom"))]
            $item
        )*
    };
}

#[doc(hidden)]
mod cell;
#[doc(hidden)]
mod sync;
//loom integration finished.

/// A module containing the error types used by the library.
pub mod error;

/// A bounded Multi Producer Multi Consumer handoff queue.
///
/// Producers [`enqueue`](handoff::HandoffQueue::enqueue) without ever blocking:
/// an item goes straight to the oldest blocked consumer if there is one,
/// into the buffer if there is room, and is handed back otherwise.
/// Consumers [`dequeue`](handoff::HandoffQueue::dequeue) and block until an item
/// is available.
///
/// # Example
///
/// ```
/// use handoff_qs::handoff::HandoffQueue;
/// use std::thread;
///
/// let queue = HandoffQueue::new(0);
/// let consumer = {
///     let queue = queue.clone();
///     thread::spawn(move || queue.dequeue())
/// };
///
/// // a zero capacity queue only accepts items someone is waiting for.
/// let mut item = "hello";
/// while let Err(rejected) = queue.enqueue(item) {
///     item = rejected.into_inner();
///     thread::yield_now();
/// }
/// assert_eq!(consumer.join().unwrap(), "hello");
/// ```
pub mod handoff;

mod util;
