//! Nearwatch event queues.
//!
//! Work that must not be applied in the middle of another operation is
//! pushed onto an [`EventQueue`] and applied later by the queue's single
//! owner, strictly in arrival order.
//!
//! # Example
//!
//! ```
//! use nearwatch_event::EventQueue;
//!
//! let mut queue = EventQueue::new();
//! queue.push("first");
//! queue.push("second");
//!
//! let drained: Vec<_> = queue.drain().collect();
//! assert_eq!(drained, ["first", "second"]);
//! assert!(queue.is_empty());
//! ```

mod queue;

pub use queue::EventQueue;
