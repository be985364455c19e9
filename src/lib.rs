//! # contraflow: contravariant pipeline composition
//!
//! Build an in-process, push-based data pipeline by chaining stages in
//! natural order, then finalize it into one directly callable receiver.
//!
//! ## Stages
//!
//! - **`map`**: one value in, one value out
//! - **`flat_map`**: one value in, each element of a sequence out
//! - **`branch`**: every value to two attachment points
//! - **`buffer_for_signal`**: queue values until a signal flushes them
//!
//! ## Example
//!
//! ```
//! use contraflow::{Identity, Receiver, Sink, Stage, Trigger};
//! use std::sync::{Arc, Mutex};
//!
//! let left = Arc::new(Mutex::new(Vec::new()));
//! let right = Arc::new(Mutex::new(Vec::new()));
//!
//! let (l, r) = (left.clone(), right.clone());
//! let (mut push, mut flush) = Identity::<u32>::new()
//!     .map(|v| v * 2)
//!     .buffer_for_signal()
//!     .branch()
//!     .attach((
//!         Sink::new(move |v: u32| l.lock().unwrap().push(v)),
//!         Sink::new(move |v: u32| r.lock().unwrap().push(v)),
//!     ));
//!
//! push.push(1);
//! push.push(2);
//! assert!(left.lock().unwrap().is_empty());
//!
//! flush.signal();
//! assert_eq!(*left.lock().unwrap(), vec![2, 4]);
//! assert_eq!(*right.lock().unwrap(), vec![2, 4]);
//! ```
//!
//! ## Errors
//!
//! Mismatched stages fail to compile and callback panics unwind out of
//! `push`/`signal`. [`FlowError`] only covers loading buffer configuration.

pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use config::BufferConfig;
pub use error::{FlowError, Result, ResultExt};
pub use pipeline::{
    identity, set_first, set_first_pair, Attachment, Branch, BufferForSignal, Contramap,
    FlatMap, Identity, Map, Receiver, Signal, Sink, Stage, Trigger,
};
