//! Push-based pipeline composition.
//!
//! A pipeline is declared front to back, but the receiver that values are
//! pushed into is built back to front: each stage wraps the receiver handed
//! to it by the stage after it and passes the result to its upstream.
//!
//! # Architecture
//!
//! ```text
//! declaration:   Identity<T> ──► Map ──► FlatMap ──► Branch ──► sink(f)
//! finalization:  Identity ◄── Mapped ◄── Expanded ◄── FanOut ◄── Sink(f)
//! ```
//!
//! # Design
//!
//! - **Static composition**: every stage receiver is a named generic type,
//!   so the finalized pipeline is one nested call chain with no boxing.
//! - **Slot groups**: structural stages hand tuples of receivers upstream.
//!   Slot 0 is the data path; buffer signals are appended after it. Data
//!   and signal slots are told apart by type (`SlotKind`), which is how a
//!   `branch` upstream of a buffer finds its branches.
//! - **Synchronous**: a push runs every reachable stage on the caller's
//!   thread. Only `BufferForSignal` holds shared state.

pub mod receiver;
pub mod slots;
pub mod stage;
pub mod stages;

pub use receiver::{Receiver, Signal, Sink, Trigger};
pub use slots::{
    set_first, set_first_pair, Attachment, DataSlot, SignalSlot, SlotKind, SlotPair,
};
pub use stage::{Contramap, Stage};
pub use stages::{
    identity, Branch, BufferForSignal, Enqueue, Expanded, FanOut, FlatMap, Flush, Fork, ForkBy,
    Identity, Map, Mapped, Twice,
};
