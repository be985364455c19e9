//! Built-in stage implementations.

pub mod branch;
pub mod buffer;
pub mod flat_map;
pub mod identity;
pub mod map;

pub use branch::{Branch, FanOut, Fork, ForkBy, Twice};
pub use buffer::{BufferForSignal, Enqueue, Flush};
pub use flat_map::{Expanded, FlatMap};
pub use identity::{identity, Identity};
pub use map::{Map, Mapped};
