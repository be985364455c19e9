//! Stage abstraction for the pipeline.
//!
//! Two traits split the work:
//! - **`Stage`**: declares the types flowing in and out of a stage and
//!   carries the chainable builder surface (`map`, `flat_map`, `branch`,
//!   `buffer_for_signal`, `sink`) as default methods, so every stage type gets
//!   it without re-declaring it.
//! - **`Contramap<D>`**: backward composition. Given the downstream
//!   attachment `D`, a stage builds the receiver that does its work and asks
//!   its upstream stage to wrap that in turn. `Identity` ends the recursion.
//!
//! Type mismatches between neighbouring stages are rejected by the trait
//! bounds, before any pipeline exists:
//!
//! ```compile_fail
//! use contraflow::{Identity, Stage};
//!
//! // A `u32` stage cannot feed a function taking `&str`.
//! let _entry = Identity::<u32>::new()
//!     .map(|s: &str| s.len())
//!     .sink(|n: usize| drop(n));
//! ```

use crate::config::BufferConfig;
use crate::pipeline::receiver::Sink;
use crate::pipeline::stages::{Branch, BufferForSignal, FlatMap, Map};

/// A pipeline node that owns its upstream chain by value.
pub trait Stage: Sized {
    /// The type of value this stage receives from its upstream.
    type Upstream;

    /// The type of value this stage emits.
    type Downstream;

    /// Transform every value with `f`.
    fn map<F, O>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(Self::Downstream) -> O,
    {
        Map::new(self, f)
    }

    /// Expand every value into the elements of `f(value)`, in iteration order.
    fn flat_map<F, I>(self, f: F) -> FlatMap<Self, F>
    where
        F: FnMut(Self::Downstream) -> I,
        I: IntoIterator,
    {
        FlatMap::new(self, f)
    }

    /// Duplicate every value to two downstream attachment points.
    fn branch(self) -> Branch<Self>
    where
        Self::Downstream: Clone,
    {
        Branch::new(self)
    }

    /// Hold values until the stage's signal fires.
    fn buffer_for_signal(self) -> BufferForSignal<Self> {
        BufferForSignal::new(self, BufferConfig::default())
    }

    /// Like [`buffer_for_signal`](Stage::buffer_for_signal) with explicit tunables.
    fn buffer_for_signal_with(self, config: BufferConfig) -> BufferForSignal<Self> {
        BufferForSignal::new(self, config)
    }

    /// Finalize the pipeline with `f` as the terminal callback.
    ///
    /// Returns the pipeline's entry point: a receiver, or a receiver group
    /// when buffer stages contribute signal slots.
    fn sink<F>(self, f: F) -> <Self as Contramap<Sink<F, <Self as Stage>::Downstream>>>::Entry
    where
        F: FnMut(<Self as Stage>::Downstream),
        Self: Contramap<Sink<F, <Self as Stage>::Downstream>>,
    {
        self.contramap(Sink::new(f))
    }

    /// Finalize the pipeline against an explicit receiver or receiver group.
    fn attach<D>(self, downstream: D) -> <Self as Contramap<D>>::Entry
    where
        Self: Contramap<D>,
    {
        self.contramap(downstream)
    }
}

/// Backward composition against the downstream attachment `D`.
pub trait Contramap<D>: Stage {
    /// What the whole pipeline up to and including this stage hands back.
    type Entry;

    /// Consume the stage and build its part of the receiver chain.
    fn contramap(self, downstream: D) -> Self::Entry;
}
