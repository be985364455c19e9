//! Receiver wrappers: the vocabulary every stage uses to talk to its neighbours.
//!
//! A [`Receiver`] accepts one value per call; a [`Trigger`] accepts none and
//! stands for an event (a buffer flush). [`Sink`] and [`Signal`] adapt plain
//! closures to those traits. Stage receivers (`Mapped`, `FanOut`, ...) live
//! next to the stage that builds them.

use std::fmt;
use std::marker::PhantomData;

/// A data receiver: push one value, synchronously.
pub trait Receiver {
    /// The type of value this receiver accepts.
    type Item;

    /// Deliver one value. Returns once every reachable downstream receiver
    /// has handled it.
    fn push(&mut self, item: Self::Item);
}

/// A signal receiver: fire a notification with no payload.
pub trait Trigger {
    /// Fire the signal.
    fn signal(&mut self);
}

/// Wraps a one-argument callback as a [`Receiver`].
pub struct Sink<F, T> {
    f: F,
    _item: PhantomData<fn(T)>,
}

impl<F, T> Sink<F, T>
where
    F: FnMut(T),
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _item: PhantomData,
        }
    }
}

impl<F, T> Receiver for Sink<F, T>
where
    F: FnMut(T),
{
    type Item = T;

    #[inline]
    fn push(&mut self, item: T) {
        (self.f)(item)
    }
}

impl<F: Clone, T> Clone for Sink<F, T> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _item: PhantomData,
        }
    }
}

impl<F, T> fmt::Debug for Sink<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("item", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// Wraps a zero-argument callback as a [`Trigger`].
#[derive(Clone)]
pub struct Signal<F> {
    f: F,
}

impl<F> Signal<F>
where
    F: FnMut(),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Trigger for Signal<F>
where
    F: FnMut(),
{
    #[inline]
    fn signal(&mut self) {
        (self.f)()
    }
}

impl<F> fmt::Debug for Signal<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal").finish_non_exhaustive()
    }
}
