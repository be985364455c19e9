//! Map: one value in, one transformed value out.

use crate::pipeline::receiver::Receiver;
use crate::pipeline::slots::Attachment;
use crate::pipeline::stage::{Contramap, Stage};
use std::marker::PhantomData;

/// Stage applying `f` to every value from `U`.
#[derive(Clone)]
pub struct Map<U, F> {
    upstream: U,
    f: F,
}

impl<U, F> Map<U, F> {
    pub fn new(upstream: U, f: F) -> Self {
        Self { upstream, f }
    }
}

impl<U, F, O> Stage for Map<U, F>
where
    U: Stage,
    F: FnMut(<U as Stage>::Downstream) -> O,
{
    type Upstream = <U as Stage>::Downstream;
    type Downstream = O;
}

impl<U, F, O, D> Contramap<D> for Map<U, F>
where
    U: Stage,
    F: FnMut(<U as Stage>::Downstream) -> O,
    D: Attachment,
    D::Primary: Receiver<Item = O>,
    U: Contramap<D::WithPrimary<Mapped<F, D::Primary, <U as Stage>::Downstream>>>,
{
    type Entry =
        <U as Contramap<D::WithPrimary<Mapped<F, D::Primary, <U as Stage>::Downstream>>>>::Entry;

    fn contramap(self, downstream: D) -> Self::Entry {
        let Map { upstream, f } = self;
        upstream.contramap(downstream.map_primary(|primary| Mapped::new(f, primary)))
    }
}

/// Receiver built by [`Map`]: applies `f` and pushes the result downstream.
pub struct Mapped<F, D, I> {
    f: F,
    downstream: D,
    _input: PhantomData<fn(I)>,
}

impl<F, D, I> Mapped<F, D, I> {
    fn new(f: F, downstream: D) -> Self {
        Self {
            f,
            downstream,
            _input: PhantomData,
        }
    }
}

impl<F, D, I> Receiver for Mapped<F, D, I>
where
    D: Receiver,
    F: FnMut(I) -> D::Item,
{
    type Item = I;

    #[inline]
    fn push(&mut self, item: I) {
        let out = (self.f)(item);
        self.downstream.push(out);
    }
}

impl<F: Clone, D: Clone, I> Clone for Mapped<F, D, I> {
    fn clone(&self) -> Self {
        Self::new(self.f.clone(), self.downstream.clone())
    }
}
