//! FlatMap: one value in, zero or more values out.

use crate::pipeline::receiver::Receiver;
use crate::pipeline::slots::Attachment;
use crate::pipeline::stage::{Contramap, Stage};
use std::marker::PhantomData;

/// Stage expanding every value from `U` into the elements of `f(value)`.
#[derive(Clone)]
pub struct FlatMap<U, F> {
    upstream: U,
    f: F,
}

impl<U, F> FlatMap<U, F> {
    pub fn new(upstream: U, f: F) -> Self {
        Self { upstream, f }
    }
}

impl<U, F, I> Stage for FlatMap<U, F>
where
    U: Stage,
    F: FnMut(<U as Stage>::Downstream) -> I,
    I: IntoIterator,
{
    type Upstream = <U as Stage>::Downstream;
    type Downstream = I::Item;
}

impl<U, F, I, D> Contramap<D> for FlatMap<U, F>
where
    U: Stage,
    F: FnMut(<U as Stage>::Downstream) -> I,
    I: IntoIterator,
    D: Attachment,
    D::Primary: Receiver<Item = I::Item>,
    U: Contramap<D::WithPrimary<Expanded<F, D::Primary, <U as Stage>::Downstream>>>,
{
    type Entry =
        <U as Contramap<D::WithPrimary<Expanded<F, D::Primary, <U as Stage>::Downstream>>>>::Entry;

    fn contramap(self, downstream: D) -> Self::Entry {
        let FlatMap { upstream, f } = self;
        upstream.contramap(downstream.map_primary(|primary| Expanded::new(f, primary)))
    }
}

/// Receiver built by [`FlatMap`].
///
/// Every element produced for one input is pushed before `push` returns, so
/// outputs of consecutive inputs never interleave. A panic inside the
/// iterator leaves the elements already pushed delivered.
pub struct Expanded<F, D, I> {
    f: F,
    downstream: D,
    _input: PhantomData<fn(I)>,
}

impl<F, D, I> Expanded<F, D, I> {
    fn new(f: F, downstream: D) -> Self {
        Self {
            f,
            downstream,
            _input: PhantomData,
        }
    }
}

impl<F, D, In, Out> Receiver for Expanded<F, D, In>
where
    D: Receiver,
    F: FnMut(In) -> Out,
    Out: IntoIterator<Item = D::Item>,
{
    type Item = In;

    #[inline]
    fn push(&mut self, item: In) {
        for element in (self.f)(item) {
            self.downstream.push(element);
        }
    }
}

impl<F: Clone, D: Clone, I> Clone for Expanded<F, D, I> {
    fn clone(&self) -> Self {
        Self::new(self.f.clone(), self.downstream.clone())
    }
}
