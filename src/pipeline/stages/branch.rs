//! Branch: duplicate every value to two downstream attachment points.
//!
//! The two branches are the first two data slots of the attachment. When
//! there is only one data slot (a single receiver, or a group whose other
//! slots are signals), it stands in for both and sees every value twice.

use crate::pipeline::receiver::Receiver;
use crate::pipeline::slots::{DataSlot, SignalSlot, SlotKind};
use crate::pipeline::stage::{Contramap, Stage};

/// Fan-out stage.
#[derive(Clone)]
pub struct Branch<U> {
    upstream: U,
}

impl<U> Branch<U> {
    pub fn new(upstream: U) -> Self {
        Self { upstream }
    }
}

impl<U> Stage for Branch<U>
where
    U: Stage,
    <U as Stage>::Downstream: Clone,
{
    type Upstream = <U as Stage>::Downstream;
    type Downstream = <U as Stage>::Downstream;
}

impl<U, D> Contramap<D> for Branch<U>
where
    U: Stage,
    <U as Stage>::Downstream: Clone,
    D: Fork,
    U: Contramap<D::Forked>,
{
    type Entry = <U as Contramap<D::Forked>>::Entry;

    fn contramap(self, downstream: D) -> Self::Entry {
        self.upstream.contramap(downstream.fork())
    }
}

/// Receiver built by [`Branch`]: pushes a copy to `first`, then the
/// original to `second`.
#[derive(Clone)]
pub struct FanOut<A, B> {
    first: A,
    second: B,
}

impl<A, B> FanOut<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Receiver for FanOut<A, B>
where
    A: Receiver,
    A::Item: Clone,
    B: Receiver<Item = A::Item>,
{
    type Item = A::Item;

    #[inline]
    fn push(&mut self, item: A::Item) {
        self.first.push(item.clone());
        self.second.push(item);
    }
}

/// Receiver built by [`Branch`] when both branches lead to the same place:
/// pushes a copy and then the original into one receiver.
#[derive(Clone)]
pub struct Twice<R> {
    inner: R,
}

impl<R> Twice<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R> Receiver for Twice<R>
where
    R: Receiver,
    R::Item: Clone,
{
    type Item = R::Item;

    #[inline]
    fn push(&mut self, item: R::Item) {
        self.inner.push(item.clone());
        self.inner.push(item);
    }
}

/// Attachments a [`Branch`] can split into.
///
/// - A single receiver takes both branches ([`Twice`]).
/// - A group whose slot 1 is a data slot sends the branches to slots 0 and 1,
///   fused into one [`FanOut`]; later slots shift down by one.
/// - A group whose slot 1 is a signal has one data slot, which takes both
///   branches; the signals are kept in place.
pub trait Fork {
    /// The attachment handed upstream.
    type Forked;

    fn fork(self) -> Self::Forked;
}

impl<R: Receiver> Fork for R {
    type Forked = Twice<R>;

    fn fork(self) -> Twice<R> {
        Twice::new(self)
    }
}

/// Group forking, chosen by the [`SlotKind`] of slot 1.
pub trait ForkBy<K> {
    type Forked;

    fn fork_by(self) -> Self::Forked;
}

impl<A, B> ForkBy<DataSlot> for (A, B) {
    type Forked = FanOut<A, B>;

    fn fork_by(self) -> FanOut<A, B> {
        let (first, second) = self;
        FanOut::new(first, second)
    }
}

impl<A, B> ForkBy<SignalSlot> for (A, B) {
    type Forked = (Twice<A>, B);

    fn fork_by(self) -> (Twice<A>, B) {
        let (data, signal) = self;
        (Twice::new(data), signal)
    }
}

impl<A, B> Fork for (A, B)
where
    B: SlotKind,
    (A, B): ForkBy<<B as SlotKind>::Kind>,
{
    type Forked = <(A, B) as ForkBy<<B as SlotKind>::Kind>>::Forked;

    fn fork(self) -> Self::Forked {
        <(A, B) as ForkBy<<B as SlotKind>::Kind>>::fork_by(self)
    }
}

macro_rules! fork_for_tuple {
    ($($slot:ident $var:ident),+) => {
        impl<A, B, $($slot),+> ForkBy<DataSlot> for (A, B, $($slot,)+) {
            type Forked = (FanOut<A, B>, $($slot,)+);

            fn fork_by(self) -> Self::Forked {
                let (first, second, $($var,)+) = self;
                (FanOut::new(first, second), $($var,)+)
            }
        }

        impl<A, B, $($slot),+> ForkBy<SignalSlot> for (A, B, $($slot,)+) {
            type Forked = (Twice<A>, B, $($slot,)+);

            fn fork_by(self) -> Self::Forked {
                let (data, signal, $($var,)+) = self;
                (Twice::new(data), signal, $($var,)+)
            }
        }

        impl<A, B, $($slot),+> Fork for (A, B, $($slot,)+)
        where
            B: SlotKind,
            (A, B, $($slot,)+): ForkBy<<B as SlotKind>::Kind>,
        {
            type Forked = <(A, B, $($slot,)+) as ForkBy<<B as SlotKind>::Kind>>::Forked;

            fn fork(self) -> Self::Forked {
                <Self as ForkBy<<B as SlotKind>::Kind>>::fork_by(self)
            }
        }
    };
}

fork_for_tuple!(T1 t1);
fork_for_tuple!(T1 t1, T2 t2);
fork_for_tuple!(T1 t1, T2 t2, T3 t3);
fork_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4);
fork_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5);
fork_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6);
