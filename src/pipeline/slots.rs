//! Slot groups: the downstream attachment points a stage is handed.
//!
//! A stage is followed either by exactly one [`Receiver`] or by a receiver
//! group: a tuple whose slot 0 is the primary data path and whose later
//! slots carry auxiliary receivers such as a buffer's flush signal.
//! [`Attachment`] is the closed variant over both shapes, so stages that only
//! touch the primary slot never special-case groups.
//!
//! Groups are limited to eight slots.

use crate::pipeline::receiver::{Receiver, Signal};

/// Either a single receiver or a receiver group.
pub trait Attachment: Sized {
    /// The receiver in slot 0.
    type Primary;

    /// This attachment with slot 0 replaced by `P`, remaining slots untouched.
    type WithPrimary<P>;

    /// This attachment with slot 0 replaced by `P` and `S` appended as the
    /// new last slot.
    type WithAuxiliary<P, S>;

    /// Replace slot 0 with a receiver built from it.
    fn map_primary<P, F>(self, f: F) -> Self::WithPrimary<P>
    where
        F: FnOnce(Self::Primary) -> P;

    /// Replace slot 0 with the first half of `f(slot 0)` and append the second
    /// half after every existing slot.
    fn split_primary<P, S, F>(self, f: F) -> Self::WithAuxiliary<P, S>
    where
        F: FnOnce(Self::Primary) -> (P, S);
}

impl<R: Receiver> Attachment for R {
    type Primary = R;
    type WithPrimary<P> = P;
    type WithAuxiliary<P, S> = (P, S);

    #[inline]
    fn map_primary<P, F>(self, f: F) -> P
    where
        F: FnOnce(Self::Primary) -> P,
    {
        f(self)
    }

    #[inline]
    fn split_primary<P, S, F>(self, f: F) -> (P, S)
    where
        F: FnOnce(Self::Primary) -> (P, S),
    {
        f(self)
    }
}

macro_rules! attachment_for_tuple {
    ($($slot:ident $var:ident),+) => {
        impl<Head, $($slot),+> Attachment for (Head, $($slot,)+) {
            type Primary = Head;
            type WithPrimary<P> = (P, $($slot,)+);
            type WithAuxiliary<P, S> = (P, $($slot,)+ S);

            #[inline]
            fn map_primary<P, F>(self, f: F) -> Self::WithPrimary<P>
            where
                F: FnOnce(Self::Primary) -> P,
            {
                let (head, $($var,)+) = self;
                (f(head), $($var,)+)
            }

            #[inline]
            fn split_primary<P, S, F>(self, f: F) -> Self::WithAuxiliary<P, S>
            where
                F: FnOnce(Self::Primary) -> (P, S),
            {
                let (head, $($var,)+) = self;
                let (primary, auxiliary) = f(head);
                (primary, $($var,)+ auxiliary)
            }
        }
    };
}

attachment_for_tuple!(T1 t1);
attachment_for_tuple!(T1 t1, T2 t2);
attachment_for_tuple!(T1 t1, T2 t2, T3 t3);
attachment_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4);
attachment_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5);
attachment_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6);
attachment_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6, T7 t7);

/// An attachment whose primary can be duplicated into two leading slots.
pub trait SlotPair: Sized {
    /// This attachment with slot 0 replaced by two copies of `S`, every later
    /// slot shifted out by one.
    type WithPair<S>;

    fn set_pair<S: Clone>(self, slot: S) -> Self::WithPair<S>;
}

impl<R: Receiver> SlotPair for R {
    type WithPair<S> = (S, S);

    fn set_pair<S: Clone>(self, slot: S) -> (S, S) {
        (slot.clone(), slot)
    }
}

macro_rules! slot_pair_for_tuple {
    ($($slot:ident $var:ident),+) => {
        impl<Head, $($slot),+> SlotPair for (Head, $($slot,)+) {
            type WithPair<S> = (S, S, $($slot,)+);

            fn set_pair<S: Clone>(self, slot: S) -> Self::WithPair<S> {
                let (_, $($var,)+) = self;
                (slot.clone(), slot, $($var,)+)
            }
        }
    };
}

slot_pair_for_tuple!(T1 t1);
slot_pair_for_tuple!(T1 t1, T2 t2);
slot_pair_for_tuple!(T1 t1, T2 t2, T3 t3);
slot_pair_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4);
slot_pair_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5);
slot_pair_for_tuple!(T1 t1, T2 t2, T3 t3, T4 t4, T5 t5, T6 t6);

/// Marks a slot that carries values.
pub enum DataSlot {}

/// Marks a slot that carries a payload-free signal.
pub enum SignalSlot {}

/// Tells data slots apart from signal slots inside a receiver group.
///
/// Every [`Receiver`] is a data slot. [`Signal`] and the buffer's flush
/// receiver are signal slots.
pub trait SlotKind {
    /// [`DataSlot`] or [`SignalSlot`].
    type Kind;
}

impl<R: Receiver> SlotKind for R {
    type Kind = DataSlot;
}

impl<F> SlotKind for Signal<F> {
    type Kind = SignalSlot;
}

/// Replace slot 0 of `group` with `slot`, leaving the other slots untouched.
pub fn set_first<G, S>(group: G, slot: S) -> G::WithPrimary<S>
where
    G: Attachment,
{
    group.map_primary(|_| slot)
}

/// Replace slot 0 of `group` with two copies of `slot`, shifting the other
/// slots out by one.
pub fn set_first_pair<G, S>(group: G, slot: S) -> G::WithPair<S>
where
    G: SlotPair,
    S: Clone,
{
    group.set_pair(slot)
}
