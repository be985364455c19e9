//! Identity: the root of every pipeline.

use crate::pipeline::receiver::Receiver;
use crate::pipeline::slots::Attachment;
use crate::pipeline::stage::{Contramap, Stage};
use std::fmt;
use std::marker::PhantomData;

/// A value of type `T` enters the pipeline here, unmodified.
pub struct Identity<T> {
    _item: PhantomData<fn(T) -> T>,
}

impl<T> Identity<T> {
    pub const fn new() -> Self {
        Self { _item: PhantomData }
    }
}

/// Start a pipeline of `T` values.
pub const fn identity<T>() -> Identity<T> {
    Identity::new()
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Identity<T> {}

impl<T> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity<{}>", std::any::type_name::<T>())
    }
}

impl<T> Stage for Identity<T> {
    type Upstream = T;
    type Downstream = T;
}

// The attachment is already an identity-forwarding entry point.
impl<T, D> Contramap<D> for Identity<T>
where
    D: Attachment,
    D::Primary: Receiver<Item = T>,
{
    type Entry = D;

    #[inline]
    fn contramap(self, downstream: D) -> D {
        downstream
    }
}
