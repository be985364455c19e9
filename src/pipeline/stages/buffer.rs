//! BufferForSignal: hold values until a signal asks for them.
//!
//! Finalizing a buffer stage creates one shared queue and two receivers
//! around it:
//! - [`Enqueue`] goes in the primary slot and appends each value;
//! - [`Flush`] is appended as the last slot and drains the queue, in FIFO
//!   order, into the receiver that followed the buffer.
//!
//! Both take the same lock for their whole critical section. A flush keeps
//! the lock while forwarding, so a push racing a flush lands either in that
//! flush or in the next one. Clones of either receiver share the queue, which
//! is how several producer threads feed one buffer.

use crate::config::BufferConfig;
use crate::pipeline::receiver::{Receiver, Trigger};
use crate::pipeline::slots::{Attachment, SignalSlot, SlotKind};
use crate::pipeline::stage::{Contramap, Stage};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Signal-gated buffering stage.
#[derive(Clone)]
pub struct BufferForSignal<U> {
    upstream: U,
    config: BufferConfig,
}

impl<U> BufferForSignal<U> {
    pub fn new(upstream: U, config: BufferConfig) -> Self {
        Self { upstream, config }
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }
}

impl<U: Stage> Stage for BufferForSignal<U> {
    type Upstream = <U as Stage>::Downstream;
    type Downstream = <U as Stage>::Downstream;
}

/// The attachment a buffer hands upstream: push receiver in slot 0, flush
/// receiver appended last.
type Buffered<D, T> =
    <D as Attachment>::WithAuxiliary<Enqueue<T>, Flush<T, <D as Attachment>::Primary>>;

impl<U, D> Contramap<D> for BufferForSignal<U>
where
    U: Stage,
    D: Attachment,
    D::Primary: Receiver<Item = <U as Stage>::Downstream>,
    U: Contramap<Buffered<D, <U as Stage>::Downstream>>,
{
    type Entry = <U as Contramap<Buffered<D, <U as Stage>::Downstream>>>::Entry;

    fn contramap(self, downstream: D) -> Self::Entry {
        let BufferForSignal { upstream, config } = self;
        tracing::debug!(
            capacity_hint = config.capacity_hint,
            high_water_mark = ?config.high_water_mark,
            "Creating buffer for {}",
            std::any::type_name::<<U as Stage>::Downstream>()
        );

        let shared = Arc::new(SharedQueue::new(&config));
        upstream.contramap(downstream.split_primary(|primary| {
            (Enqueue::new(shared.clone()), Flush::new(shared, primary))
        }))
    }
}

struct Backlog<T> {
    items: VecDeque<T>,
    /// Set once the high-water warning has fired; cleared by a flush.
    over_mark: bool,
}

struct SharedQueue<T> {
    backlog: Mutex<Backlog<T>>,
    high_water_mark: Option<usize>,
}

impl<T> SharedQueue<T> {
    fn new(config: &BufferConfig) -> Self {
        Self {
            backlog: Mutex::new(Backlog {
                items: VecDeque::with_capacity(config.capacity_hint),
                over_mark: false,
            }),
            high_water_mark: config.high_water_mark,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Backlog<T>> {
        self.backlog.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Recovering buffer lock poisoned by a panicking receiver");
            self.backlog.clear_poison();
            poisoned.into_inner()
        })
    }
}

/// Receiver built by [`BufferForSignal`] for the data path.
pub struct Enqueue<T> {
    shared: Arc<SharedQueue<T>>,
}

impl<T> Enqueue<T> {
    fn new(shared: Arc<SharedQueue<T>>) -> Self {
        Self { shared }
    }

    /// Number of values waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.shared.lock().items.len()
    }
}

impl<T> Receiver for Enqueue<T> {
    type Item = T;

    fn push(&mut self, item: T) {
        let mut backlog = self.shared.lock();
        backlog.items.push_back(item);

        if let Some(mark) = self.shared.high_water_mark {
            if !backlog.over_mark && backlog.items.len() >= mark {
                backlog.over_mark = true;
                tracing::warn!(
                    pending = backlog.items.len(),
                    high_water_mark = mark,
                    "Buffer backlog reached its high-water mark"
                );
            }
        }
    }
}

impl<T> Clone for Enqueue<T> {
    fn clone(&self) -> Self {
        Self::new(self.shared.clone())
    }
}

impl<T> fmt::Debug for Enqueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enqueue").finish_non_exhaustive()
    }
}

/// Signal receiver built by [`BufferForSignal`]: drains the queue into `D`.
pub struct Flush<T, D> {
    shared: Arc<SharedQueue<T>>,
    downstream: D,
}

impl<T, D> Flush<T, D> {
    fn new(shared: Arc<SharedQueue<T>>, downstream: D) -> Self {
        Self { shared, downstream }
    }

    /// Number of values the next flush would deliver, as of now.
    pub fn pending(&self) -> usize {
        self.shared.lock().items.len()
    }
}

impl<T, D> Trigger for Flush<T, D>
where
    D: Receiver<Item = T>,
{
    fn signal(&mut self) {
        let mut backlog = self.shared.lock();
        let mut drained = 0usize;

        // Pop one at a time: a panicking receiver leaves the rest queued.
        while let Some(item) = backlog.items.pop_front() {
            self.downstream.push(item);
            drained += 1;
        }
        backlog.over_mark = false;

        if drained > 0 {
            tracing::trace!(drained, "Flushed buffered values");
        }
    }
}

impl<T, D> SlotKind for Flush<T, D> {
    type Kind = SignalSlot;
}

impl<T, D: Clone> Clone for Flush<T, D> {
    fn clone(&self) -> Self {
        Self::new(self.shared.clone(), self.downstream.clone())
    }
}

impl<T, D> fmt::Debug for Flush<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flush").finish_non_exhaustive()
    }
}
