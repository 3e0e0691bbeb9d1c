//! Deferred mutation queue
//!
//! Spawner-style systems must never mutate the entity store while
//! scanning a query result. The rule is collect-then-mutate: scan and
//! record, then drain the queue and apply. This type is that queue,
//! shared by every spawner so the pattern is not re-derived ad hoc.

/// Queue of mutations collected during a scan pass and applied after it
#[derive(Debug, Default)]
pub struct DeferredQueue<T> {
    pending: Vec<T>,
}

impl<T: PartialEq> DeferredQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Record an item for the apply pass.
    ///
    /// Duplicates are ignored, so an entity queued twice in one frame
    /// (e.g. expiry plus forced retirement) is applied exactly once.
    pub fn defer(&mut self, item: T) {
        if !self.pending.contains(&item) {
            self.pending.push(item);
        }
    }

    /// Apply and clear every queued item, in queue order
    pub fn drain(&mut self, mut apply: impl FnMut(T)) {
        for item in self.pending.drain(..) {
            apply(item);
        }
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all queued items without applying them
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
