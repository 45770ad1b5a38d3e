use std::collections::HashSet;

use log::trace;

use crate::segmenter::SegmenterId;

/// Registry of segmenters that still need the current buffer contents.
///
/// While any segmenter is registered the window must not be shifted or
/// refilled. Registration is a set, so locking twice needs only one unlock.
///
/// There is no internal synchronization; the registry is meant to be driven
/// by one cooperative scan loop.
#[derive(Debug, Clone, Default)]
pub struct BufferLock {
    holders: HashSet<SegmenterId>,
}

impl BufferLock {
    pub fn new() -> Self {
        Self {
            holders: HashSet::with_capacity(4),
        }
    }

    /// Register `id` as requiring the current buffer. Idempotent.
    pub fn lock(&mut self, id: SegmenterId) {
        if self.holders.insert(id) {
            trace!("buffer locked by {id}");
        }
    }

    /// Drop the registration for `id`.
    ///
    /// Returns `false` when `id` held no lock, which is not an error.
    pub fn unlock(&mut self, id: SegmenterId) -> bool {
        let removed = self.holders.remove(&id);
        if removed {
            trace!("buffer unlocked by {id}");
        }
        removed
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    /// Current holders sorted by name, for diagnostics.
    pub fn holders(&self) -> Vec<SegmenterId> {
        let mut holders: Vec<_> = self.holders.iter().copied().collect();
        holders.sort();
        holders
    }

    /// Forget every holder.
    pub fn clear(&mut self) {
        self.holders.clear();
    }
}
