//! The contract between the scan driver and the matching algorithms.

use std::fmt;

use crate::context::Context;

/// Stable identity of a segmenter, used for buffer lock bookkeeping.
///
/// Two segmenters active in the same [`Segmentation`](crate::Segmentation)
/// must not share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmenterId(&'static str);

impl SegmenterId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SegmenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A matching algorithm driven one cursor position at a time.
///
/// At every position the driver calls [`analyze`](Segmenter::analyze) on each
/// registered segmenter in turn. A segmenter that starts a match which may
/// run past the cursor locks the buffer through the context, and unlocks it
/// once the match is completed or abandoned. Completed matches are submitted
/// with [`Context::add_lexeme`].
pub trait Segmenter {
    /// Unique identity used when locking the buffer.
    fn id(&self) -> SegmenterId;

    /// Inspect `window[context.cursor()]`.
    ///
    /// `window` holds `context.available()` units, and `window[0]` sits at
    /// `context.stream_offset()` in the stream.
    fn analyze(&mut self, window: &[char], context: &mut Context);

    /// Abandon any partial match.
    ///
    /// Called at the end of every window and when the driver restarts on a new
    /// stream. Implementations must leave the buffer unlocked; the default
    /// only releases the lock.
    fn reset(&mut self, context: &mut Context) {
        context.unlock_buffer(self.id());
    }
}
