use std::collections::VecDeque;
use std::io::{self, BufRead};

use log::{debug, warn};

use crate::context::Context;
use crate::error::{SegmentError, SegmentResult};

/// The buffer window segmenters scan, refilled from a line-oriented reader.
///
/// Input is read a line at a time and decoded before it is split into chars,
/// so a multi-byte character never straddles two windows. Chars that do not
/// fit in the window wait in a pending queue for the next fill.
///
/// A read error hit after some text is already loaded is held back until that
/// text has been scanned and shifted out.
#[derive(Debug)]
pub struct CharWindow {
    chars: Vec<char>,
    capacity: usize,
    /// Decoded chars read from the source but not yet loaded into the window
    pending: VecDeque<char>,
    eof: bool,
    /// Read failure reported by the first fill that finds the window empty
    deferred: Option<io::Error>,
}

impl CharWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            capacity,
            pending: VecDeque::new(),
            eof: false,
            deferred: None,
        }
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the reader has hit end of input and every char read has been loaded.
    pub fn is_source_exhausted(&self) -> bool {
        self.eof && self.pending.is_empty()
    }

    /// Discard the analyzed prefix of the window.
    ///
    /// The `last_analyzed` units at the front are dropped, the stream offset
    /// moves forward by the same amount and the unanalyzed tail becomes the
    /// start of the window. Returns the number of units discarded.
    ///
    /// Fails with [`SegmentError::BufferLocked`], leaving everything as it
    /// was, while any segmenter holds the buffer.
    pub fn shift(&mut self, context: &mut Context) -> SegmentResult<usize> {
        ensure_unlocked(context, "shift")?;

        let consumed = context.last_analyzed().min(self.chars.len());
        self.chars.drain(..consumed);
        context.set_stream_offset(context.stream_offset() + consumed);
        context.set_last_analyzed(0);
        context.set_cursor(0);
        context.set_available(self.chars.len());
        if consumed > 0 {
            debug!(
                "shifted window by {consumed}, {} units carried over, stream offset now {}",
                self.chars.len(),
                context.stream_offset()
            );
        }
        Ok(consumed)
    }

    /// Top the window up from `source` and record the new `available`.
    ///
    /// Returns the number of units now loaded; zero means the input is done.
    /// If reading fails while the window already holds text, that text is
    /// returned first and the error comes out of the fill after it is shifted
    /// away.
    pub fn fill<R: BufRead + ?Sized>(
        &mut self,
        source: &mut R,
        context: &mut Context,
    ) -> SegmentResult<usize> {
        ensure_unlocked(context, "refill")?;
        if self.chars.is_empty() {
            if let Some(e) = self.deferred.take() {
                context.set_available(0);
                return Err(e.into());
            }
        }

        while self.chars.len() < self.capacity {
            if let Some(c) = self.pending.pop_front() {
                self.chars.push(c);
                continue;
            }
            if self.eof || self.deferred.is_some() {
                break;
            }
            let mut line = String::new();
            match source.read_line(&mut line) {
                Ok(0) => {
                    debug!("reached end of input");
                    self.eof = true;
                    break;
                }
                Ok(_) => self.pending.extend(line.chars()),
                Err(e) if self.chars.is_empty() => {
                    context.set_available(0);
                    return Err(e.into());
                }
                Err(e) => {
                    warn!(
                        "read failed with {} units loaded, reporting after they are analyzed: {e}",
                        self.chars.len()
                    );
                    self.deferred = Some(e);
                }
            }
        }

        context.set_available(self.chars.len());
        Ok(self.chars.len())
    }

    /// Drop everything, ready for a new input stream.
    pub fn clear(&mut self) {
        self.chars.clear();
        self.pending.clear();
        self.eof = false;
        self.deferred = None;
    }
}

fn ensure_unlocked(context: &Context, action: &str) -> SegmentResult<()> {
    if context.is_buffer_locked() {
        let holders = context.lock_holders();
        warn!("refusing to {action} the buffer window while locked by {holders:?}");
        return Err(SegmentError::BufferLocked { holders });
    }
    Ok(())
}
