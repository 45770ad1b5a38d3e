//! Per-stream state shared between the driver and its segmenters.

use crate::buffer_lock::BufferLock;
use crate::buffer_position::BufferPosition;
use crate::config::SegmentationConfig;
use crate::lexeme::Lexeme;
use crate::lexeme_set::LexemeSet;
use crate::segmenter::SegmenterId;

/// Everything a segmenter may read or touch while scanning a window: the
/// buffer position, the buffer lock registry and the merged lexeme results.
///
/// One context lives for one input stream. [`reset`](Context::reset) prepares
/// it for the next.
#[derive(Debug, Default)]
pub struct Context {
    position: BufferPosition,
    locks: BufferLock,
    lexemes: LexemeSet<Lexeme>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            position: BufferPosition::new(),
            locks: BufferLock::new(),
            lexemes: LexemeSet::new(),
        }
    }

    pub fn position(&self) -> &BufferPosition {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut BufferPosition {
        &mut self.position
    }

    pub fn stream_offset(&self) -> usize {
        self.position.stream_offset()
    }

    pub fn set_stream_offset(&mut self, stream_offset: usize) {
        self.position.set_stream_offset(stream_offset);
    }

    pub fn available(&self) -> usize {
        self.position.available()
    }

    pub fn set_available(&mut self, available: usize) {
        self.position.set_available(available);
    }

    pub fn last_analyzed(&self) -> usize {
        self.position.last_analyzed()
    }

    pub fn set_last_analyzed(&mut self, last_analyzed: usize) {
        self.position.set_last_analyzed(last_analyzed);
    }

    pub fn cursor(&self) -> usize {
        self.position.cursor()
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.position.set_cursor(cursor);
    }

    /// Mark the buffer as needed by `id`.
    pub fn lock_buffer(&mut self, id: SegmenterId) {
        self.locks.lock(id);
    }

    /// Release `id`'s hold on the buffer; `false` if it held none.
    pub fn unlock_buffer(&mut self, id: SegmenterId) -> bool {
        self.locks.unlock(id)
    }

    /// The buffer is locked as long as any segmenter holds it.
    pub fn is_buffer_locked(&self) -> bool {
        self.locks.is_locked()
    }

    pub fn lock_holders(&self) -> Vec<SegmenterId> {
        self.locks.holders()
    }

    /// Submit a lexeme; duplicates of a queued lexeme are absorbed and
    /// reported as `false`.
    pub fn add_lexeme(&mut self, lexeme: Lexeme) -> bool {
        self.lexemes.insert(lexeme)
    }

    /// Take the earliest queued lexeme.
    pub fn first_lexeme(&mut self) -> Option<Lexeme> {
        self.lexemes.take_first()
    }

    /// Take the latest queued lexeme.
    pub fn last_lexeme(&mut self) -> Option<Lexeme> {
        self.lexemes.take_last()
    }

    pub fn result_size(&self) -> usize {
        self.lexemes.len()
    }

    pub fn lexemes(&self) -> &LexemeSet<Lexeme> {
        &self.lexemes
    }

    /// Whether the driver should stop scanning this window and refill.
    ///
    /// True only for a full window whose cursor has entered the last
    /// `exhaust_critical` units without reaching the final one, and only while
    /// no segmenter holds the buffer.
    pub fn needs_refill(&self, config: &SegmentationConfig) -> bool {
        let available = self.position.available();
        let cursor = self.position.cursor();
        available == config.buffer_size
            && cursor + 1 < available
            && cursor > available.saturating_sub(config.exhaust_critical)
            && !self.locks.is_locked()
    }

    /// Forget the previous stream.
    pub fn reset(&mut self) {
        self.position = BufferPosition::new();
        self.locks.clear();
        self.lexemes.clear();
    }
}
