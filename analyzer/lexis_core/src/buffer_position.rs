/// Where the current buffer window sits in the input stream.
///
/// This is a thin state holder: none of the setters validate against the other
/// fields. The driver that owns the window keeps `cursor <= available` and only
/// ever moves `stream_offset` forward, and only while no segmenter holds the
/// buffer lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferPosition {
    /// Units consumed by all earlier windows, i.e. the absolute position of `window[0]`
    stream_offset: usize,
    /// Valid units currently loaded
    available: usize,
    /// Units of the current window that have been fully scanned
    last_analyzed: usize,
    /// Current scan position within the window
    cursor: usize,
}

impl BufferPosition {
    /// Position at the very start of a stream.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream_offset(&self) -> usize {
        self.stream_offset
    }

    pub fn set_stream_offset(&mut self, stream_offset: usize) {
        self.stream_offset = stream_offset;
    }

    pub fn available(&self) -> usize {
        self.available
    }

    pub fn set_available(&mut self, available: usize) {
        self.available = available;
    }

    pub fn last_analyzed(&self) -> usize {
        self.last_analyzed
    }

    pub fn set_last_analyzed(&mut self, last_analyzed: usize) {
        self.last_analyzed = last_analyzed;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Absolute stream position of the unit under the cursor.
    pub fn absolute_cursor(&self) -> usize {
        self.stream_offset + self.cursor
    }

    /// Whether the cursor rests on the last loaded unit.
    pub fn at_window_end(&self) -> bool {
        self.available > 0 && self.cursor + 1 == self.available
    }
}
