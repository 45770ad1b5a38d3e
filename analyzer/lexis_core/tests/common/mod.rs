//! Small segmenters used to drive the core in integration tests.

#![allow(dead_code)]

use lexis_core::{Context, Lexeme, LexemeKind, Segmenter, SegmenterId};

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Tracks one run of chars accepted by `accept`.
struct Run {
    start: Option<usize>,
}

impl Run {
    fn step(
        &mut self,
        id: SegmenterId,
        kind: LexemeKind,
        accept: fn(char) -> bool,
        window: &[char],
        context: &mut Context,
    ) {
        let cursor = context.cursor();
        match (self.start, accept(window[cursor])) {
            (None, true) => {
                self.start = Some(cursor);
                context.lock_buffer(id);
            }
            (Some(start), false) => self.finish(id, kind, window, context, start, cursor),
            _ => {}
        }
        if let Some(start) = self.start {
            if context.position().at_window_end() {
                self.finish(id, kind, window, context, start, cursor + 1);
            }
        }
    }

    fn finish(
        &mut self,
        id: SegmenterId,
        kind: LexemeKind,
        window: &[char],
        context: &mut Context,
        start: usize,
        end: usize,
    ) {
        context.add_lexeme(Lexeme::from_window(
            window,
            context.stream_offset(),
            start,
            end - start,
            kind,
        ));
        self.start = None;
        context.unlock_buffer(id);
    }
}

/// Maximal runs of ASCII letters and digits.
pub struct LetterSegmenter {
    run: Run,
}

impl LetterSegmenter {
    pub const ID: SegmenterId = SegmenterId::new("letter");

    pub fn new() -> Self {
        Self {
            run: Run { start: None },
        }
    }
}

impl Segmenter for LetterSegmenter {
    fn id(&self) -> SegmenterId {
        Self::ID
    }

    fn analyze(&mut self, window: &[char], context: &mut Context) {
        self.run
            .step(Self::ID, LexemeKind::Letter, |c| c.is_ascii_alphanumeric(), window, context);
    }

    fn reset(&mut self, context: &mut Context) {
        self.run.start = None;
        context.unlock_buffer(Self::ID);
    }
}

/// Maximal runs of ASCII digits.
pub struct NumeralSegmenter {
    run: Run,
}

impl NumeralSegmenter {
    pub const ID: SegmenterId = SegmenterId::new("numeral");

    pub fn new() -> Self {
        Self {
            run: Run { start: None },
        }
    }
}

impl Segmenter for NumeralSegmenter {
    fn id(&self) -> SegmenterId {
        Self::ID
    }

    fn analyze(&mut self, window: &[char], context: &mut Context) {
        self.run
            .step(Self::ID, LexemeKind::Numeral, |c| c.is_ascii_digit(), window, context);
    }

    fn reset(&mut self, context: &mut Context) {
        self.run.start = None;
        context.unlock_buffer(Self::ID);
    }
}

/// Every dictionary word found at every position, overlapping matches included.
pub struct DictionarySegmenter {
    words: Vec<Vec<char>>,
    /// Window-relative starts of prefixes still matching some word
    candidates: Vec<usize>,
}

impl DictionarySegmenter {
    pub const ID: SegmenterId = SegmenterId::new("dictionary");

    pub fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.chars().collect()).collect(),
            candidates: Vec::new(),
        }
    }
}

impl Segmenter for DictionarySegmenter {
    fn id(&self) -> SegmenterId {
        Self::ID
    }

    fn analyze(&mut self, window: &[char], context: &mut Context) {
        let cursor = context.cursor();
        self.candidates.push(cursor);

        let mut still_open = Vec::with_capacity(self.candidates.len());
        for &start in &self.candidates {
            let prefix = &window[start..=cursor];
            if self.words.iter().any(|w| w.as_slice() == prefix) {
                context.add_lexeme(Lexeme::from_window(
                    window,
                    context.stream_offset(),
                    start,
                    prefix.len(),
                    LexemeKind::Word,
                ));
            }
            if self
                .words
                .iter()
                .any(|w| w.len() > prefix.len() && w.starts_with(prefix))
            {
                still_open.push(start);
            }
        }
        self.candidates = still_open;

        if self.candidates.is_empty() {
            context.unlock_buffer(Self::ID);
        } else {
            context.lock_buffer(Self::ID);
        }
    }

    fn reset(&mut self, context: &mut Context) {
        self.candidates.clear();
        context.unlock_buffer(Self::ID);
    }
}

/// `(begin, length, text)` triples for compact assertions.
pub fn spans(lexemes: &[Lexeme]) -> Vec<(usize, usize, String)> {
    lexemes
        .iter()
        .map(|l| (l.begin, l.length, l.text.clone()))
        .collect()
}
