use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The class of text a segmenter recognized.
///
/// The kind is carried along for downstream stages; it takes no part in
/// ordering or deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexemeKind {
    /// A dictionary word
    Word,
    /// A surname prefix recognized by a name segmenter
    Surname,
    /// A suffix recognized by a name or place segmenter
    Suffix,
    /// Run of letters (Latin script, mixed alphanumerics)
    Letter,
    /// Run of digits or numeral characters
    Numeral,
    /// Numeral followed by a counting word
    Quantifier,
    /// Text no segmenter could classify
    #[default]
    Unknown,
}

impl fmt::Display for LexemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexemeKind::Word => "word",
            LexemeKind::Surname => "surname",
            LexemeKind::Suffix => "suffix",
            LexemeKind::Letter => "letter",
            LexemeKind::Numeral => "numeral",
            LexemeKind::Quantifier => "quantifier",
            LexemeKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A candidate token found in the input stream.
///
/// Lexemes are ordered by their start offset, and among lexemes starting at the
/// same offset the longer one sorts first. Two lexemes with the same start and
/// length compare equal regardless of their kind or text, which is what lets a
/// [`LexemeSet`](crate::LexemeSet) collapse duplicates submitted by different
/// segmenters.
#[derive(Debug, Clone, Default)]
pub struct Lexeme {
    /// Absolute offset of the first unit in the overall input stream
    pub begin: usize,
    /// Number of units spanned
    pub length: usize,
    /// What the producing segmenter recognized
    pub kind: LexemeKind,
    /// Surface text, filled in by the producing segmenter when it has the window at hand
    pub text: String,
}

impl Lexeme {
    /// Create a lexeme without surface text.
    pub fn new(begin: usize, length: usize, kind: LexemeKind) -> Self {
        Self {
            begin,
            length,
            kind,
            text: String::new(),
        }
    }

    /// Attach surface text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Build a lexeme from a slice of the current buffer window.
    ///
    /// `window_start` is the absolute stream position of `window[0]`, `start`
    /// and `length` are relative to the window.
    pub fn from_window(
        window: &[char],
        window_start: usize,
        start: usize,
        length: usize,
        kind: LexemeKind,
    ) -> Self {
        let end = (start + length).min(window.len());
        let text: String = window[start.min(end)..end].iter().collect();
        Self::new(window_start + start, length, kind).with_text(text)
    }

    /// Absolute offset one past the last unit.
    pub fn end(&self) -> usize {
        self.begin + self.length
    }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.begin == other.begin && self.length == other.length
    }
}

impl Eq for Lexeme {}

impl Hash for Lexeme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.begin.hash(state);
        self.length.hash(state);
    }
}

impl Ord for Lexeme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.length.cmp(&self.length))
    }
}

impl PartialOrd for Lexeme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} : {} : {}",
            self.begin,
            self.end(),
            self.text,
            self.kind
        )
    }
}
