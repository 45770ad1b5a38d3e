//! Lexis segmentation core
//!
//! This crate holds the coordination layer of a multi-segmenter text analyzer:
//! bookkeeping for a streamed buffer window, the lock that keeps the window in
//! place while a segmenter is mid-match, and the ordered set that merges the
//! lexemes every segmenter submits into one duplicate-free, stream-ordered
//! sequence.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer_lock;
pub mod buffer_position;
pub mod config;
pub mod context;
pub mod error;
pub mod lexeme;
pub mod lexeme_set;
pub mod segmentation;
pub mod segmenter;
pub mod window;

// Re-export the main types for convenience
pub use buffer_lock::BufferLock;
pub use buffer_position::BufferPosition;
pub use config::SegmentationConfig;
pub use context::Context;
pub use error::{SegmentError, SegmentResult};
pub use lexeme::{Lexeme, LexemeKind};
pub use lexeme_set::LexemeSet;
pub use segmentation::Segmentation;
pub use segmenter::{Segmenter, SegmenterId};
pub use window::CharWindow;
