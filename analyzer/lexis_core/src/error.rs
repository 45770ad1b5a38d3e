use std::io;

use thiserror::Error;

use crate::segmenter::SegmenterId;

/// Errors surfaced to the caller of the segmentation driver
#[derive(Debug, Error)]
pub enum SegmentError {
    /// A shift or refill was requested while segmenters still need the window
    #[error("buffer is locked by {}", join_ids(.holders))]
    BufferLocked {
        /// Segmenters holding the lock at the time of the request
        holders: Vec<SegmenterId>,
    },

    /// The input reader failed
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// The configuration cannot drive a scan
    #[error("invalid segmentation config: {0}")]
    InvalidConfig(String),
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;

fn join_ids(ids: &[SegmenterId]) -> String {
    ids.iter()
        .map(SegmenterId::name)
        .collect::<Vec<_>>()
        .join(", ")
}
