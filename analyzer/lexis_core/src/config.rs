use crate::error::{SegmentError, SegmentResult};

/// Configuration for [`Segmentation`](crate::Segmentation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentationConfig {
    /// Capacity of the buffer window, in chars
    pub buffer_size: usize,
    /// How close to the end of a full window the cursor may get before the
    /// driver stops early and refills, provided no segmenter holds the lock
    pub exhaust_critical: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            buffer_size: 3072,
            exhaust_critical: 48,
        }
    }
}

impl SegmentationConfig {
    /// Check that a window can always make progress.
    pub fn validate(&self) -> SegmentResult<()> {
        if self.buffer_size == 0 {
            return Err(SegmentError::InvalidConfig(
                "buffer_size must be greater than zero".to_string(),
            ));
        }
        if self.exhaust_critical >= self.buffer_size {
            return Err(SegmentError::InvalidConfig(format!(
                "exhaust_critical ({}) must be smaller than buffer_size ({})",
                self.exhaust_critical, self.buffer_size
            )));
        }
        Ok(())
    }
}
