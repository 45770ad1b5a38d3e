//! The scan loop that drives segmenters over a streamed input.
//!
//! `Segmentation` reads its input into a [`CharWindow`] a window at a time.
//! For every position in the window it sets the cursor and calls each
//! registered [`Segmenter`]; the lexemes they submit are merged into the
//! context's [`LexemeSet`](crate::LexemeSet) and handed out in stream order.
//!
//! A window is scanned to its end unless the cursor enters the final
//! `exhaust_critical` units of a full window while nobody holds the buffer
//! lock; then the scan stops early and the unscanned tail is carried into the
//! next window, so matches near the boundary see their following context.
//!
//! # Examples
//!
//! ```no_run
//! use lexis_core::{Context, Segmentation, SegmentationConfig, Segmenter, SegmenterId};
//!
//! struct Nothing;
//!
//! impl Segmenter for Nothing {
//!     fn id(&self) -> SegmenterId {
//!         SegmenterId::new("nothing")
//!     }
//!     fn analyze(&mut self, _window: &[char], _context: &mut Context) {}
//! }
//!
//! # fn main() -> Result<(), lexis_core::SegmentError> {
//! let segmentation = Segmentation::from_reader(
//!     "some text".as_bytes(),
//!     SegmentationConfig::default(),
//!     vec![Box::new(Nothing)],
//! )?;
//! for lexeme in segmentation {
//!     println!("{}", lexeme?);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};

use crate::config::SegmentationConfig;
use crate::context::Context;
use crate::error::{SegmentError, SegmentResult};
use crate::lexeme::Lexeme;
use crate::segmenter::Segmenter;
use crate::window::CharWindow;

/// Drives a set of segmenters over one input stream at a time.
pub struct Segmentation {
    /// The input being segmented
    source: Box<dyn BufRead>,
    config: SegmentationConfig,
    context: Context,
    window: CharWindow,
    /// Invoked in registration order at every cursor position
    segmenters: Vec<Box<dyn Segmenter>>,
    /// Set once the input is done or a read failed
    exhausted: bool,
}

impl Segmentation {
    /// Create a driver over any `BufRead` source.
    ///
    /// Fails if the configuration cannot make progress or two segmenters share
    /// an id.
    pub fn from_reader<R: BufRead + 'static>(
        reader: R,
        config: SegmentationConfig,
        segmenters: Vec<Box<dyn Segmenter>>,
    ) -> SegmentResult<Self> {
        config.validate()?;

        let mut seen = HashSet::with_capacity(segmenters.len());
        for segmenter in &segmenters {
            if !seen.insert(segmenter.id()) {
                return Err(SegmentError::InvalidConfig(format!(
                    "segmenter id `{}` is registered twice",
                    segmenter.id()
                )));
            }
        }

        Ok(Self {
            source: Box::new(reader),
            window: CharWindow::new(config.buffer_size),
            config,
            context: Context::new(),
            segmenters,
            exhausted: false,
        })
    }

    /// Open `path` and segment it with the default configuration.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        segmenters: Vec<Box<dyn Segmenter>>,
    ) -> SegmentResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(
            BufReader::new(file),
            SegmentationConfig::default(),
            segmenters,
        )
    }

    /// Restart on a new input, keeping the configuration and segmenters.
    pub fn reset<R: BufRead + 'static>(&mut self, reader: R) {
        for segmenter in self.segmenters.iter_mut() {
            segmenter.reset(&mut self.context);
        }
        self.context.reset();
        self.window.clear();
        self.source = Box::new(reader);
        self.exhausted = false;
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Return the next lexeme in stream order, or `None` once the input is
    /// exhausted and every queued lexeme has been handed out.
    pub fn next_lexeme(&mut self) -> SegmentResult<Option<Lexeme>> {
        loop {
            if let Some(lexeme) = self.context.first_lexeme() {
                trace!("emitting {lexeme}");
                return Ok(Some(lexeme));
            }
            if self.exhausted {
                return Ok(None);
            }

            self.window.shift(&mut self.context)?;
            let available = self.window.fill(self.source.as_mut(), &mut self.context)?;
            if available == 0 {
                self.exhausted = true;
                continue;
            }

            self.analyze_window();
        }
    }

    /// Scan the loaded window once, leaving the results in the context.
    fn analyze_window(&mut self) {
        let available = self.context.available();
        debug!(
            "analyzing window of {available} units at stream offset {}",
            self.context.stream_offset()
        );

        let mut analyzed = 0;
        for cursor in 0..available {
            self.context.set_cursor(cursor);
            for segmenter in self.segmenters.iter_mut() {
                segmenter.analyze(self.window.as_slice(), &mut self.context);
                assert!(
                    self.context.cursor() == cursor && self.context.available() == available,
                    "segmenter `{}` moved the window position at stream offset {}",
                    segmenter.id(),
                    self.context.stream_offset() + cursor
                );
            }
            trace!("analyzed unit {}", self.context.position().absolute_cursor());
            analyzed += 1;
            // Nobody is mid-match here, so the next window can start fresh after this unit.
            if self.context.needs_refill(&self.config) {
                break;
            }
        }

        for segmenter in self.segmenters.iter_mut() {
            segmenter.reset(&mut self.context);
        }
        assert!(
            !self.context.is_buffer_locked(),
            "segmenters {:?} still hold the buffer after reset",
            self.context.lock_holders()
        );

        self.context.set_last_analyzed(analyzed);
        debug!(
            "analyzed {analyzed} of {available} units, {} lexemes queued",
            self.context.result_size()
        );
    }

    /// Segment the whole input and collect every lexeme.
    pub fn tokenize(self) -> SegmentResult<Vec<Lexeme>> {
        self.collect()
    }
}

impl Iterator for Segmentation {
    type Item = SegmentResult<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_lexeme() {
            Ok(Some(lexeme)) => Some(Ok(lexeme)),
            Ok(None) => None,
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            let queued = self.context.result_size();
            (queued, Some(queued))
        } else {
            (self.context.result_size(), None)
        }
    }
}
