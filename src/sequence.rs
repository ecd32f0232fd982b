//! Fixed-order playback queue used to implement an infinite slideshow.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::Error;
use crate::scan::ImageFile;

/// A ring over image files with a cursor that advances forever.
///
/// The order is settled once in [`PlaybackQueue::build`]; every lap repeats
/// it exactly. `steps` counts items handed out so far and never wraps in
/// practice, which is what the lap number is derived from.
#[derive(Debug, Clone)]
pub struct PlaybackQueue {
    items: Vec<ImageFile>,
    cursor: usize,
    steps: u64,
}

impl PlaybackQueue {
    /// Build a queue, shuffling once with the thread RNG when `shuffle` is set.
    ///
    /// # Errors
    /// Returns [`Error::EmptyCollection`] if `files` is empty.
    pub fn build(files: Vec<ImageFile>, shuffle: bool) -> Result<Self, Error> {
        Self::build_with_rng(files, shuffle, &mut rand::rng())
    }

    /// Build a queue using the provided RNG for the one-time shuffle.
    ///
    /// # Errors
    /// Returns [`Error::EmptyCollection`] if `files` is empty.
    pub fn build_with_rng<R: Rng + ?Sized>(
        mut files: Vec<ImageFile>,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if files.is_empty() {
            return Err(Error::EmptyCollection);
        }
        if shuffle {
            files.shuffle(rng);
        }
        Ok(Self {
            items: files,
            cursor: 0,
            steps: 0,
        })
    }

    /// Number of items in one lap.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the item the next [`advance`](Self::advance) will return.
    #[must_use]
    pub fn peek(&self) -> &ImageFile {
        &self.items[self.cursor]
    }

    /// Return the current item and move the cursor, wrapping at the end.
    pub fn advance(&mut self) -> &ImageFile {
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.items.len();
        self.steps += 1;
        &self.items[idx]
    }

    /// Index the next `advance` will read from; always in `[0, len)`.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Items handed out since the queue was built or reset.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Zero-based lap of the most recently returned item.
    #[must_use]
    pub fn lap(&self) -> u64 {
        self.steps.saturating_sub(1) / self.items.len() as u64
    }

    /// Rewind to the start of the lap. The order is kept; rebuild to re-shuffle.
    pub const fn reset(&mut self) {
        self.cursor = 0;
        self.steps = 0;
    }

    /// Borrow the fixed lap order (read-only).
    #[must_use]
    pub fn as_slice(&self) -> &[ImageFile] {
        &self.items
    }
}
