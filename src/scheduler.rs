//! Timer-driven display loop: advance, load, render-or-skip, reschedule.
//!
//! The scheduler never sleeps. The host event loop owns the clock: it calls
//! [`DisplayScheduler::start`] once and [`DisplayScheduler::on_timer`]
//! whenever it wakes, and waits until the returned instant in between.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::loader::{DecodedImage, ImageLoader};
use crate::scan::ImageFile;
use crate::sequence::PlaybackQueue;

/// Where decoded images end up. Implemented by the window surface and by
/// test doubles.
pub trait DisplaySurface {
    /// Handle to an uploaded image; dropping it releases the resource.
    type Frame;

    /// Upload `image` so it can be presented.
    ///
    /// # Errors
    /// Backend failures (out of memory, lost device, ...).
    fn upload(&mut self, image: &DecodedImage) -> anyhow::Result<Self::Frame>;

    /// Show `frame`, or a blank screen for `None`.
    ///
    /// # Errors
    /// Backend failures while drawing.
    fn present(&mut self, frame: Option<&Self::Frame>) -> anyhow::Result<()>;

    /// Drop out of fullscreen / exclusive mode.
    fn leave_fullscreen(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Showing,
    Terminated,
}

struct Shown<F> {
    file: ImageFile,
    frame: F,
    at: Instant,
}

/// Single owner of the playback queue and the frame currently on screen.
pub struct DisplayScheduler<L, S: DisplaySurface> {
    queue: PlaybackQueue,
    loader: L,
    surface: S,
    delay: Duration,
    cancel: CancellationToken,
    state: SchedulerState,
    current: Option<Shown<S::Frame>>,
    due: Option<Instant>,
    renders: u64,
    skipped: u64,
}

impl<L: ImageLoader, S: DisplaySurface> DisplayScheduler<L, S> {
    pub fn new(
        queue: PlaybackQueue,
        loader: L,
        surface: S,
        delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            queue,
            loader,
            surface,
            delay,
            cancel,
            state: SchedulerState::Idle,
            current: None,
            due: None,
            renders: 0,
            skipped: 0,
        }
    }

    /// Enter `Showing` and run the first tick immediately.
    ///
    /// Returns when the next tick is due, or `None` once terminated.
    ///
    /// # Errors
    /// [`Error::NoLoadableImages`] if a whole lap fails to load,
    /// [`Error::Render`] if the surface fails. The scheduler is terminated
    /// in both cases.
    pub fn start(&mut self, now: Instant) -> Result<Option<Instant>, Error> {
        if self.state != SchedulerState::Idle {
            return Ok(self.due);
        }
        if self.cancel.is_cancelled() {
            self.terminate();
            return Ok(None);
        }
        info!(
            items = self.queue.len(),
            delay_ms = self.delay.as_millis(),
            "slideshow starting"
        );
        self.state = SchedulerState::Showing;
        self.tick(now)
    }

    /// Called by the host whenever it wakes up.
    ///
    /// Stale wake-ups after termination or cancellation are no-ops; early
    /// wake-ups return the pending due instant unchanged.
    ///
    /// # Errors
    /// Same as [`start`](Self::start).
    pub fn on_timer(&mut self, now: Instant) -> Result<Option<Instant>, Error> {
        if self.state != SchedulerState::Showing {
            return Ok(None);
        }
        if self.cancel.is_cancelled() {
            self.terminate();
            return Ok(None);
        }
        match self.due {
            Some(due) if now < due => Ok(Some(due)),
            _ => self.tick(now),
        }
    }

    fn tick(&mut self, now: Instant) -> Result<Option<Instant>, Error> {
        // At most one lap of attempts per tick.
        let attempts = self.queue.len();
        for attempt in 1..=attempts {
            if self.cancel.is_cancelled() {
                self.terminate();
                return Ok(None);
            }
            let file = self.queue.advance().clone();
            match self.loader.load(&file) {
                Ok(image) => {
                    let shown_at = match self.render(file, &image, now) {
                        Ok(at) => at,
                        Err(err) => {
                            self.terminate();
                            return Err(err);
                        }
                    };
                    let due = shown_at + self.delay;
                    self.due = Some(due);
                    return Ok(Some(due));
                }
                Err(err) => {
                    self.skipped += 1;
                    warn!(path = %file, attempt, error = %err, "failed to load image; skipping");
                }
            }
        }

        self.terminate();
        Err(Error::NoLoadableImages { attempts })
    }

    /// Upload and present `image`; returns the instant it reached the screen.
    fn render(&mut self, file: ImageFile, image: &DecodedImage, now: Instant) -> Result<Instant, Error> {
        let frame = self.surface.upload(image).map_err(Error::Render)?;
        self.surface.present(Some(&frame)).map_err(Error::Render)?;
        // Decode, upload and present all take time; the delay counts from here.
        let at = now.max(Instant::now());
        self.renders += 1;
        info!(
            path = %file,
            width = image.width,
            height = image.height,
            step = self.queue.steps(),
            lap = self.queue.lap(),
            "showing"
        );
        // Replacing drops the previous frame.
        self.current = Some(Shown { file, frame, at });
        Ok(at)
    }

    /// Re-present the current frame, e.g. after the window was exposed or resized.
    ///
    /// # Errors
    /// [`Error::Render`] if the surface fails to draw.
    pub fn redraw(&mut self) -> Result<(), Error> {
        if self.state != SchedulerState::Showing {
            return Ok(());
        }
        let frame = self.current.as_ref().map(|shown| &shown.frame);
        self.surface.present(frame).map_err(Error::Render)
    }

    /// Move to `Terminated` and release the displayed frame. Idempotent.
    pub fn terminate(&mut self) {
        if self.state == SchedulerState::Terminated {
            return;
        }
        self.state = SchedulerState::Terminated;
        self.due = None;
        if let Some(shown) = self.current.take() {
            debug!(path = %shown.file, "releasing displayed frame");
        }
        info!(
            renders = self.renders,
            skipped = self.skipped,
            "slideshow terminated"
        );
    }

    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// When the next tick should run, if one is scheduled.
    #[must_use]
    pub const fn due(&self) -> Option<Instant> {
        self.due
    }

    /// File currently on screen.
    #[must_use]
    pub fn current_file(&self) -> Option<&ImageFile> {
        self.current.as_ref().map(|shown| &shown.file)
    }

    /// When the current file was shown.
    #[must_use]
    pub fn shown_at(&self) -> Option<Instant> {
        self.current.as_ref().map(|shown| shown.at)
    }

    /// Successful renders so far.
    #[must_use]
    pub const fn renders(&self) -> u64 {
        self.renders
    }

    /// Load failures skipped so far.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    #[must_use]
    pub const fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
