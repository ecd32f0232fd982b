//! Turns the first operator stop signal into scheduler termination.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::StopSignal;
use crate::loader::ImageLoader;
use crate::scheduler::{DisplayScheduler, DisplaySurface};

/// Observes stop signals and terminates the scheduler exactly once.
///
/// The token is shared with the scheduler and with any watcher threads, so
/// a timer that fires after the stop has been handled finds it cancelled.
#[derive(Debug)]
pub struct CancellationController {
    token: CancellationToken,
    handled: Option<StopSignal>,
}

impl CancellationController {
    #[must_use]
    pub const fn new(token: CancellationToken) -> Self {
        Self {
            token,
            handled: None,
        }
    }

    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The signal that stopped playback, if any.
    #[must_use]
    pub const fn handled(&self) -> Option<StopSignal> {
        self.handled
    }

    /// Handle `signal`: leave fullscreen, cancel the token and terminate the
    /// scheduler. Returns `false` if a stop was already handled.
    pub fn signal<L, S>(&mut self, signal: StopSignal, scheduler: &mut DisplayScheduler<L, S>) -> bool
    where
        L: ImageLoader,
        S: DisplaySurface,
    {
        if let Some(first) = self.handled {
            debug!(%signal, %first, "stop already handled; ignoring");
            return false;
        }
        self.handled = Some(signal);
        info!(%signal, "stop requested");

        self.token.cancel();
        scheduler.surface_mut().leave_fullscreen();
        scheduler.terminate();
        true
    }
}
