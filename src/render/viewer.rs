//! winit host for the display scheduler.
//!
//! Everything that touches the scheduler runs on the event-loop thread.
//! Stop requests from other threads arrive as [`ViewerEvent`]s through the
//! loop proxy.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, WindowAttributes, WindowId},
};

use crate::cancel::CancellationController;
use crate::error::Error;
use crate::events::{StopSignal, ViewerEvent};
use crate::loader::ImageLoader;
use crate::render::surface::WindowSurface;
use crate::scheduler::{DisplayScheduler, SchedulerState};
use crate::sequence::PlaybackQueue;

/// Window options for the viewer.
#[derive(Debug, Clone, Copy)]
pub struct ViewerOptions {
    /// Minimum time each image stays on screen.
    pub delay: Duration,
    /// Borderless fullscreen with a hidden cursor.
    pub fullscreen: bool,
}

struct ViewerApp<L: ImageLoader> {
    options: ViewerOptions,
    pending: Option<(PlaybackQueue, L)>,
    controller: CancellationController,
    scheduler: Option<DisplayScheduler<L, WindowSurface>>,
    error: Option<Error>,
}

impl<L: ImageLoader> ViewerApp<L> {
    fn new(
        queue: PlaybackQueue,
        loader: L,
        options: ViewerOptions,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            options,
            pending: Some((queue, loader)),
            controller: CancellationController::new(cancel),
            scheduler: None,
            error: None,
        }
    }

    fn create_scheduler(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Error> {
        let Some((queue, loader)) = self.pending.take() else {
            return Ok(());
        };

        let mut attrs = WindowAttributes::default().with_title("photo-loop");
        if self.options.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = event_loop
            .create_window(attrs)
            .map_err(|err| Error::Render(anyhow!(err).context("failed to create viewer window")))?;
        let window = Arc::new(window);
        if self.options.fullscreen {
            window.set_cursor_visible(false);
            info!("window fullscreen initialized");
        }

        let surface = WindowSurface::new(window).map_err(Error::Render)?;
        let scheduler = self.scheduler.insert(DisplayScheduler::new(
            queue,
            loader,
            surface,
            self.options.delay,
            self.controller.token().clone(),
        ));
        let next = scheduler.start(Instant::now())?;
        Self::arm(event_loop, next);
        Ok(())
    }

    fn arm(event_loop: &ActiveEventLoop, next: Option<Instant>) {
        match next {
            Some(due) => event_loop.set_control_flow(ControlFlow::WaitUntil(due)),
            None => event_loop.exit(),
        }
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop, signal: StopSignal) {
        match self.scheduler.as_mut() {
            Some(scheduler) => {
                self.controller.signal(signal, scheduler);
            }
            None => {
                info!(%signal, "stop requested before playback started");
                self.controller.token().cancel();
            }
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        error!(error = %err, "slideshow failed");
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.terminate();
        }
        self.error.get_or_insert(err);
        event_loop.exit();
    }
}

fn is_exit_key(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && matches!(
            event.physical_key,
            PhysicalKey::Code(KeyCode::Escape | KeyCode::KeyQ)
        )
}

impl<L: ImageLoader> ApplicationHandler<ViewerEvent> for ViewerApp<L> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.controller.token().is_cancelled() {
            event_loop.exit();
            return;
        }
        if let Err(err) = self.create_scheduler(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        if scheduler.surface().window().id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.stop(event_loop, StopSignal::WindowClosed),
            WindowEvent::KeyboardInput { event, .. } if is_exit_key(&event) => {
                self.stop(event_loop, StopSignal::ExitKey);
            }
            WindowEvent::Resized(size) => {
                let surface = scheduler.surface_mut();
                surface.resize(size);
                surface.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = scheduler.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::Stop(signal) => self.stop(event_loop, signal),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        if scheduler.state() == SchedulerState::Terminated {
            event_loop.exit();
            return;
        }
        match scheduler.on_timer(Instant::now()) {
            Ok(next) => Self::arm(event_loop, next),
            Err(err) => self.fail(event_loop, err),
        }
    }
}

/// Run the slideshow until the operator stops it or playback fails.
///
/// Blocks the calling thread on the winit event loop. Must be called from
/// within a tokio runtime; signals received on `stop_rx` are forwarded into
/// the loop.
///
/// # Errors
/// Window/GPU initialization failures, [`Error::NoLoadableImages`], or
/// render failures during playback.
pub fn run_slideshow<L: ImageLoader>(
    queue: PlaybackQueue,
    loader: L,
    options: ViewerOptions,
    cancel: CancellationToken,
    mut stop_rx: mpsc::Receiver<StopSignal>,
) -> Result<(), Error> {
    let event_loop = EventLoop::<ViewerEvent>::with_user_event()
        .build()
        .map_err(|err| Error::Render(anyhow!(err).context("failed to build viewer event loop")))?;
    let proxy = event_loop.create_proxy();

    let forward_task = tokio::spawn(async move {
        while let Some(signal) = stop_rx.recv().await {
            debug!(%signal, "forwarding stop signal to viewer");
            if proxy.send_event(ViewerEvent::Stop(signal)).is_err() {
                break;
            }
        }
    });

    info!(items = queue.len(), "starting slideshow");
    let mut app = ViewerApp::new(queue, loader, options, cancel);
    let run_result = event_loop.run_app(&mut app);
    forward_task.abort();

    if let Some(err) = app.error.take() {
        return Err(err);
    }
    run_result.map_err(|err| Error::Render(anyhow!(err).context("viewer event loop failed")))
}
