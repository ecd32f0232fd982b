#![deny(unsafe_code)]

//! Fullscreen photo slideshow library.
//!
//! This crate exposes a small, cohesive API for:
//! - Scanning a folder tree for image files.
//! - Building a fixed, optionally shuffled, cyclic playback queue.
//! - Running the timer-driven display loop with per-item failure recovery.
//! - Stopping playback from operator signals.
//!
//! All fallible operations return [`Result<T, Error>`]. Library code never panics.

/// Cancellation controller for operator stop signals.
pub mod cancel;
/// Configuration types and loading/validation helpers.
pub mod config;
/// Library error types.
pub mod error;
/// Stop signals and viewer user events.
pub mod events;
/// Placement math for letterboxing images on screen.
pub mod layout;
/// Image decoding behind a loader trait.
pub mod loader;
/// winit/wgpu host for the scheduler.
pub mod render;
/// Directory scanning utilities and filters.
pub mod scan;
/// Display state machine.
pub mod scheduler;
/// Cyclic playback queue.
pub mod sequence;

pub use error::{Error, ImageLoadError};
pub use scan::ImageFile;
