//! Window and GPU backend hosting the display scheduler.

pub mod surface;
pub mod viewer;

pub use surface::{GpuFrame, WindowSurface};
pub use viewer::{ViewerOptions, run_slideshow};
