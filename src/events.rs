use std::fmt;

/// Operator actions that end the slideshow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    /// Escape or Q pressed in the viewer window.
    ExitKey,
    /// The window manager asked the viewer window to close.
    WindowClosed,
    /// Ctrl-C / SIGINT.
    Interrupt,
    /// Ctrl-D on an interactive terminal.
    StdinClosed,
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExitKey => "exit key",
            Self::WindowClosed => "window closed",
            Self::Interrupt => "interrupt",
            Self::StdinClosed => "stdin closed",
        })
    }
}

/// User events posted to the viewer event loop from other threads.
#[derive(Debug, Clone, Copy)]
pub enum ViewerEvent {
    Stop(StopSignal),
}
