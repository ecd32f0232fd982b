use std::path::PathBuf;

use thiserror::Error;

/// Library error type for photo-loop operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The photo root is missing or is not a directory.
    #[error("invalid photo directory: {0}")]
    BadDir(String),

    /// The scan completed but found no images, so there is nothing to cycle over.
    #[error("no images found in the selected folder")]
    EmptyCollection,

    /// Every item of the playback queue failed to load in a row.
    #[error("no loadable images: {attempts} consecutive files failed to load")]
    NoLoadableImages { attempts: usize },

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Rendering/display error from the surface.
    #[error("render error: {0}")]
    Render(anyhow::Error),
}

/// A queued file could not be opened or decoded.
///
/// Recovered locally by the scheduler's skip path; only ever logged.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ImageLoadError {
    /// Path of the file that failed to load.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}
