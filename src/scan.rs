//! Directory scanning utilities for discovering image files.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::Error;

/// Extensions (lowercase, without dot) the slideshow knows how to show.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// A path known to point at an image by its extension.
///
/// Contents are never inspected here; a corrupt file is still an `ImageFile`
/// and is only rejected later, when the scheduler tries to load it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageFile(PathBuf);

impl ImageFile {
    /// Wrap `path` if it has a supported image extension.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        is_supported_image(&path).then_some(Self(path))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ImageFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

/// Options controlling directory scanning.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ScanOptions {
    /// Optional maximum recursion depth. `None` or `Some(0)` means unlimited.
    pub max_depth: Option<usize>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Skip dot-directories below the root (`.git`, `.thumbnails`, ...).
    pub skip_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_links: false,
            skip_hidden: false,
        }
    }
}

/// Return `true` if `path` has an allowed image extension (case-insensitive).
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|e| *e == ext)
        })
}

/// Recursively scan `root` for images with default options.
///
/// # Errors
/// Returns [`Error::BadDir`] if `root` is missing or not a directory.
pub fn scan(root: &Path) -> Result<Vec<ImageFile>, Error> {
    scan_with_options(root, &ScanOptions::default())
}

/// Scan `root` for images using the provided options.
///
/// The order of the result follows the filesystem and is not stable across
/// platforms. Finding nothing is not an error here; the playback queue
/// rejects an empty list.
///
/// # Errors
/// Returns [`Error::BadDir`] if `root` is missing or not a directory.
pub fn scan_with_options(root: &Path, opts: &ScanOptions) -> Result<Vec<ImageFile>, Error> {
    if !root.is_dir() {
        return Err(Error::BadDir(root.to_string_lossy().into_owned()));
    }

    let mut wd = WalkDir::new(root).follow_links(opts.follow_links);
    if let Some(d) = opts.max_depth
        && d > 0
    {
        wd = wd.max_depth(d);
    }

    let mut out = Vec::new();
    for entry in wd
        .into_iter()
        .filter_entry(|e| !(opts.skip_hidden && is_hidden_dir(e)))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "scan: skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(file) = ImageFile::new(entry.into_path()) {
            out.push(file);
        }
    }

    debug!(root = %root.display(), found = out.len(), "scan complete");
    Ok(out)
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    // Never skip the root; tempfile roots can be dot-dirs.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_supported_image(Path::new("a/B.JPG")));
        assert!(is_supported_image(Path::new("x.Jpeg")));
        assert!(is_supported_image(Path::new("x.bmp")));
        assert!(!is_supported_image(Path::new("x.webp")));
        assert!(!is_supported_image(Path::new("png")));
        assert!(!is_supported_image(Path::new("notes.txt")));
    }

    #[test]
    fn image_file_rejects_unknown_extension() {
        assert!(ImageFile::new("clip.mp4").is_none());
        let f = ImageFile::new("dir/pic.gif").unwrap();
        assert_eq!(f.path(), Path::new("dir/pic.gif"));
    }
}
