#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::bail;
use photoloop::ImageFile;
use photoloop::error::ImageLoadError;
use photoloop::loader::{DecodedImage, ImageLoader};
use photoloop::scheduler::DisplaySurface;
use photoloop::sequence::PlaybackQueue;

pub fn files(names: &[&str]) -> Vec<ImageFile> {
    names
        .iter()
        .map(|n| ImageFile::new(*n).expect("test names use image extensions"))
        .collect()
}

pub fn queue(names: &[&str]) -> PlaybackQueue {
    PlaybackQueue::build(files(names), false).unwrap()
}

/// Fails for any file whose name contains "corrupt"; records every attempt.
#[derive(Debug, Default)]
pub struct ScriptedLoader {
    pub attempts: Vec<PathBuf>,
}

impl ImageLoader for ScriptedLoader {
    fn load(&mut self, file: &ImageFile) -> Result<DecodedImage, ImageLoadError> {
        self.attempts.push(file.path().to_path_buf());
        let name = file.path().to_string_lossy();
        if name.contains("corrupt") {
            return Err(ImageLoadError::Open {
                path: file.path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt"),
            });
        }
        Ok(DecodedImage {
            path: file.path().to_path_buf(),
            width: 4,
            height: 3,
            pixels: vec![0; 4 * 3 * 4],
        })
    }
}

/// Frame handle that counts how many are alive.
#[derive(Debug)]
pub struct TrackedFrame {
    pub path: PathBuf,
    live: Rc<Cell<usize>>,
}

impl Drop for TrackedFrame {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub uploads: Vec<PathBuf>,
    pub presented: Vec<Option<PathBuf>>,
    pub presented_at: Vec<Instant>,
    pub fullscreen: bool,
    /// Per-upload stall, consumed front to back.
    pub upload_stalls: Vec<Duration>,
    pub fail_uploads: bool,
    pub live: Rc<Cell<usize>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            uploads: Vec::new(),
            presented: Vec::new(),
            presented_at: Vec::new(),
            fullscreen: true,
            upload_stalls: Vec::new(),
            fail_uploads: false,
            live: Rc::new(Cell::new(0)),
        }
    }
}

impl RecordingSurface {
    pub fn live_frames(&self) -> usize {
        self.live.get()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploads.iter().map(|p| file_name(p)).collect()
    }
}

impl DisplaySurface for RecordingSurface {
    type Frame = TrackedFrame;

    fn upload(&mut self, image: &DecodedImage) -> anyhow::Result<TrackedFrame> {
        if self.fail_uploads {
            bail!("device lost");
        }
        if !self.upload_stalls.is_empty() {
            std::thread::sleep(self.upload_stalls.remove(0));
        }
        self.uploads.push(image.path.clone());
        self.live.set(self.live.get() + 1);
        Ok(TrackedFrame {
            path: image.path.clone(),
            live: self.live.clone(),
        })
    }

    fn present(&mut self, frame: Option<&TrackedFrame>) -> anyhow::Result<()> {
        self.presented.push(frame.map(|f| f.path.clone()));
        self.presented_at.push(Instant::now());
        Ok(())
    }

    fn leave_fullscreen(&mut self) {
        self.fullscreen = false;
    }
}

pub fn file_name(p: &Path) -> String {
    p.file_name().unwrap().to_string_lossy().into_owned()
}
