//! Image loading: decode a queued file to RGBA8 for upload.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};
use tracing::debug;

use crate::error::ImageLoadError;
use crate::scan::ImageFile;

/// An image decoded on the CPU and ready for upload to the display surface.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    #[must_use]
    pub fn from_rgba8(path: PathBuf, img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            path,
            width,
            height,
            pixels: img.into_raw(),
        }
    }
}

/// Source of decoded images for the scheduler.
pub trait ImageLoader {
    /// Load `file`.
    ///
    /// # Errors
    /// Returns an [`ImageLoadError`] when the file cannot be opened or decoded.
    fn load(&mut self, file: &ImageFile) -> Result<DecodedImage, ImageLoadError>;
}

/// Loader backed by the `image` crate, honoring EXIF orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodingLoader;

impl ImageLoader for DecodingLoader {
    fn load(&mut self, file: &ImageFile) -> Result<DecodedImage, ImageLoadError> {
        let img = decode_oriented(file.path())?;
        debug!(path = %file, width = img.width(), height = img.height(), "decoded");
        Ok(DecodedImage::from_rgba8(file.path().to_path_buf(), img))
    }
}

// Orientation handling is best-effort; missing metadata keeps the stored orientation.
fn decode_oriented(path: &Path) -> Result<RgbaImage, ImageLoadError> {
    let open_err = |source| ImageLoadError::Open {
        path: path.to_path_buf(),
        source,
    };
    let decode_err = |source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(open_err)?
        .with_guessed_format()
        .map_err(open_err)?
        .decode()
        .map_err(decode_err)?;
    let img = img.to_rgba8();

    let orientation = read_orientation(path).unwrap_or(1);
    Ok(apply_orientation(img, orientation))
}

fn apply_orientation(img: RgbaImage, orientation: u16) -> RgbaImage {
    use image::imageops::{flip_horizontal, flip_vertical, rotate90, rotate180, rotate270};
    match orientation {
        2 => flip_horizontal(&img),
        3 => rotate180(&img),
        4 => flip_vertical(&img),
        // transpose: rotate90 + flip_horizontal
        5 => flip_horizontal(&rotate90(&img)),
        6 => rotate90(&img),
        // transverse: rotate270 + flip_horizontal
        7 => flip_horizontal(&rotate270(&img)),
        8 => rotate270(&img),
        _ => img,
    }
}

fn read_orientation(path: &Path) -> Option<u16> {
    let file = File::open(path).ok()?;
    let mut buf = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut buf).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    let o = u16::try_from(field.value.get_uint(0)?).ok()?;
    debug!("exif orientation {} for {}", o, path.display());
    Some(o)
}
