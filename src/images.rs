//! Panel image decoding.
//!
//! Images are decoded into RGBA pixel buffers when the comic is loaded; the
//! viewer turns them into egui textures once a window exists.

use crate::error::ComicError;
use std::path::Path;

/// Decoded image data (RGBA, 8 bits per channel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// A single-colour image, handy for tests and placeholders.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba: rgba.repeat(pixels),
        }
    }
}

/// Source of panel images.
pub trait ImageLoader {
    /// Decodes the image at `path`.
    fn load(&mut self, path: &Path) -> Result<DecodedImage, ComicError>;
}

/// Loads images from the local filesystem with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&mut self, path: &Path) -> Result<DecodedImage, ComicError> {
        let img = image::open(path).map_err(|source| ComicError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Loaded file {} ({}x{})", path.display(), width, height);
        Ok(DecodedImage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}
