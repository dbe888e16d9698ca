use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fit::{compute_fit, resample, InvalidDimensions};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("cannot load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot display {}: {source}", path.display())]
    Dimensions {
        path: PathBuf,
        #[source]
        source: InvalidDimensions,
    },
}

// ---------------------------------------------------------------------------
// Decoded image data (full size, straight from the codec)
// ---------------------------------------------------------------------------

pub struct DecodedImage {
    pub rgba: RgbaImage,
    pub width: u32,
    pub height: u32,
}

pub fn decode_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    let img = image::open(path).map_err(|source| DecodeError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Decoded {} ({}x{})", path.display(), width, height);
    Ok(DecodedImage { rgba, width, height })
}

// ---------------------------------------------------------------------------
// Frame: what the window shows
// ---------------------------------------------------------------------------

/// A display-ready image: pixels already fitted to the screen, top-left
/// origin, RGBA8 row-major.
pub struct Frame {
    pub pixels: RgbaImage,
    pub title: String,
}

impl Frame {
    pub fn prepare(path: &Path, decoded: DecodedImage, area: (u32, u32)) -> Result<Self, DecodeError> {
        let fit = compute_fit(decoded.width, decoded.height, area.0, area.1).map_err(|source| {
            DecodeError::Dimensions {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if fit.resample {
            log::debug!(
                "Resampling {}x{} -> {}x{}",
                decoded.width,
                decoded.height,
                fit.width,
                fit.height
            );
        }
        let title = window_title(path, decoded.width, decoded.height);
        let pixels = resample(decoded.rgba, fit);
        Ok(Self { pixels, title })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

pub fn load_frame(path: &Path, area: (u32, u32)) -> Result<Frame, DecodeError> {
    let decoded = decode_image(path)?;
    Frame::prepare(path, decoded, area)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn window_title(path: &Path, width: u32, height: u32) -> String {
    format!("imgv - {} ({}x{})", file_name(path), width, height)
}
