//! Loads PNG and GIF files into monochrome frames for image hotspots.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use embedded_graphics::{pixelcolor::BinaryColor, prelude::Size};
use image::{AnimationDecoder, DynamicImage, GrayAlphaImage, codecs::gif::GifDecoder};
use miniscreen_core::{framebuffer::Bitmap, hotspot::ImageFrame};
use thiserror::Error;

/// Grey level from which a pixel counts as lit.
const THRESHOLD: u8 = 128;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("{0} has no frames")]
    Empty(PathBuf),
}

/// Lit where the pixel is bright and mostly opaque.
pub fn to_bitmap(image: &GrayAlphaImage) -> Bitmap {
    let mut bitmap = Bitmap::new(Size::new(image.width(), image.height()));
    for (x, y, pixel) in image.enumerate_pixels() {
        let [luma, alpha] = pixel.0;
        if luma >= THRESHOLD && alpha >= THRESHOLD {
            bitmap.set_pixel(x as i32, y as i32, BinaryColor::On);
        }
    }
    bitmap
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

fn load_gif(path: &Path) -> Result<Vec<ImageFrame>, AssetError> {
    let decoder = GifDecoder::new(BufReader::new(File::open(path)?))?;
    let frames = decoder.into_frames().collect_frames()?;
    Ok(frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay_ms = if denom == 0 { 0 } else { numer / denom };
            let image = DynamicImage::ImageRgba8(frame.into_buffer()).to_luma_alpha8();
            ImageFrame {
                bitmap: to_bitmap(&image),
                delay_ms,
            }
        })
        .collect())
}

/// Reads a still image or an animated GIF.
pub fn load_frames(path: &Path) -> Result<Vec<ImageFrame>, AssetError> {
    let frames = if is_gif(path) {
        load_gif(path)?
    } else {
        let data = fs::read(path)?;
        let image = image::load_from_memory(&data)?;
        vec![ImageFrame::still(to_bitmap(&image.to_luma_alpha8()))]
    };
    if frames.is_empty() {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    log::info!("Loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}
