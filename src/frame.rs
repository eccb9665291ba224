//! Frame loading.
//!
//! Both frames of a pair are decoded into owned RGB buffers before any
//! analysis starts. A pair is only usable when both frames decode and share
//! the same non-zero dimensions; anything else is a `LoadError` and the
//! invocation stops without partial output.

use std::path::Path;

use image::{GenericImageView, RgbImage};

use crate::error::MotionError;

/// Two sequential frames from the same fixed camera.
///
/// `previous` is the older frame, `current` the more recent one. Crops are
/// always taken from `current`.
pub struct FramePair {
    previous: RgbImage,
    current: RgbImage,
}

impl FramePair {
    /// Decode both frames from disk.
    pub fn load(previous: &Path, current: &Path) -> Result<Self, MotionError> {
        let previous = load_frame(previous)?;
        let current_rgb = load_frame(current)?;
        let pair = Self::from_images(previous, current_rgb)
            .map_err(|reason| MotionError::load(current, reason))?;
        log::debug!("loaded frame pair {}x{}", pair.width(), pair.height());
        Ok(pair)
    }

    /// Pair two already-decoded frames.
    pub fn from_images(previous: RgbImage, current: RgbImage) -> Result<Self, String> {
        if previous.width() == 0 || previous.height() == 0 {
            return Err("frame has zero width or height".to_string());
        }
        if previous.dimensions() != current.dimensions() {
            return Err(format!(
                "frame dimensions differ: {}x{} vs {}x{}",
                previous.width(),
                previous.height(),
                current.width(),
                current.height()
            ));
        }
        Ok(Self { previous, current })
    }

    pub fn width(&self) -> u32 {
        self.previous.width()
    }

    pub fn height(&self) -> u32 {
        self.previous.height()
    }

    /// Total pixel count `w * h`.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn previous(&self) -> &RgbImage {
        &self.previous
    }

    pub fn current(&self) -> &RgbImage {
        &self.current
    }
}

fn load_frame(path: &Path) -> Result<RgbImage, MotionError> {
    let bytes = std::fs::read(path).map_err(|e| MotionError::load(path, e))?;
    let image = image::load_from_memory(&bytes).map_err(|e| MotionError::load(path, e))?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(MotionError::load(path, "frame has zero width or height"));
    }
    Ok(image.into_rgb8())
}
