//! Crop extraction and persistence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, ImageFormat, RgbImage};

use crate::detect::{BoundingBox, MotionResult};
use crate::error::MotionError;
use crate::frame::FramePair;

/// Copy `bbox` out of `frame`. The box must lie inside the frame.
pub fn crop_frame(frame: &RgbImage, bbox: BoundingBox) -> RgbImage {
    imageops::crop_imm(frame, bbox.x, bbox.y, bbox.width, bbox.height).to_image()
}

/// Persist a crop; the format follows the path extension.
///
/// A file left behind by a failed encode is removed.
pub fn write_crop(crop: &RgbImage, path: &Path, jpeg_quality: u8) -> Result<(), MotionError> {
    let format = ImageFormat::from_path(path).map_err(|e| MotionError::write(path, e))?;
    let file = File::create(path).map_err(|e| MotionError::write(path, e))?;
    let encoded = encode(crop, file, format, jpeg_quality);
    if let Err(reason) = encoded {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("could not remove partial crop {}: {}", path.display(), e);
        }
        return Err(MotionError::write(path, reason));
    }
    Ok(())
}

fn encode(
    crop: &RgbImage,
    file: File,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<(), String> {
    let mut writer = BufWriter::new(file);
    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
            crop.write_with_encoder(encoder).map_err(|e| e.to_string())?;
        }
        other => crop
            .write_to(&mut writer, other)
            .map_err(|e| e.to_string())?,
    }
    writer.flush().map_err(|e| e.to_string())
}

/// Crop the more recent frame, write it, and describe the result.
pub fn emit(
    frames: &FramePair,
    bbox: BoundingBox,
    output: &Path,
    jpeg_quality: u8,
) -> Result<MotionResult, MotionError> {
    let crop = crop_frame(frames.current(), bbox);
    write_crop(&crop, output, jpeg_quality)?;
    log::info!(
        "motion crop {}x{} at ({}, {}) written to {}",
        crop.width(),
        crop.height(),
        bbox.x,
        bbox.y,
        output.display()
    );
    Ok(MotionResult::Motion {
        bbox,
        crop_path: output.to_path_buf(),
        original_resolution: (frames.width(), frames.height()),
        crop_resolution: crop.dimensions(),
    })
}
