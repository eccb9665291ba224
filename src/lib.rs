//! ROI motion gate.
//!
//! Decides whether motion happened inside a polygonal region of interest
//! between two frames from a fixed camera and, if so, writes a padded crop
//! of the newer frame for downstream inference.
//!
//! # Pipeline
//!
//! 1. Load and pair both frames (`frame`).
//! 2. Intensity + Gaussian blur, absolute difference, threshold, dilation
//!    (`detect::preprocess`, `detect::mask`).
//! 3. External contours and their boxes (`detect::contour`).
//! 4. Area and ROI filtering (`detect::roi`).
//! 5. Union, padding and clamping (`detect::bbox`).
//! 6. Crop of the newer frame and the result record (`crop`).
//!
//! Every invocation is independent and synchronous. Callers running several
//! invocations at once must give each a distinct output path.

pub mod config;
pub mod crop;
pub mod detect;
pub mod error;
pub mod frame;
pub mod request;

pub use config::MotionConfig;
pub use detect::{
    BoundingBox, MotionBox, MotionDetector, MotionRecord, MotionResult, Point, Polygon,
    NO_MOTION_REASON,
};
pub use error::MotionError;
pub use frame::FramePair;
pub use request::MotionRequest;

/// Run the whole pipeline for one frame pair.
pub fn analyze(
    request: &MotionRequest,
    config: &MotionConfig,
) -> Result<MotionResult, MotionError> {
    let frames = FramePair::load(&request.previous, &request.current)?;
    let detector = MotionDetector::new(config);
    match detector.locate(
        &frames,
        &request.roi,
        request.min_area_percent,
        request.padding_percent,
    ) {
        Some(found) => {
            log::debug!(
                "{} region(s) merged into {:?}, padded to {:?}",
                found.regions,
                found.merged,
                found.padded
            );
            crop::emit(&frames, found.padded, &request.output, config.jpeg_quality)
        }
        None => {
            log::info!(
                "no motion between {} and {}",
                request.previous.display(),
                request.current.display()
            );
            Ok(MotionResult::no_motion())
        }
    }
}

/// Run the pipeline and fold any failure into the output record.
pub fn analyze_to_record(request: &MotionRequest, config: &MotionConfig) -> MotionRecord {
    let outcome = analyze(request, config);
    if let Err(err) = &outcome {
        log::warn!("motion analysis failed: {}", err);
    }
    MotionRecord::from(&outcome)
}
