//! Motion decision core.
//!
//! Stages run in order on a [`FramePair`]:
//! intensity + blur, difference + threshold + dilation, external contours,
//! area / ROI filtering, box union, padding + clamping.

pub mod bbox;
pub mod contour;
pub mod mask;
pub mod preprocess;
pub mod result;
pub mod roi;

pub use bbox::{merge_boxes, BoundingBox};
pub use contour::{find_external_contours, Contour};
pub use result::{MotionRecord, MotionResult, NO_MOTION_REASON};
pub use roi::{filter_regions, Containment, Point, Polygon, Region};

use image::GrayImage;

use crate::config::MotionConfig;
use crate::frame::FramePair;

/// Where motion was found in a frame pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionBox {
    /// Union of all surviving regions, before padding.
    pub merged: BoundingBox,
    /// `merged` after padding and clamping; always inside the frame.
    pub padded: BoundingBox,
    /// Number of regions that contributed.
    pub regions: usize,
}

/// Runs the decision stages with one set of tunables.
pub struct MotionDetector<'a> {
    config: &'a MotionConfig,
}

impl<'a> MotionDetector<'a> {
    pub fn new(config: &'a MotionConfig) -> Self {
        Self { config }
    }

    /// Binary motion mask: blurred difference, thresholded and dilated, with
    /// excluded zones blanked.
    pub fn motion_mask(&self, frames: &FramePair) -> GrayImage {
        let previous = preprocess::preprocess(frames.previous(), self.config.blur_kernel);
        let current = preprocess::preprocess(frames.current(), self.config.blur_kernel);
        let delta = mask::abs_diff(&previous, &current);
        let binary = mask::threshold(&delta, self.config.diff_threshold);
        let mut dilated = mask::dilate(
            &binary,
            self.config.dilate_kernel,
            self.config.dilate_iterations,
        );
        mask::clear_zones(&mut dilated, &self.config.excluded_zones);
        dilated
    }

    /// All external motion components, unfiltered.
    pub fn regions(&self, frames: &FramePair) -> Vec<Region> {
        let motion = self.motion_mask(frames);
        if mask::count_foreground(&motion) == 0 {
            log::debug!("motion mask is empty");
            return Vec::new();
        }
        find_external_contours(&motion)
            .iter()
            .map(|contour| Region {
                bbox: contour.bounding_box(),
                contour_area: contour.area(),
            })
            .collect()
    }

    /// Locate relevant motion, or `None` when every region is filtered out.
    pub fn locate(
        &self,
        frames: &FramePair,
        roi: &Polygon,
        min_area_percent: f64,
        padding_percent: f64,
    ) -> Option<MotionBox> {
        let kept = filter_regions(
            self.regions(frames),
            frames.pixel_count(),
            min_area_percent,
            roi,
        );
        let regions = kept.len();
        let merged = merge_boxes(kept.into_iter().map(|region| region.bbox))?;
        let padded = merged.pad_and_clamp(padding_percent, frames.width(), frames.height());
        Some(MotionBox {
            merged,
            padded,
            regions,
        })
    }
}
