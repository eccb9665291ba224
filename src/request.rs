//! Invocation inputs and their validation.

use std::path::PathBuf;

use crate::detect::{Point, Polygon};
use crate::error::MotionError;

/// Everything one invocation needs besides the tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionRequest {
    /// Older frame.
    pub previous: PathBuf,
    /// More recent frame; crops come from here.
    pub current: PathBuf,
    /// ROI polygon; fewer than three points disables ROI filtering.
    pub roi: Polygon,
    /// Minimum contour area as a percentage of the frame area.
    pub min_area_percent: f64,
    /// Padding per side as a percentage of the merged box size.
    pub padding_percent: f64,
    /// Where the crop is written. Must be distinct per concurrent call.
    pub output: PathBuf,
}

impl MotionRequest {
    pub fn new(
        previous: impl Into<PathBuf>,
        current: impl Into<PathBuf>,
        roi: Polygon,
        min_area_percent: f64,
        padding_percent: f64,
        output: impl Into<PathBuf>,
    ) -> Result<Self, MotionError> {
        check_percent("min_area_percent", min_area_percent)?;
        check_percent("padding_percent", padding_percent)?;
        Ok(Self {
            previous: previous.into(),
            current: current.into(),
            roi,
            min_area_percent,
            padding_percent,
            output: output.into(),
        })
    }

    /// Build a request from raw textual arguments.
    pub fn parse(
        previous: &str,
        current: &str,
        roi_json: &str,
        min_area_percent: &str,
        padding_percent: &str,
        output: &str,
    ) -> Result<Self, MotionError> {
        let roi = parse_roi(roi_json)?;
        let min_area_percent = parse_percent("min_area_percent", min_area_percent)?;
        let padding_percent = parse_percent("padding_percent", padding_percent)?;
        if output.trim().is_empty() {
            return Err(MotionError::Argument("output path is empty".to_string()));
        }
        Self::new(
            previous,
            current,
            roi,
            min_area_percent,
            padding_percent,
            output,
        )
    }
}

/// Parse `[[x, y], ...]`. A blank string means no ROI.
pub fn parse_roi(json: &str) -> Result<Polygon, MotionError> {
    if json.trim().is_empty() {
        return Ok(Polygon::default());
    }
    let polygon: Polygon = serde_json::from_str(json)
        .map_err(|e| MotionError::Argument(format!("invalid ROI polygon {:?}: {}", json, e)))?;
    if let Some(p) = polygon.points().iter().find(|p| !in_coordinate_range(p)) {
        return Err(MotionError::Argument(format!(
            "ROI vertex ({}, {}) is outside the supported coordinate range",
            p.x, p.y
        )));
    }
    Ok(polygon)
}

fn in_coordinate_range(p: &Point) -> bool {
    let range = i64::from(i32::MIN)..=i64::from(i32::MAX);
    range.contains(&p.x) && range.contains(&p.y)
}

/// Parse a non-negative, finite percentage.
pub fn parse_percent(name: &str, value: &str) -> Result<f64, MotionError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| MotionError::Argument(format!("{} must be a number, got {:?}", name, value)))?;
    check_percent(name, parsed)?;
    Ok(parsed)
}

fn check_percent(name: &str, value: f64) -> Result<(), MotionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MotionError::Argument(format!(
            "{} must be a finite, non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}
