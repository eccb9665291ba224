use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::bbox::BoundingBox;
use crate::error::MotionError;

/// Reason reported when no region survives filtering.
pub const NO_MOTION_REASON: &str = "no valid motion in ROI";

/// Terminal outcome of one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MotionResult {
    NoMotion {
        reason: String,
    },
    Motion {
        /// Padded, clamped crop box in frame coordinates.
        bbox: BoundingBox,
        crop_path: PathBuf,
        /// `(width, height)` of the frames.
        original_resolution: (u32, u32),
        /// `(width, height)` of the written crop.
        crop_resolution: (u32, u32),
    },
}

impl MotionResult {
    pub fn no_motion() -> Self {
        MotionResult::NoMotion {
            reason: NO_MOTION_REASON.to_string(),
        }
    }

    pub fn is_motion(&self) -> bool {
        matches!(self, MotionResult::Motion { .. })
    }
}

/// The single structured record printed per invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MotionRecord {
    Motion {
        motion: bool,
        crop_path: String,
        bbox: [u32; 4],
        original_res: [u32; 2],
        crop_res: [u32; 2],
    },
    NoMotion {
        motion: bool,
        reason: String,
    },
    Error {
        error: String,
    },
}

impl MotionRecord {
    pub fn error(message: impl Into<String>) -> Self {
        MotionRecord::Error {
            error: message.into(),
        }
    }

    /// Compact JSON; falls back to a fixed error record if encoding fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"failed to encode result"}"#.to_string())
    }
}

impl From<&MotionResult> for MotionRecord {
    fn from(result: &MotionResult) -> Self {
        match result {
            MotionResult::NoMotion { reason } => MotionRecord::NoMotion {
                motion: false,
                reason: reason.clone(),
            },
            MotionResult::Motion {
                bbox,
                crop_path,
                original_resolution,
                crop_resolution,
            } => MotionRecord::Motion {
                motion: true,
                crop_path: crop_path.display().to_string(),
                bbox: bbox.to_array(),
                original_res: [original_resolution.0, original_resolution.1],
                crop_res: [crop_resolution.0, crop_resolution.1],
            },
        }
    }
}

impl From<&MotionError> for MotionRecord {
    fn from(err: &MotionError) -> Self {
        MotionRecord::error(err.to_string())
    }
}

impl From<&Result<MotionResult, MotionError>> for MotionRecord {
    fn from(outcome: &Result<MotionResult, MotionError>) -> Self {
        match outcome {
            Ok(result) => result.into(),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_motion_record_shape() -> anyhow::Result<()> {
        let record = MotionRecord::from(&MotionResult::no_motion());
        let value: serde_json::Value = serde_json::from_str(&record.to_json())?;
        assert_eq!(
            value,
            json!({ "motion": false, "reason": "no valid motion in ROI" })
        );
        Ok(())
    }

    #[test]
    fn motion_record_shape() -> anyhow::Result<()> {
        let result = MotionResult::Motion {
            bbox: BoundingBox::new(1, 2, 30, 40),
            crop_path: PathBuf::from("/tmp/crop.jpg"),
            original_resolution: (640, 480),
            crop_resolution: (30, 40),
        };
        let value: serde_json::Value =
            serde_json::from_str(&MotionRecord::from(&result).to_json())?;
        assert_eq!(
            value,
            json!({
                "motion": true,
                "crop_path": "/tmp/crop.jpg",
                "bbox": [1, 2, 30, 40],
                "original_res": [640, 480],
                "crop_res": [30, 40],
            })
        );
        Ok(())
    }

    #[test]
    fn error_record_shape() -> anyhow::Result<()> {
        let outcome: Result<MotionResult, MotionError> =
            Err(MotionError::Argument("bad roi".to_string()));
        let value: serde_json::Value =
            serde_json::from_str(&MotionRecord::from(&outcome).to_json())?;
        assert_eq!(value, json!({ "error": "argument error: bad roi" }));
        Ok(())
    }

    #[test]
    fn records_parse_back_into_the_right_variant() -> anyhow::Result<()> {
        let record: MotionRecord =
            serde_json::from_str(r#"{"motion": false, "reason": "quiet"}"#)?;
        assert!(matches!(record, MotionRecord::NoMotion { .. }));
        let record: MotionRecord = serde_json::from_str(r#"{"error": "boom"}"#)?;
        assert_eq!(record, MotionRecord::error("boom"));
        Ok(())
    }
}
