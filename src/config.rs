use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

use crate::detect::BoundingBox;

pub const DEFAULT_BLUR_KERNEL: u32 = 21;
pub const DEFAULT_DIFF_THRESHOLD: u8 = 25;
pub const DEFAULT_DILATE_KERNEL: u32 = 3;
pub const DEFAULT_DILATE_ITERATIONS: u32 = 2;
pub const DEFAULT_JPEG_QUALITY: u8 = 95;
/// Largest accepted blur or dilation kernel.
pub const MAX_KERNEL_SIZE: u32 = 255;

#[derive(Debug, Deserialize, Default)]
struct MotionConfigFile {
    blur_kernel: Option<u32>,
    diff_threshold: Option<u8>,
    dilate: Option<DilateConfigFile>,
    output: Option<OutputConfigFile>,
    excluded_zones: Option<Vec<BoundingBox>>,
}

#[derive(Debug, Deserialize, Default)]
struct DilateConfigFile {
    kernel: Option<u32>,
    iterations: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct OutputConfigFile {
    jpeg_quality: Option<u8>,
}

/// Pipeline tunables. Defaults reproduce the reference behavior: 21x21
/// blur, threshold 25, 3x3 dilation applied twice.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Gaussian kernel size (odd). Sigma is derived from it.
    pub blur_kernel: u32,
    /// Pixels whose absolute difference is strictly above this become motion.
    pub diff_threshold: u8,
    /// Square structuring element size for dilation (odd).
    pub dilate_kernel: u32,
    pub dilate_iterations: u32,
    pub jpeg_quality: u8,
    /// Rectangles removed from the motion mask before contour extraction.
    pub excluded_zones: Vec<BoundingBox>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            blur_kernel: DEFAULT_BLUR_KERNEL,
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
            dilate_kernel: DEFAULT_DILATE_KERNEL,
            dilate_iterations: DEFAULT_DILATE_ITERATIONS,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            excluded_zones: Vec::new(),
        }
    }
}

impl MotionConfig {
    /// Load from `MOTION_CONFIG` (optional JSON file), then env overrides.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("MOTION_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(read_config_file(Path::new(path))?),
            _ => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: MotionConfigFile) -> Self {
        let dilate = file.dilate.unwrap_or_default();
        Self {
            blur_kernel: file.blur_kernel.unwrap_or(DEFAULT_BLUR_KERNEL),
            diff_threshold: file.diff_threshold.unwrap_or(DEFAULT_DIFF_THRESHOLD),
            dilate_kernel: dilate.kernel.unwrap_or(DEFAULT_DILATE_KERNEL),
            dilate_iterations: dilate.iterations.unwrap_or(DEFAULT_DILATE_ITERATIONS),
            jpeg_quality: file
                .output
                .and_then(|output| output.jpeg_quality)
                .unwrap_or(DEFAULT_JPEG_QUALITY),
            excluded_zones: file.excluded_zones.unwrap_or_default(),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(value) = env_value("MOTION_BLUR_KERNEL") {
            self.blur_kernel = value
                .parse()
                .map_err(|_| anyhow!("MOTION_BLUR_KERNEL must be a positive integer"))?;
        }
        if let Some(value) = env_value("MOTION_DIFF_THRESHOLD") {
            self.diff_threshold = value
                .parse()
                .map_err(|_| anyhow!("MOTION_DIFF_THRESHOLD must be an integer in 0..=255"))?;
        }
        if let Some(value) = env_value("MOTION_DILATE_ITERATIONS") {
            self.dilate_iterations = value
                .parse()
                .map_err(|_| anyhow!("MOTION_DILATE_ITERATIONS must be a non-negative integer"))?;
        }
        if let Some(value) = env_value("MOTION_JPEG_QUALITY") {
            self.jpeg_quality = value
                .parse()
                .map_err(|_| anyhow!("MOTION_JPEG_QUALITY must be an integer in 1..=100"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(anyhow!(
                "blur_kernel must be odd and non-zero, got {}",
                self.blur_kernel
            ));
        }
        if self.blur_kernel > MAX_KERNEL_SIZE {
            return Err(anyhow!(
                "blur_kernel must be at most {}, got {}",
                MAX_KERNEL_SIZE,
                self.blur_kernel
            ));
        }
        if self.dilate_kernel == 0 || self.dilate_kernel % 2 == 0 {
            return Err(anyhow!(
                "dilate kernel must be odd and non-zero, got {}",
                self.dilate_kernel
            ));
        }
        if self.dilate_kernel > MAX_KERNEL_SIZE {
            return Err(anyhow!(
                "dilate kernel must be at most {}, got {}",
                MAX_KERNEL_SIZE,
                self.dilate_kernel
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<MotionConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
