//! Intensity conversion and Gaussian smoothing.

use image::{GrayImage, Luma, RgbImage};
use imageproc::filter;

/// Convert to single-channel intensity with BT.601 luma weights.
pub fn to_intensity(frame: &RgbImage) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        Luma([clamp_to_u8(luma)])
    })
}

/// Sigma used when none is given: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian blur whose sigma is derived from an odd `kernel_size`.
///
/// A kernel of one pixel (or less) leaves the image untouched.
pub fn gaussian_blur(image: &GrayImage, kernel_size: u32) -> GrayImage {
    if kernel_size <= 1 {
        return image.clone();
    }
    filter::gaussian_blur_f32(image, sigma_for_kernel(kernel_size))
}

/// Intensity conversion followed by smoothing.
pub fn preprocess(frame: &RgbImage, kernel_size: u32) -> GrayImage {
    gaussian_blur(&to_intensity(frame), kernel_size)
}

fn clamp_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn sigma_follows_kernel_size() {
        assert!((sigma_for_kernel(21) - 3.5).abs() < 1e-6);
        assert!((sigma_for_kernel(3) - 0.8).abs() < 1e-6);
        assert!(sigma_for_kernel(255) > sigma_for_kernel(21));
    }

    #[test]
    fn unit_kernel_is_identity() {
        let img = GrayImage::from_fn(5, 5, |x, y| Luma([(x * 40 + y) as u8]));
        assert_eq!(gaussian_blur(&img, 1), img);
    }

    #[test]
    fn flat_image_stays_flat() {
        let img = GrayImage::from_pixel(30, 30, Luma([77]));
        let blurred = gaussian_blur(&img, 21);
        assert!(blurred.pixels().all(|p| p.0[0].abs_diff(77) <= 2));
    }

    #[test]
    fn blur_spreads_a_bright_dot() {
        let mut img = GrayImage::new(31, 31);
        img.put_pixel(15, 15, Luma([255]));
        let blurred = gaussian_blur(&img, 21);
        assert!(blurred.get_pixel(15, 15).0[0] < 255);
        assert!(blurred.get_pixel(16, 15).0[0] > 0);
        let (below, right) = (blurred.get_pixel(15, 16).0[0], blurred.get_pixel(16, 15).0[0]);
        assert!(below.abs_diff(right) <= 1);
        assert_eq!(blurred.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn intensity_uses_luma_weights() {
        let frame = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            _ => Rgb([200, 200, 200]),
        });
        let gray = to_intensity(&frame);
        assert_eq!(gray.get_pixel(0, 0).0[0], 76);
        assert_eq!(gray.get_pixel(1, 0).0[0], 150);
        assert_eq!(gray.get_pixel(2, 0).0[0], 200);
    }
}
