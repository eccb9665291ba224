//! Frame differencing, binarization and dilation.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology;

use super::bbox::BoundingBox;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Per-pixel `|a - b|`. Both buffers must have identical dimensions.
pub fn abs_diff(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y).0[0].abs_diff(b.get_pixel(x, y).0[0])])
    })
}

/// `255` where `delta > threshold`, `0` elsewhere.
pub fn threshold(delta: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(delta.width(), delta.height(), |x, y| {
        if delta.get_pixel(x, y).0[0] > threshold {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Dilate with a `kernel_size` x `kernel_size` square, `iterations` times.
///
/// Pixels outside the mask never contribute foreground.
pub fn dilate(mask: &GrayImage, kernel_size: u32, iterations: u32) -> GrayImage {
    let radius = u8::try_from(kernel_size / 2).unwrap_or(u8::MAX);
    if radius == 0 {
        return mask.clone();
    }
    (0..iterations).fold(mask.clone(), |current, _| {
        morphology::dilate(&current, Norm::LInf, radius)
    })
}

/// Blank the given rectangles. Zones are clipped to the mask first.
pub fn clear_zones(mask: &mut GrayImage, zones: &[BoundingBox]) {
    for zone in zones {
        let Some(safe) = zone.intersect_frame(mask.width(), mask.height()) else {
            log::warn!(
                "excluded zone {:?} lies outside the {}x{} frame",
                zone,
                mask.width(),
                mask.height()
            );
            continue;
        };
        for y in safe.y..safe.bottom() {
            for x in safe.x..safe.right() {
                mask.put_pixel(x, y, Luma([BACKGROUND]));
            }
        }
    }
}

/// Number of foreground pixels.
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.as_raw().iter().filter(|&&v| v != BACKGROUND).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_is_symmetric() {
        let a = GrayImage::from_fn(4, 1, |x, _| Luma([(x * 50) as u8]));
        let b = GrayImage::from_pixel(4, 1, Luma([60]));
        let ab = abs_diff(&a, &b);
        assert_eq!(ab, abs_diff(&b, &a));
        assert_eq!(ab.as_raw(), &vec![60, 10, 40, 90]);
    }

    #[test]
    fn threshold_is_strict() {
        let delta = GrayImage::from_fn(3, 1, |x, _| Luma([24 + x as u8]));
        let mask = threshold(&delta, 25);
        assert_eq!(mask.as_raw(), &vec![0, 0, 255]);
    }

    #[test]
    fn dilation_grows_by_radius_per_iteration() {
        let mut mask = GrayImage::new(11, 11);
        mask.put_pixel(5, 5, Luma([FOREGROUND]));

        let once = dilate(&mask, 3, 1);
        assert_eq!(count_foreground(&once), 9);

        let twice = dilate(&mask, 3, 2);
        assert_eq!(count_foreground(&twice), 25);
        assert_eq!(twice.get_pixel(3, 3).0[0], FOREGROUND);
        assert_eq!(twice.get_pixel(2, 5).0[0], BACKGROUND);
    }

    #[test]
    fn dilation_bridges_small_gaps() {
        let mut mask = GrayImage::new(10, 3);
        mask.put_pixel(2, 1, Luma([FOREGROUND]));
        mask.put_pixel(6, 1, Luma([FOREGROUND]));
        let dilated = dilate(&mask, 3, 2);
        assert!((2..=6).all(|x| dilated.get_pixel(x, 1).0[0] == FOREGROUND));
    }

    #[test]
    fn dilation_at_border_does_not_wrap() {
        let mut mask = GrayImage::new(5, 5);
        mask.put_pixel(0, 0, Luma([FOREGROUND]));
        let dilated = dilate(&mask, 3, 1);
        assert_eq!(count_foreground(&dilated), 4);
        assert_eq!(dilated.get_pixel(4, 4).0[0], BACKGROUND);
    }

    #[test]
    fn zones_are_clipped_and_cleared() {
        let mut mask = GrayImage::from_pixel(10, 10, Luma([FOREGROUND]));
        clear_zones(
            &mut mask,
            &[
                BoundingBox::new(8, 8, 10, 10),
                BoundingBox::new(50, 50, 5, 5),
            ],
        );
        assert_eq!(count_foreground(&mask), 96);
        assert_eq!(mask.get_pixel(9, 9).0[0], BACKGROUND);
    }
}
