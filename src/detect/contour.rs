//! External contour extraction from a binary mask.
//!
//! Foreground components are 8-connected. Only outermost components are
//! reported; components sitting inside the hole of another component are
//! skipped, as are the holes themselves.

use image::GrayImage;
use imageproc::contours::{self, BorderType};

use super::bbox::BoundingBox;
use super::roi::Point;

/// Closed outer boundary of one connected component, as pixel centers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Polygon area enclosed by the boundary (shoelace over pixel centers).
    ///
    /// A filled `n x n` square yields `(n - 1)^2`; single pixels and lines
    /// yield zero.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() as f64 / 2.0
    }

    /// Smallest axis-aligned box covering every boundary pixel.
    pub fn bounding_box(&self) -> BoundingBox {
        let (min_x, min_y, max_x, max_y) = self.points.iter().fold(
            (i64::MAX, i64::MAX, i64::MIN, i64::MIN),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        );
        BoundingBox::new(
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        )
    }
}

/// Outer boundary of every external foreground component.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    let external: Vec<Contour> = contours::find_contours::<i64>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour {
            points: c.points.iter().map(|p| Point::new(p.x, p.y)).collect(),
        })
        .collect();
    log::debug!("found {} external contours", external.len());
    external
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(mask: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn square_contour_area_and_box() {
        let mut mask = GrayImage::new(100, 80);
        fill(&mut mask, 20, 10, 50, 50);

        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area(), 2401.0);
        assert_eq!(contours[0].bounding_box(), BoundingBox::new(20, 10, 50, 50));
    }

    #[test]
    fn single_pixel_has_zero_area() {
        let mut mask = GrayImage::new(5, 5);
        mask.put_pixel(2, 2, Luma([255]));
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].points().contains(&Point::new(2, 2)));
        assert_eq!(contours[0].area(), 0.0);
        assert_eq!(contours[0].bounding_box(), BoundingBox::new(2, 2, 1, 1));
    }

    #[test]
    fn diagonal_pixels_form_one_component() {
        let mut mask = GrayImage::new(6, 6);
        mask.put_pixel(1, 1, Luma([255]));
        mask.put_pixel(2, 2, Luma([255]));
        mask.put_pixel(3, 3, Luma([255]));
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_box(), BoundingBox::new(1, 1, 3, 3));
    }

    #[test]
    fn disjoint_blobs_are_reported_separately() {
        let mut mask = GrayImage::new(60, 40);
        fill(&mut mask, 2, 2, 10, 10);
        fill(&mut mask, 40, 20, 8, 12);
        let mut boxes: Vec<_> = find_external_contours(&mask)
            .iter()
            .map(Contour::bounding_box)
            .collect();
        boxes.sort_by_key(|b| (b.x, b.y));
        assert_eq!(
            boxes,
            vec![BoundingBox::new(2, 2, 10, 10), BoundingBox::new(40, 20, 8, 12)]
        );
    }

    #[test]
    fn holes_and_nested_islands_are_not_reported() {
        let mut mask = GrayImage::new(40, 40);
        fill(&mut mask, 5, 5, 30, 30);
        for y in 10..30 {
            for x in 10..30 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
        fill(&mut mask, 18, 18, 4, 4);

        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_box(), BoundingBox::new(5, 5, 30, 30));
        assert_eq!(contours[0].area(), 29.0 * 29.0);
    }

    #[test]
    fn component_touching_frame_edge_is_external() {
        let mut mask = GrayImage::new(10, 10);
        fill(&mut mask, 0, 0, 10, 10);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_box(), BoundingBox::new(0, 0, 10, 10));
        assert_eq!(contours[0].area(), 81.0);
    }

    #[test]
    fn thin_v_shape_has_zero_area() {
        let mut mask = GrayImage::new(5, 5);
        mask.put_pixel(2, 1, Luma([255]));
        mask.put_pixel(1, 2, Luma([255]));
        mask.put_pixel(3, 2, Luma([255]));
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area(), 0.0);
        assert_eq!(contours[0].bounding_box(), BoundingBox::new(1, 1, 3, 2));
    }

    #[test]
    fn empty_mask_has_no_contours() {
        assert!(find_external_contours(&GrayImage::new(8, 8)).is_empty());
    }
}
