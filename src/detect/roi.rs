//! Region-of-interest polygon and region filtering.

use serde::{Deserialize, Serialize};

use super::bbox::BoundingBox;

/// Integer point in image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<[i64; 2]> for Point {
    fn from([x, y]: [i64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Where a point lies relative to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Inside,
    OnEdge,
    Outside,
}

/// Ordered ROI vertices. Fewer than three points means "no ROI".
///
/// Serialized as `[[x, y], ...]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<[i64; 2]>", into = "Vec<[i64; 2]>")]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// True when the polygon has enough vertices to restrict anything.
    pub fn is_active(&self) -> bool {
        self.points.len() >= 3
    }

    /// Classify `p` against the closed polygon.
    pub fn containment(&self, p: Point) -> Containment {
        let n = self.points.len();
        if n == 0 {
            return Containment::Outside;
        }
        let edges = (0..n).map(|i| (self.points[i], self.points[(i + 1) % n]));

        if edges.clone().any(|(a, b)| on_segment(p, a, b)) {
            return Containment::OnEdge;
        }

        let crossings = edges
            .filter(|(a, b)| (a.y > p.y) != (b.y > p.y))
            .filter(|(a, b)| {
                let lhs = delta(p.x, a.x) * delta(b.y, a.y);
                let rhs = delta(p.y, a.y) * delta(b.x, a.x);
                if b.y > a.y {
                    lhs < rhs
                } else {
                    lhs > rhs
                }
            })
            .count();
        if crossings % 2 == 1 {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }

    /// Strict containment: boundary points are outside.
    pub fn contains(&self, p: Point) -> bool {
        self.containment(p) == Containment::Inside
    }
}

impl From<Vec<[i64; 2]>> for Polygon {
    fn from(points: Vec<[i64; 2]>) -> Self {
        Self::new(points.into_iter().map(Point::from).collect())
    }
}

impl From<Polygon> for Vec<[i64; 2]> {
    fn from(polygon: Polygon) -> Self {
        polygon.points.iter().map(|p| [p.x, p.y]).collect()
    }
}

/// Coordinate difference widened so products of two stay exact for any
/// vertex within `±2^62`.
fn delta(a: i64, b: i64) -> i128 {
    i128::from(a) - i128::from(b)
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    delta(b.x, a.x) * delta(p.y, a.y) == delta(b.y, a.y) * delta(p.x, a.x)
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// One connected motion component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub bbox: BoundingBox,
    /// Area enclosed by the component's contour, not its box.
    pub contour_area: f64,
}

impl Region {
    /// Box center, `(x + width / 2, y + height / 2)` in integer division.
    pub fn center(&self) -> Point {
        Point::new(
            i64::from(self.bbox.x) + i64::from(self.bbox.width / 2),
            i64::from(self.bbox.y) + i64::from(self.bbox.height / 2),
        )
    }
}

/// Absolute pixel threshold for `min_area_percent` of a frame.
pub fn min_area_pixels(pixel_count: u64, min_area_percent: f64) -> f64 {
    pixel_count as f64 * (min_area_percent / 100.0)
}

/// Drop regions that are too small or, with an active ROI, centered
/// anywhere but strictly inside it.
pub fn filter_regions(
    regions: Vec<Region>,
    pixel_count: u64,
    min_area_percent: f64,
    roi: &Polygon,
) -> Vec<Region> {
    let min_pixels = min_area_pixels(pixel_count, min_area_percent);
    let use_roi = roi.is_active();
    if !use_roi && !roi.points().is_empty() {
        log::warn!(
            "ROI has {} point(s); at least 3 are needed, ROI filtering skipped",
            roi.points().len()
        );
    }
    let total = regions.len();
    let kept: Vec<Region> = regions
        .into_iter()
        .filter(|region| region.contour_area >= min_pixels)
        .filter(|region| !use_roi || roi.contains(region.center()))
        .collect();
    log::debug!(
        "{} of {} regions kept (min area {:.1} px, roi {})",
        kept.len(),
        total,
        min_pixels,
        if use_roi { "on" } else { "off" }
    );
    kept
}
