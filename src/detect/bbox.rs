use serde::{Deserialize, Serialize};

/// Axis-aligned integer box, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Minimal box enclosing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        BoundingBox::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Intersection with `[0, w) x [0, h)`, `None` when empty.
    pub fn intersect_frame(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        if self.x >= right || self.y >= bottom {
            return None;
        }
        Some(BoundingBox::new(
            self.x,
            self.y,
            right - self.x,
            bottom - self.y,
        ))
    }

    /// True when the box lies entirely within a `width` x `height` frame.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }

    /// Grow by `padding_percent` of the box size on every side, then clamp
    /// to the frame.
    ///
    /// Padding amounts are floored. The origin is clamped before the size,
    /// so a box near the top or left edge loses the padding that would have
    /// fallen outside on that side while keeping the full `2 * pad` growth
    /// towards the bottom or right, up to the frame edge.
    pub fn pad_and_clamp(&self, padding_percent: f64, width: u32, height: u32) -> BoundingBox {
        let pad_w = padding_amount(self.width, padding_percent);
        let pad_h = padding_amount(self.height, padding_percent);

        let x = u64::from(self.x).saturating_sub(pad_w);
        let y = u64::from(self.y).saturating_sub(pad_h);
        let w = (u64::from(width).saturating_sub(x)).min(u64::from(self.width) + 2 * pad_w);
        let h = (u64::from(height).saturating_sub(y)).min(u64::from(self.height) + 2 * pad_h);

        // Every value is bounded by the u32 frame dimensions or the origin.
        BoundingBox::new(x as u32, y as u32, w as u32, h as u32)
    }

    /// `[x, y, width, height]`.
    pub fn to_array(&self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

fn padding_amount(extent: u32, padding_percent: f64) -> u64 {
    let pad = (f64::from(extent) * (padding_percent / 100.0)).floor();
    if pad.is_finite() && pad > 0.0 {
        // Anything beyond the largest frame is clamped away anyway.
        pad.min(f64::from(u32::MAX)) as u64
    } else {
        0
    }
}

/// Minimal box enclosing every input box; `None` for an empty input.
///
/// A pure min/max fold, so the result does not depend on input order.
pub fn merge_boxes<I>(boxes: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = BoundingBox>,
{
    boxes.into_iter().reduce(|acc, b| acc.union(&b))
}
