use serde::{Deserialize, Serialize};

/// Pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Pixel rectangle assigned to an axis or panel by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// A frame with no usable area. Projections over it cannot resolve.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Inclusive on all four edges.
    #[must_use]
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    pub fn apply_padding(&mut self, padding: Padding) {
        self.left += padding.left;
        self.width -= padding.left + padding.right;
        self.top += padding.top;
        self.height -= padding.top + padding.bottom;
    }

    #[must_use]
    pub fn padded(mut self, padding: Padding) -> Self {
        self.apply_padding(padding);
        self
    }

    pub fn crop_left(&mut self, rect: Rect) {
        let rect_right = rect.right();
        if self.left < rect_right {
            self.width = self.right() - rect_right;
            self.left = rect_right;
        }
    }

    /// Leaves a one pixel gap before `rect`.
    pub fn crop_right(&mut self, rect: Rect) {
        if self.right() >= rect.left {
            self.width = rect.left - 1.0 - self.left;
        }
    }

    pub fn crop_top(&mut self, rect: Rect) {
        let rect_bottom = rect.bottom();
        if self.top < rect_bottom {
            self.height = self.bottom() - rect_bottom;
            self.top = rect_bottom;
        }
    }

    pub fn crop_bottom(&mut self, rect: Rect) {
        if self.bottom() > rect.top {
            self.height = rect.top - self.top;
        }
    }
}
