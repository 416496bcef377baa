/// Axis-aligned pixel rectangle, `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle left after removing `margin` pixels from every side of a
    /// `width x height` area. Collapses to zero area when the margins overlap.
    pub fn inset(width: usize, height: usize, margin: usize) -> Self {
        Self {
            x: margin,
            y: margin,
            width: width.saturating_sub(margin.saturating_mul(2)),
            height: height.saturating_sub(margin.saturating_mul(2)),
        }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
