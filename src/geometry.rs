//! Page-space geometry for hit testing

/// Rectangle in page coordinates (offset plus outer size)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True only when the point lies strictly beyond one of the edges.
    ///
    /// Points exactly on an edge count as inside.
    pub fn is_outside(&self, px: f32, py: f32) -> bool {
        px < self.x || px > self.right() || py < self.y || py > self.bottom()
    }
}
