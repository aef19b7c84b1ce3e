pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Camera state: the scene point at the viewport center plus the visible scene width.
///
/// This is the "viewport triple" `[cx, cy, width]` that every viewport change moves between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportPos {
    /// Scene-space x of the viewport center.
    pub cx: f64,
    /// Scene-space y of the viewport center.
    pub cy: f64,
    /// Scene-space width visible across the viewport.
    pub width: f64,
}

impl ViewportPos {
    /// Build a viewport triple.
    pub fn new(cx: f64, cy: f64, width: f64) -> Self {
        Self { cx, cy, width }
    }

    /// Camera that shows `rect` unscaled: centered on it, as wide as it is.
    pub fn from_rect(rect: Rect) -> Self {
        let c = rect.center();
        Self {
            cx: c.x,
            cy: c.y,
            width: rect.width(),
        }
    }

    /// Triple as `[cx, cy, width]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.cx, self.cy, self.width]
    }

    pub(crate) fn is_finite(self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.width.is_finite()
    }
}

impl From<[f64; 3]> for ViewportPos {
    fn from([cx, cy, width]: [f64; 3]) -> Self {
        Self { cx, cy, width }
    }
}

impl std::fmt::Display for ViewportPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}, {:.3}]", self.cx, self.cy, self.width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
