//! Smooth pan/zoom camera paths.
//!
//! Implements the optimal path from van Wijk & Nuij, "Smooth and efficient zooming and
//! panning" (2003): the camera zooms out while panning and back in on arrival, following a
//! curve whose length also gives a natural transition duration.

use std::f64::consts::SQRT_2;

use crate::foundation::core::ViewportPos;
use crate::foundation::error::{PanslideError, PanslideResult};

const EPSILON2: f64 = 1e-12;

/// Default curvature of the zoom path.
pub const DEFAULT_RHO: f64 = SQRT_2;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Shape {
    /// Endpoints share a center; pure exponential zoom.
    Zoom,
    /// General case: hyperbolic pan+zoom curve.
    Curve { d1: f64, r0: f64 },
}

/// Camera path between two viewport triples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPath {
    from: ViewportPos,
    to: ViewportPos,
    rho: f64,
    shape: Shape,
    /// Path length in the van Wijk metric.
    s: f64,
}

impl ZoomPath {
    /// Build the path from `from` to `to` with curvature `rho`.
    pub fn new(from: ViewportPos, to: ViewportPos, rho: f64) -> PanslideResult<Self> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(PanslideError::validation(format!(
                "zoom curvature must be > 0 (got {rho})"
            )));
        }
        for (label, p) in [("start", from), ("end", to)] {
            if !p.is_finite() || p.width <= 0.0 {
                return Err(PanslideError::degenerate(format!(
                    "zoom {label} viewport {p} has no positive finite width"
                )));
            }
        }

        let rho2 = rho * rho;
        let rho4 = rho2 * rho2;
        let (w0, w1) = (from.width, to.width);
        let dx = to.cx - from.cx;
        let dy = to.cy - from.cy;
        let d2 = dx * dx + dy * dy;

        let (shape, s) = if d2 < EPSILON2 {
            (Shape::Zoom, (w1 / w0).ln() / rho)
        } else {
            let d1 = d2.sqrt();
            let b0 = (w1 * w1 - w0 * w0 + rho4 * d2) / (2.0 * w0 * rho2 * d1);
            let b1 = (w1 * w1 - w0 * w0 - rho4 * d2) / (2.0 * w1 * rho2 * d1);
            let r0 = ((b0 * b0 + 1.0).sqrt() - b0).ln();
            let r1 = ((b1 * b1 + 1.0).sqrt() - b1).ln();
            (Shape::Curve { d1, r0 }, (r1 - r0) / rho)
        };

        if !s.is_finite() {
            return Err(PanslideError::degenerate(format!(
                "zoom path from {from} to {to} has no finite length"
            )));
        }

        Ok(Self {
            from,
            to,
            rho,
            shape,
            s,
        })
    }

    /// Start of the path.
    pub fn from(&self) -> ViewportPos {
        self.from
    }

    /// End of the path.
    pub fn to(&self) -> ViewportPos {
        self.to
    }

    /// Natural transition duration in milliseconds, before any slowdown.
    pub fn duration_ms(&self) -> f64 {
        self.s.abs() * 1000.0 * self.rho / SQRT_2
    }

    /// Camera at normalized progress `t`; exact endpoints at `t <= 0` and `t >= 1`.
    pub fn sample(&self, t: f64) -> ViewportPos {
        if t <= 0.0 {
            return self.from;
        }
        if t >= 1.0 {
            return self.to;
        }

        let ViewportPos {
            cx: ux0,
            cy: uy0,
            width: w0,
        } = self.from;
        let dx = self.to.cx - ux0;
        let dy = self.to.cy - uy0;
        let s = t * self.s;

        match self.shape {
            Shape::Zoom => ViewportPos::new(
                ux0 + t * dx,
                uy0 + t * dy,
                w0 * (self.rho * s).exp(),
            ),
            Shape::Curve { d1, r0 } => {
                let rho2 = self.rho * self.rho;
                let cosh_r0 = r0.cosh();
                let u = w0 / (rho2 * d1) * (cosh_r0 * (self.rho * s + r0).tanh() - r0.sinh());
                ViewportPos::new(
                    ux0 + u * dx,
                    uy0 + u * dy,
                    w0 * cosh_r0 / (self.rho * s + r0).cosh(),
                )
            }
        }
    }
}

/// A camera move handed to the scene: path plus timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransition {
    /// Camera path.
    pub path: ZoomPath,
    /// Delay before the move starts.
    pub delay_ms: u64,
    /// Total move duration (natural path duration times slowdown).
    pub duration_ms: u64,
}

impl ZoomTransition {
    /// Time the `path` with a start `delay_ms` and a `slowdown` multiplier on its natural duration.
    pub fn new(path: ZoomPath, delay_ms: u64, slowdown: f64) -> PanslideResult<Self> {
        if !slowdown.is_finite() || slowdown < 0.0 {
            return Err(PanslideError::validation(format!(
                "zoom slowdown must be >= 0 (got {slowdown})"
            )));
        }
        Ok(Self {
            path,
            delay_ms,
            duration_ms: (path.duration_ms() * slowdown).round() as u64,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/zoom.rs"]
mod tests;
