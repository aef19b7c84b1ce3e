use crate::foundation::core::{Affine, Rect, Size, Vec2, ViewportPos};
use crate::foundation::error::{PanslideError, PanslideResult};

fn check_extent(label: &str, w: f64, h: f64) -> PanslideResult<()> {
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Err(PanslideError::degenerate(format!(
            "{label} has no positive finite extent ({w}x{h})"
        )));
    }
    Ok(())
}

/// Camera triple that fits `rect`, padded by `fit_scale`, into a viewport of `viewport` size.
///
/// The more constraining axis decides the zoom factor
/// `k = min(vw / (rw * s), vh / (rh * s))`; the resulting visible width is `vw / k`.
pub fn fit_viewport(rect: Rect, fit_scale: f64, viewport: Size) -> PanslideResult<ViewportPos> {
    if !fit_scale.is_finite() || fit_scale <= 0.0 {
        return Err(PanslideError::validation(format!(
            "fit scale must be > 0 (got {fit_scale})"
        )));
    }
    check_extent("bounding rect", rect.width(), rect.height())?;
    check_extent("viewport", viewport.width, viewport.height)?;

    let k = f64::min(
        viewport.width / (rect.width() * fit_scale),
        viewport.height / (rect.height() * fit_scale),
    );
    let center = rect.center();
    let pos = ViewportPos::new(center.x, center.y, viewport.width / k);
    if !pos.is_finite() {
        return Err(PanslideError::degenerate(format!(
            "fitting {rect:?} produced a non-finite viewport"
        )));
    }
    Ok(pos)
}

/// Scene-to-viewport matrix that puts `pos` at the viewport center at the matching zoom.
pub fn zoom_transform(pos: ViewportPos, viewport: Size) -> PanslideResult<Affine> {
    check_extent("camera", pos.width, pos.width)?;
    let k = viewport.width / pos.width;
    let offset = Vec2::new(
        viewport.width / 2.0 - pos.cx * k,
        viewport.height / 2.0 - pos.cy * k,
    );
    Ok(Affine::translate(offset) * Affine::scale(k))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/viewport.rs"]
mod tests;
