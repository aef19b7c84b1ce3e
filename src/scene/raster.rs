//! Camera-frame preview: rasterizes an SVG document as seen through a [`ViewportPos`].

use crate::foundation::core::{Affine, Size, ViewportPos};
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::geometry::viewport::zoom_transform;

/// RGBA8 frame produced by [`render_camera_frame`].
#[derive(Clone, Debug)]
pub struct CameraFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels over an opaque white background.
    pub data: Vec<u8>,
}

/// Render `tree` through `camera` into a frame `width` pixels wide.
///
/// The frame keeps the document's aspect ratio; the camera is interpreted in document units,
/// the same space [`crate::MemoryScene::from_svg_tree`] reports geometry in.
pub fn render_camera_frame(
    tree: &usvg::Tree,
    camera: ViewportPos,
    width: u32,
) -> PanslideResult<CameraFrame> {
    let size = tree.size();
    let doc = Size::new(f64::from(size.width()), f64::from(size.height()));
    if !(doc.width.is_finite() && doc.height.is_finite()) || doc.width <= 0.0 || doc.height <= 0.0
    {
        return Err(PanslideError::degenerate("svg has invalid width/height"));
    }
    if width == 0 {
        return Err(PanslideError::validation("frame width must be > 0"));
    }

    let px_per_unit = f64::from(width) / doc.width;
    let height = (doc.height * px_per_unit).round().max(1.0) as u32;

    // Avoid pathological allocations.
    const MAX_DIM: u32 = 16_384;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(PanslideError::validation(format!(
            "frame size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let xform = Affine::scale(px_per_unit) * zoom_transform(camera, doc)?;
    let [a, b, c, d, e, f] = xform.as_coeffs();
    let ts = resvg::tiny_skia::Transform::from_row(
        a as f32, b as f32, c as f32, d as f32, e as f32, f as f32,
    );

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PanslideError::validation("failed to allocate frame pixmap"))?;
    pixmap.fill(resvg::tiny_skia::Color::WHITE);
    resvg::render(tree, ts, &mut pixmap.as_mut());

    Ok(CameraFrame {
        width,
        height,
        data: pixmap.data().to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/raster.rs"]
mod tests;
