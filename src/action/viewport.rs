use crate::action::{Stage, not_armed};
use crate::animation::zoom::{ZoomPath, ZoomTransition};
use crate::foundation::core::ViewportPos;
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::geometry::transform::bounding_rect;
use crate::geometry::viewport::fit_viewport;
use crate::scene::node::{Scene, resolve};

/// Default padding around a viewed element.
pub const DEFAULT_FIT_SCALE: f64 = 1.1;
/// Default wait before a camera move starts.
pub const DEFAULT_VIEW_DELAY_MS: u64 = 250;
/// Default multiplier on the natural camera path duration.
pub const DEFAULT_SLOWDOWN: f64 = 2.0;

/// A named element to frame, with the padding applied around it.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    element_id: String,
    fit_scale: f64,
}

impl View {
    /// Frame `element_id` with the default padding.
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            fit_scale: DEFAULT_FIT_SCALE,
        }
    }

    /// Replace the padding factor.
    pub fn with_scale(mut self, fit_scale: f64) -> Self {
        self.fit_scale = fit_scale;
        self
    }

    /// Framed element id.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Padding factor, `1.0` meaning a tight fit.
    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    /// Camera triple framing the element in `scene`'s current geometry.
    pub fn compute_target(&self, scene: &dyn Scene) -> PanslideResult<ViewportPos> {
        let node = resolve(scene, &self.element_id)?;
        let rect = bounding_rect(scene, node);
        fit_viewport(rect, self.fit_scale, scene.viewport_rect().size())
    }
}

/// Camera endpoints attached to a [`ViewportChange`] by the wiring pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wiring {
    /// Where exec moves the camera.
    pub target: ViewportPos,
    /// Where undo moves the camera back to.
    pub prior: ViewportPos,
}

/// Pan/zoom the camera onto a [`View`].
#[derive(Clone, Debug)]
pub struct ViewportChange {
    view: View,
    delay_ms: u64,
    slowdown: f64,
    wiring: Option<Wiring>,
}

impl ViewportChange {
    /// Move onto `view` with the default delay and slowdown.
    pub fn new(view: View) -> Self {
        Self {
            view,
            delay_ms: DEFAULT_VIEW_DELAY_MS,
            slowdown: DEFAULT_SLOWDOWN,
            wiring: None,
        }
    }

    /// Set the start delay.
    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration multiplier.
    pub fn slowdown(mut self, slowdown: f64) -> Self {
        self.slowdown = slowdown;
        self
    }

    /// Viewed element.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Start delay.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Duration multiplier.
    pub fn slowdown_factor(&self) -> f64 {
        self.slowdown
    }

    /// Endpoints attached by wiring, if any.
    pub fn wiring(&self) -> Option<Wiring> {
        self.wiring
    }

    /// Wired target viewport.
    pub fn target(&self) -> Option<ViewportPos> {
        self.wiring.map(|w| w.target)
    }

    /// Wired undo viewport.
    pub fn prior(&self) -> Option<ViewportPos> {
        self.wiring.map(|w| w.prior)
    }

    pub(crate) fn set_wiring(&mut self, wiring: Option<Wiring>) {
        self.wiring = wiring;
    }

    /// Check the view padding and the slowdown.
    pub fn validate(&self) -> PanslideResult<()> {
        let s = self.view.fit_scale;
        if !s.is_finite() || s <= 0.0 {
            return Err(PanslideError::validation(format!(
                "view '{}' fit scale must be > 0 (got {s})",
                self.view.element_id
            )));
        }
        if !self.slowdown.is_finite() || self.slowdown < 0.0 {
            return Err(PanslideError::validation(format!(
                "view '{}' slowdown must be >= 0 (got {})",
                self.view.element_id, self.slowdown
            )));
        }
        Ok(())
    }

    pub(crate) fn exec(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        let to = self
            .target()
            .ok_or_else(|| not_armed("viewport change", &self.view.element_id))?;
        self.travel(stage, to)
    }

    pub(crate) fn undo(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        let to = self
            .prior()
            .ok_or_else(|| not_armed("viewport change", &self.view.element_id))?;
        self.travel(stage, to)
    }

    fn travel(&self, stage: &mut Stage<'_>, to: ViewportPos) -> PanslideResult<()> {
        let path = ZoomPath::new(*stage.viewport, to, stage.opts.rho)?;
        let transition = ZoomTransition::new(path, self.delay_ms, self.slowdown)?;
        tracing::debug!(
            view = %self.view.element_id,
            from = %stage.viewport,
            to = %to,
            duration_ms = transition.duration_ms,
            "viewport change"
        );
        stage.scene.zoom(transition);
        *stage.viewport = to;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/action/viewport.rs"]
mod tests;
