use crate::action::{SnapshotPolicy, Stage, not_armed};
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::geometry::transform::{absolute_position, compose, cumulative_transform};
use crate::scene::node::{Attr, AttrValue, Transition, resolve};

/// Default duration of a move.
pub const DEFAULT_MOVE_MS: u64 = 1000;

/// Translate `source` so its bbox origin lines up with `target_x` horizontally and `target_y`
/// vertically.
///
/// The translation is appended to the transform observed before the first exec, so executing
/// again after an undo lands at the same place.
#[derive(Clone, Debug)]
pub struct Move {
    source: String,
    target_x: String,
    target_y: String,
    duration_ms: u64,
    back: Option<Affine>,
}

impl Move {
    /// Snapshot (the pre-move transform) is taken once.
    pub const SNAPSHOT: SnapshotPolicy = SnapshotPolicy::CaptureOnce;

    /// Move `source` to the x of `target_x` and the y of `target_y`.
    pub fn new(
        source: impl Into<String>,
        target_x: impl Into<String>,
        target_y: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target_x: target_x.into(),
            target_y: target_y.into(),
            duration_ms: DEFAULT_MOVE_MS,
            back: None,
        }
    }

    /// Set the y anchor element.
    pub fn target_y(mut self, target_y: impl Into<String>) -> Self {
        self.target_y = target_y.into();
        self
    }

    /// Set the animation duration.
    pub fn duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Moved element id.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Element providing the target x.
    pub fn target_x_id(&self) -> &str {
        &self.target_x
    }

    /// Element providing the target y.
    pub fn target_y_id(&self) -> &str {
        &self.target_y
    }

    /// Animation duration.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// The captured pre-move transform.
    pub fn back(&self) -> Option<Affine> {
        self.back
    }

    /// Whether a pre-move transform has been captured.
    pub fn is_armed(&self) -> bool {
        self.back.is_some()
    }

    pub(crate) fn exec(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        let scene = &*stage.scene;
        let node = resolve(scene, &self.source)?;
        let x_node = resolve(scene, &self.target_x)?;
        let y_node = resolve(scene, &self.target_y)?;

        let here = absolute_position(scene, node);
        let x_pos = absolute_position(scene, x_node);
        let y_pos = absolute_position(scene, y_node);
        let current = cumulative_transform(scene, node);
        let [a, _, _, d, _, _] = current.as_coeffs();
        if a == 0.0 || d == 0.0 || !(a.is_finite() && d.is_finite()) {
            return Err(PanslideError::degenerate(format!(
                "'{}' has a transform without usable axis scale ({a}, {d})",
                self.source
            )));
        }
        let delta = Vec2::new((x_pos.x - here.x) / a, (y_pos.y - here.y) / d);

        if Self::SNAPSHOT.should_capture(self.is_armed()) {
            self.back = Some(current);
        }
        let back = self.back.unwrap_or(current);

        tracing::debug!(id = %self.source, dx = delta.x, dy = delta.y, "move");
        stage.scene.animate(
            node,
            Transition::new(
                Attr::Transform,
                AttrValue::Matrix(compose(back, Affine::translate(delta))),
                self.duration_ms,
            )
            .ease(stage.opts.ease),
        );
        Ok(())
    }

    pub(crate) fn undo(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        let back = self.back.ok_or_else(|| not_armed("move", &self.source))?;
        let node = resolve(&*stage.scene, &self.source)?;
        tracing::debug!(id = %self.source, "move back");
        stage.scene.animate(
            node,
            Transition::new(Attr::Transform, AttrValue::Matrix(back), self.duration_ms)
                .ease(stage.opts.ease),
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/action/motion.rs"]
mod tests;
