use crate::action::{SnapshotPolicy, Stage, not_armed};
use crate::animation::ease::Ease;
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::scene::node::{Attr, AttrValue, Transition, resolve_all};

/// Default fade duration.
pub const DEFAULT_FADE_MS: u64 = 500;

/// Animate the opacity of a list of elements.
#[derive(Clone, Debug)]
pub struct Fade {
    ids: Vec<String>,
    opacity: f64,
    duration_ms: u64,
    delay_ms: u64,
    old: Option<Vec<(String, f64)>>,
}

impl Fade {
    /// Snapshot (the pre-fade opacities) is taken once.
    pub const SNAPSHOT: SnapshotPolicy = SnapshotPolicy::CaptureOnce;

    /// Fade every element of `ids` to `opacity`.
    pub fn new<I, S>(ids: I, opacity: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            opacity,
            duration_ms: DEFAULT_FADE_MS,
            delay_ms: 0,
            old: None,
        }
    }

    /// Set the animation duration.
    pub fn duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the start delay.
    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Faded element ids, in order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Target opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Animation duration.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Start delay.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Captured `(id, opacity)` pairs.
    pub fn snapshot(&self) -> Option<&[(String, f64)]> {
        self.old.as_deref()
    }

    /// Whether pre-fade opacities have been captured.
    pub fn is_armed(&self) -> bool {
        self.old.is_some()
    }

    /// Check the target opacity range.
    pub fn validate(&self) -> PanslideResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PanslideError::validation(format!(
                "fade opacity {} is outside [0, 1]",
                self.opacity
            )));
        }
        Ok(())
    }

    pub(crate) fn exec(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        self.validate()?;
        let nodes = resolve_all(&*stage.scene, &self.ids)?;

        if Self::SNAPSHOT.should_capture(self.is_armed()) {
            let old = self
                .ids
                .iter()
                .zip(&nodes)
                .map(|(id, node)| {
                    let v = stage
                        .scene
                        .style(*node, Attr::Opacity)
                        .and_then(|v| v.as_number())
                        .unwrap_or(1.0);
                    (id.clone(), v)
                })
                .collect();
            self.old = Some(old);
        }

        tracing::debug!(ids = ?self.ids, opacity = self.opacity, "fade");
        let ease = stage.opts.ease;
        for node in nodes {
            stage.scene.animate(node, self.transition(self.opacity, ease));
        }
        Ok(())
    }

    pub(crate) fn undo(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        let old = self
            .old
            .as_ref()
            .ok_or_else(|| not_armed("fade", &self.ids.join(",")))?;
        let ids: Vec<String> = old.iter().map(|(id, _)| id.clone()).collect();
        let nodes = resolve_all(&*stage.scene, &ids)?;

        tracing::debug!(ids = ?self.ids, "fade back");
        let ease = stage.opts.ease;
        for (node, (_, opacity)) in nodes.into_iter().zip(old) {
            stage.scene.animate(node, self.transition(*opacity, ease));
        }
        Ok(())
    }

    fn transition(&self, opacity: f64, ease: Ease) -> Transition {
        Transition::new(Attr::Opacity, AttrValue::Number(opacity), self.duration_ms)
            .delay(self.delay_ms)
            .ease(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/action/fade.rs"]
mod tests;
