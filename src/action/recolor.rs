use crate::action::{SnapshotPolicy, Stage, not_armed};
use crate::animation::ease::Ease;
use crate::foundation::error::PanslideResult;
use crate::scene::node::{Attr, AttrValue, NodeId, Transition, resolve_all};

/// Default recolor duration.
pub const DEFAULT_RECOLOR_MS: u64 = 500;

/// Tag of the fill-bearing descendants a recolor touches.
const FILL_SELECTOR: &str = "path";

/// Animate the fill of every `path` below a list of elements.
#[derive(Clone, Debug)]
pub struct Recolor {
    ids: Vec<String>,
    color: String,
    duration_ms: u64,
    old: Option<Vec<(NodeId, String)>>,
}

impl Recolor {
    /// Snapshot (the pre-recolor fills) is taken again on every exec.
    pub const SNAPSHOT: SnapshotPolicy = SnapshotPolicy::Recapture;

    /// Recolor the paths below every element of `ids` to `color`.
    pub fn new<I, S>(ids: I, color: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            color: color.into(),
            duration_ms: DEFAULT_RECOLOR_MS,
            old: None,
        }
    }

    /// Set the animation duration.
    pub fn duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Recolored element ids.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Target paint.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Animation duration.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Captured `(path node, fill)` pairs from the latest exec.
    pub fn snapshot(&self) -> Option<&[(NodeId, String)]> {
        self.old.as_deref()
    }

    /// Whether fills have been captured.
    pub fn is_armed(&self) -> bool {
        self.old.is_some()
    }

    pub(crate) fn exec(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        let roots = resolve_all(&*stage.scene, &self.ids)?;
        let paths: Vec<NodeId> = roots
            .into_iter()
            .flat_map(|root| stage.scene.children_matching(root, FILL_SELECTOR))
            .collect();

        if Self::SNAPSHOT.should_capture(self.is_armed()) {
            let old = paths
                .iter()
                .map(|&node| {
                    let fill = stage
                        .scene
                        .style(node, Attr::Fill)
                        .and_then(|v| v.as_paint().map(str::to_string))
                        .unwrap_or_else(|| "black".to_string());
                    (node, fill)
                })
                .collect();
            self.old = Some(old);
        }

        tracing::debug!(ids = ?self.ids, color = %self.color, paths = paths.len(), "recolor");
        let ease = stage.opts.ease;
        for node in paths {
            stage.scene.animate(node, self.transition(&self.color, ease));
        }
        Ok(())
    }

    pub(crate) fn undo(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        let old = self
            .old
            .as_ref()
            .ok_or_else(|| not_armed("recolor", &self.ids.join(",")))?;
        tracing::debug!(ids = ?self.ids, "recolor back");
        let ease = stage.opts.ease;
        for (node, fill) in old {
            stage.scene.animate(*node, self.transition(fill, ease));
        }
        Ok(())
    }

    fn transition(&self, fill: &str, ease: Ease) -> Transition {
        Transition::new(
            Attr::Fill,
            AttrValue::Paint(fill.to_string()),
            self.duration_ms,
        )
        .ease(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/action/recolor.rs"]
mod tests;
