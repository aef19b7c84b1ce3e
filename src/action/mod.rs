//! Reversible presentation actions.
//!
//! Every action is a small state machine. It starts *unarmed*; the first successful `exec`
//! captures whatever `undo` needs (its snapshot) and arms it. `undo` restores the snapshot and
//! leaves it in place, so repeated undo is idempotent and a later exec re-applies over it.
//! `undo` on an unarmed action fails with [`PanslideError::PrecondNotArmed`] and changes nothing.

pub(crate) mod fade;
pub(crate) mod motion;
pub(crate) mod overlay;
pub(crate) mod recolor;
pub(crate) mod viewport;

use crate::animation::ease::Ease;
use crate::animation::zoom::DEFAULT_RHO;
use crate::foundation::core::ViewportPos;
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::scene::node::Scene;

pub use fade::Fade;
pub use motion::Move;
pub use overlay::ToggleOverlay;
pub use recolor::Recolor;
pub use viewport::{View, ViewportChange, Wiring};

/// Notification emitted by overlay toggles.
pub const TOGGLE_OVERLAY_EVENT: &str = "toggle-overlay";

/// When an action (re)captures its undo snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotPolicy {
    /// Captured by the first exec only; later execs keep it.
    CaptureOnce,
    /// Captured afresh by every exec.
    Recapture,
}

impl SnapshotPolicy {
    /// Whether an exec should capture, given whether a snapshot already exists.
    pub fn should_capture(self, armed: bool) -> bool {
        match self {
            Self::CaptureOnce => !armed,
            Self::Recapture => true,
        }
    }
}

/// Playback knobs shared by every action.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackOpts {
    /// Curvature of camera paths.
    pub rho: f64,
    /// Easing of element transitions.
    pub ease: Ease,
    /// Event name delivered by overlay toggles.
    pub overlay_event: String,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            rho: DEFAULT_RHO,
            ease: Ease::default(),
            overlay_event: TOGGLE_OVERLAY_EVENT.to_string(),
        }
    }
}

/// Everything an action may touch while running.
pub struct Stage<'a> {
    /// Scene receiving transitions and notifications.
    pub scene: &'a mut dyn Scene,
    /// Logical camera state, updated by viewport changes.
    pub viewport: &'a mut ViewportPos,
    /// Playback knobs.
    pub opts: &'a PlaybackOpts,
}

impl<'a> Stage<'a> {
    /// Bundle the pieces an action runs against.
    pub fn new(
        scene: &'a mut dyn Scene,
        viewport: &'a mut ViewportPos,
        opts: &'a PlaybackOpts,
    ) -> Self {
        Self {
            scene,
            viewport,
            opts,
        }
    }
}

/// A reversible unit of visual change.
#[derive(Clone, Debug)]
pub enum Action {
    /// Pan/zoom the camera onto a view.
    ViewportChange(ViewportChange),
    /// Translate an element so it lines up with other elements.
    Move(Move),
    /// Animate the opacity of elements.
    Fade(Fade),
    /// Animate the fill of elements' paths.
    Recolor(Recolor),
    /// Toggle the host overlay.
    ToggleOverlay(ToggleOverlay),
    /// Run another action backwards.
    Invert(Box<Action>),
}

impl Action {
    /// Apply the action.
    pub fn exec(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        match self {
            Self::ViewportChange(a) => a.exec(stage),
            Self::Move(a) => a.exec(stage),
            Self::Fade(a) => a.exec(stage),
            Self::Recolor(a) => a.exec(stage),
            Self::ToggleOverlay(a) => a.exec(stage),
            Self::Invert(inner) => inner.undo(stage),
        }
    }

    /// Revert the action to its snapshot.
    pub fn undo(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        match self {
            Self::ViewportChange(a) => a.undo(stage),
            Self::Move(a) => a.undo(stage),
            Self::Fade(a) => a.undo(stage),
            Self::Recolor(a) => a.undo(stage),
            Self::ToggleOverlay(a) => a.undo(stage),
            Self::Invert(inner) => inner.exec(stage),
        }
    }

    /// Whether `undo` has a snapshot to restore.
    pub fn is_armed(&self) -> bool {
        match self {
            Self::ViewportChange(a) => a.wiring().is_some(),
            Self::Move(a) => a.is_armed(),
            Self::Fade(a) => a.is_armed(),
            Self::Recolor(a) => a.is_armed(),
            Self::ToggleOverlay(_) => true,
            Self::Invert(inner) => inner.is_armed(),
        }
    }

    /// Snapshot policy of the variant; `None` for actions without a captured snapshot.
    pub fn snapshot_policy(&self) -> Option<SnapshotPolicy> {
        match self {
            Self::Move(_) => Some(Move::SNAPSHOT),
            Self::Fade(_) => Some(Fade::SNAPSHOT),
            Self::Recolor(_) => Some(Recolor::SNAPSHOT),
            Self::ViewportChange(_) | Self::ToggleOverlay(_) => None,
            Self::Invert(inner) => inner.snapshot_policy(),
        }
    }

    /// Short variant name for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ViewportChange(_) => "viewport_change",
            Self::Move(_) => "move",
            Self::Fade(_) => "fade",
            Self::Recolor(_) => "recolor",
            Self::ToggleOverlay(_) => "toggle_overlay",
            Self::Invert(_) => "invert",
        }
    }

    /// Validate construction parameters that do not need the scene.
    pub fn validate(&self) -> PanslideResult<()> {
        match self {
            Self::ViewportChange(a) => a.validate(),
            Self::Fade(a) => a.validate(),
            Self::Invert(inner) => inner.validate(),
            Self::Move(_) | Self::Recolor(_) | Self::ToggleOverlay(_) => Ok(()),
        }
    }
}

impl From<ViewportChange> for Action {
    fn from(a: ViewportChange) -> Self {
        Self::ViewportChange(a)
    }
}

impl From<Move> for Action {
    fn from(a: Move) -> Self {
        Self::Move(a)
    }
}

impl From<Fade> for Action {
    fn from(a: Fade) -> Self {
        Self::Fade(a)
    }
}

impl From<Recolor> for Action {
    fn from(a: Recolor) -> Self {
        Self::Recolor(a)
    }
}

impl From<ToggleOverlay> for Action {
    fn from(a: ToggleOverlay) -> Self {
        Self::ToggleOverlay(a)
    }
}

pub(crate) fn not_armed(kind: &str, what: &str) -> PanslideError {
    PanslideError::not_armed(format!("{kind} '{what}' was undone before it ever ran"))
}

#[cfg(test)]
#[path = "../../tests/unit/action/mod.rs"]
mod tests;
