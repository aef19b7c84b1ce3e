//! Slide navigation.
//!
//! Before any navigation, [`wire`] walks every slide once and attaches camera endpoints to each
//! top-level [`ViewportChange`](crate::ViewportChange): its target, and the target of the change
//! before it (or the initial viewport) as the place undo returns to. `advance` then runs the next
//! slide's actions in order; `retreat` undoes the current slide's actions in reverse.

use crate::action::{Action, PlaybackOpts, Stage, Wiring};
use crate::foundation::core::ViewportPos;
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::input::adapter::{Command, Signal, map_signal};
use crate::presentation::model::{Presentation, Slide};
use crate::scene::node::Scene;

/// One action that failed during wiring or navigation.
#[derive(Debug)]
pub struct ActionFailure {
    /// Slide index.
    pub slide: usize,
    /// Action index inside the slide.
    pub action: usize,
    /// [`Action::kind`] of the failed action.
    pub kind: &'static str,
    /// What went wrong.
    pub error: PanslideError,
}

/// Camera endpoints attached to one viewport change.
#[derive(Clone, Debug, PartialEq)]
pub struct WiredView {
    /// Slide index.
    pub slide: usize,
    /// Action index inside the slide.
    pub action: usize,
    /// Framed element id.
    pub element: String,
    /// Where undo returns to.
    pub prior: ViewportPos,
    /// Where exec goes.
    pub target: ViewportPos,
}

/// Outcome of [`wire`].
#[derive(Debug, Default)]
pub struct WireReport {
    /// Wired changes in flat order.
    pub views: Vec<WiredView>,
    /// Changes left unwired because their geometry could not be computed.
    pub failures: Vec<ActionFailure>,
}

/// Outcome of one navigation step.
#[derive(Debug)]
pub struct SlideReport {
    /// Whether the index changed.
    pub moved: bool,
    /// Current slide after the step.
    pub index: Option<usize>,
    /// Actions that failed; the others still ran.
    pub failures: Vec<ActionFailure>,
}

impl SlideReport {
    fn stay(index: Option<usize>) -> Self {
        Self {
            moved: false,
            index,
            failures: Vec::new(),
        }
    }
}

/// Attach camera endpoints to every top-level viewport change, chaining from `initial`.
///
/// A change whose target cannot be computed stays unwired and does not move the chain.
#[tracing::instrument(skip(slides, scene), fields(count = slides.len()))]
pub fn wire(slides: &mut [Slide], scene: &dyn Scene, initial: ViewportPos) -> WireReport {
    let mut report = WireReport::default();
    let mut tracker = initial;
    for (si, slide) in slides.iter_mut().enumerate() {
        for (ai, action) in slide.actions_mut().iter_mut().enumerate() {
            let Action::ViewportChange(vc) = action else {
                continue;
            };
            match vc.view().compute_target(scene) {
                Ok(target) => {
                    vc.set_wiring(Some(Wiring {
                        target,
                        prior: tracker,
                    }));
                    report.views.push(WiredView {
                        slide: si,
                        action: ai,
                        element: vc.view().element_id().to_string(),
                        prior: tracker,
                        target,
                    });
                    tracker = target;
                }
                Err(error) => {
                    vc.set_wiring(None);
                    tracing::warn!(slide = si, action = ai, %error, "viewport change left unwired");
                    report.failures.push(ActionFailure {
                        slide: si,
                        action: ai,
                        kind: "viewport_change",
                        error,
                    });
                }
            }
        }
    }
    tracing::debug!(wired = report.views.len(), "wired");
    report
}

/// Navigation position plus the logical camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequencerState {
    /// Current slide; `None` before the first advance.
    pub current: Option<usize>,
    /// Camera as last set by a viewport change.
    pub viewport: ViewportPos,
}

/// Drives a [`Presentation`] over a [`Scene`].
pub struct Presenter<S: Scene> {
    scene: S,
    presentation: Presentation,
    opts: PlaybackOpts,
    initial: ViewportPos,
    state: SequencerState,
    wired: bool,
}

impl<S: Scene> Presenter<S> {
    /// Presenter starting from the scene's full viewport.
    pub fn new(scene: S, presentation: Presentation) -> Self {
        let initial = ViewportPos::from_rect(scene.viewport_rect());
        Self {
            scene,
            opts: presentation.opts().clone(),
            presentation,
            initial,
            state: SequencerState {
                current: None,
                viewport: initial,
            },
            wired: false,
        }
    }

    /// Replace the playback knobs.
    pub fn with_opts(mut self, opts: PlaybackOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Wire every viewport change. Allowed any number of times before the first navigation.
    pub fn wire(&mut self) -> PanslideResult<WireReport> {
        if self.state.current.is_some() {
            return Err(PanslideError::navigation(
                "wire must run before navigation starts",
            ));
        }
        let report = wire(
            self.presentation.slides_mut(),
            &self.scene,
            self.initial,
        );
        self.state.viewport = self.initial;
        self.wired = true;
        Ok(report)
    }

    /// Wire, then show the first slide.
    pub fn start(&mut self) -> PanslideResult<(WireReport, SlideReport)> {
        let wired = self.wire()?;
        let first = self.advance()?;
        Ok((wired, first))
    }

    /// Run the next slide. No-op on the last slide.
    #[tracing::instrument(skip(self), fields(current = ?self.state.current))]
    pub fn advance(&mut self) -> PanslideResult<SlideReport> {
        self.ensure_wired()?;
        let next = self.state.current.map_or(0, |c| c + 1);
        if next >= self.presentation.len() {
            return Ok(SlideReport::stay(self.state.current));
        }
        self.state.current = Some(next);

        let mut stage = Stage::new(&mut self.scene, &mut self.state.viewport, &self.opts);
        let mut failures = Vec::new();
        if let Some(slide) = self.presentation.slides_mut().get_mut(next) {
            for (ai, action) in slide.actions_mut().iter_mut().enumerate() {
                tracing::debug!(slide = next, action = ai, kind = action.kind(), "exec");
                if let Err(error) = action.exec(&mut stage) {
                    failures.push(failure(next, ai, action, error));
                }
            }
        }
        Ok(SlideReport {
            moved: true,
            index: self.state.current,
            failures,
        })
    }

    /// Undo the current slide. No-op on the first slide and before it.
    #[tracing::instrument(skip(self), fields(current = ?self.state.current))]
    pub fn retreat(&mut self) -> PanslideResult<SlideReport> {
        self.ensure_wired()?;
        let current = match self.state.current {
            Some(c) if c > 0 => c,
            other => return Ok(SlideReport::stay(other)),
        };

        let mut stage = Stage::new(&mut self.scene, &mut self.state.viewport, &self.opts);
        let mut failures = Vec::new();
        if let Some(slide) = self.presentation.slides_mut().get_mut(current) {
            for (ai, action) in slide.actions_mut().iter_mut().enumerate().rev() {
                tracing::debug!(slide = current, action = ai, kind = action.kind(), "undo");
                if let Err(error) = action.undo(&mut stage) {
                    failures.push(failure(current, ai, action, error));
                }
            }
        }
        self.state.current = Some(current - 1);
        Ok(SlideReport {
            moved: true,
            index: self.state.current,
            failures,
        })
    }

    /// Send the overlay notification. Slide state is untouched.
    pub fn toggle_overlay(&mut self) {
        tracing::debug!(event = %self.opts.overlay_event, "toggle overlay");
        self.scene.notify(&self.opts.overlay_event);
    }

    /// Carry out a command.
    pub fn dispatch(&mut self, command: Command) -> PanslideResult<SlideReport> {
        match command {
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
            Command::ToggleOverlay => {
                self.toggle_overlay();
                Ok(SlideReport::stay(self.state.current))
            }
        }
    }

    /// Map and carry out a raw signal; `None` when the signal is ignored.
    pub fn handle(&mut self, signal: Signal) -> PanslideResult<Option<SlideReport>> {
        match map_signal(signal) {
            Some(command) => self.dispatch(command).map(Some),
            None => Ok(None),
        }
    }

    /// The driven scene.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene, e.g. to advance its clock.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// The presentation, with whatever snapshots its actions hold.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Playback knobs in effect.
    pub fn opts(&self) -> &PlaybackOpts {
        &self.opts
    }

    /// Navigation state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Current slide index.
    pub fn current_index(&self) -> Option<usize> {
        self.state.current
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.presentation.len()
    }

    /// Whether the presentation has no slides.
    pub fn is_empty(&self) -> bool {
        self.presentation.is_empty()
    }

    fn ensure_wired(&self) -> PanslideResult<()> {
        if !self.wired {
            return Err(PanslideError::navigation(
                "navigation before wire; call wire() or start() first",
            ));
        }
        Ok(())
    }
}

fn failure(slide: usize, action: usize, a: &Action, error: PanslideError) -> ActionFailure {
    tracing::warn!(slide, action, kind = a.kind(), %error, "action failed");
    ActionFailure {
        slide,
        action,
        kind: a.kind(),
        error,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/sequencer.rs"]
mod tests;
