use crate::action::{Action, PlaybackOpts};
use crate::foundation::error::{PanslideError, PanslideResult};

/// Ordered actions run together by one navigation step.
#[derive(Clone, Debug, Default)]
pub struct Slide {
    actions: Vec<Action>,
}

impl Slide {
    /// Slide with no actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn then(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Append several actions, in order.
    pub fn then_all<I, A>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Action>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    /// Actions in declared order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub(crate) fn actions_mut(&mut self) -> &mut [Action] {
        &mut self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the slide has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Action> for Slide {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

/// Ordered slides. Slides own their actions, and so their undo snapshots.
#[derive(Clone, Debug, Default)]
pub struct Presentation {
    slides: Vec<Slide>,
    opts: PlaybackOpts,
}

impl Presentation {
    /// Presentation over `slides` with default playback, unvalidated.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides,
            opts: PlaybackOpts::default(),
        }
    }

    /// Replace the playback knobs a [`Presenter`](crate::Presenter) starts with.
    pub fn with_opts(mut self, opts: PlaybackOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Playback knobs the presentation was authored with.
    pub fn opts(&self) -> &PlaybackOpts {
        &self.opts
    }

    /// Start a [`PresentationBuilder`].
    pub fn builder() -> PresentationBuilder {
        PresentationBuilder::default()
    }

    /// Slides in order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub(crate) fn slides_mut(&mut self) -> &mut [Slide] {
        &mut self.slides
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether there are no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Check every action's construction parameters.
    pub fn validate(&self) -> PanslideResult<()> {
        let rho = self.opts.rho;
        if !rho.is_finite() || rho <= 0.0 {
            return Err(PanslideError::validation(format!(
                "zoom curvature must be > 0 (got {rho})"
            )));
        }
        for (si, slide) in self.slides.iter().enumerate() {
            for (ai, action) in slide.actions.iter().enumerate() {
                action.validate().map_err(|e| {
                    PanslideError::validation(format!(
                        "slide {si} action {ai} ({}): {e}",
                        action.kind()
                    ))
                })?;
            }
        }
        Ok(())
    }
}

/// Incremental [`Presentation`] construction; `build` validates.
#[derive(Default)]
pub struct PresentationBuilder {
    slides: Vec<Slide>,
    opts: PlaybackOpts,
}

impl PresentationBuilder {
    /// Append a slide.
    pub fn slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }

    /// Playback knobs for the finished presentation.
    pub fn opts(mut self, opts: PlaybackOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Finish and validate.
    pub fn build(self) -> PanslideResult<Presentation> {
        let p = Presentation {
            slides: self.slides,
            opts: self.opts,
        };
        p.validate()?;
        Ok(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/model.rs"]
mod tests;
